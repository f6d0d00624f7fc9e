//! Shared mock backends and scripted UI for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use restree::{
    BranchDataProvider, BranchDataProviderManager, Error, ItemCache, LegacyTreeItem,
    PromptOptions, QuickPickItem, QuickPickOptions, QuickPickUi, Resource, ResourceModel,
    ResourceProviderManager, StaticWorkspace, TreeDataProvider, TreeItem, WorkspaceFolder,
    WorkspaceResourceProvider,
};
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Current-generation backend node with an inline subtree.
pub struct TestModel {
    pub label: String,
    pub context_value: String,
    pub is_leaf: bool,
    pub children: Vec<Arc<dyn ResourceModel>>,
}

impl TestModel {
    pub fn leaf(label: &str, context_value: &str) -> Arc<dyn ResourceModel> {
        Arc::new(Self {
            label: label.to_string(),
            context_value: context_value.to_string(),
            is_leaf: true,
            children: Vec::new(),
        })
    }

    pub fn branch(
        label: &str,
        context_value: &str,
        children: Vec<Arc<dyn ResourceModel>>,
    ) -> Arc<dyn ResourceModel> {
        Arc::new(Self {
            label: label.to_string(),
            context_value: context_value.to_string(),
            is_leaf: false,
            children,
        })
    }
}

impl ResourceModel for TestModel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn quick_pick_options(&self) -> Option<QuickPickOptions> {
        Some(QuickPickOptions {
            is_leaf: self.is_leaf,
        })
    }
}

/// Previous-generation node: loads its own children, renders itself.
pub struct TestLegacyModel {
    pub name: String,
    pub context_value: String,
    pub children: Vec<Arc<dyn ResourceModel>>,
}

impl TestLegacyModel {
    pub fn node(
        name: &str,
        context_value: &str,
        children: Vec<Arc<dyn ResourceModel>>,
    ) -> Arc<dyn ResourceModel> {
        Arc::new(Self {
            name: name.to_string(),
            context_value: context_value.to_string(),
            children,
        })
    }
}

impl ResourceModel for TestLegacyModel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_legacy(&self) -> Option<&dyn LegacyTreeItem> {
        Some(self)
    }
}

#[async_trait]
impl LegacyTreeItem for TestLegacyModel {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn context_value(&self) -> String {
        self.context_value.clone()
    }

    fn collapsible(&self) -> bool {
        !self.children.is_empty()
    }

    async fn load_children(&self) -> restree::Result<Vec<Arc<dyn ResourceModel>>> {
        Ok(self.children.clone())
    }
}

/// Branch provider over [`TestModel`] trees, with registered root models
/// keyed by resource id.
pub struct MockBranchProvider {
    roots: Mutex<HashMap<String, Arc<dyn ResourceModel>>>,
}

impl MockBranchProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            roots: Mutex::new(HashMap::new()),
        })
    }

    pub fn add_root(&self, resource_id: &str, model: Arc<dyn ResourceModel>) {
        self.roots
            .lock()
            .unwrap()
            .insert(resource_id.to_string(), model);
    }
}

#[async_trait]
impl BranchDataProvider for MockBranchProvider {
    async fn get_children(
        &self,
        node: Option<&Arc<dyn ResourceModel>>,
    ) -> restree::Result<Option<Vec<Arc<dyn ResourceModel>>>> {
        Ok(node
            .and_then(|n| n.as_any().downcast_ref::<TestModel>())
            .map(|m| m.children.clone()))
    }

    async fn get_tree_item(&self, node: &Arc<dyn ResourceModel>) -> restree::Result<TreeItem> {
        let model = node
            .as_any()
            .downcast_ref::<TestModel>()
            .ok_or_else(|| Error::provider("mock provider received an unexpected model type"))?;
        Ok(TreeItem::new(model.label.clone())
            .with_context_value(model.context_value.clone())
            .with_is_leaf(model.is_leaf))
    }

    async fn get_resource_item(
        &self,
        resource: &Resource,
    ) -> restree::Result<Arc<dyn ResourceModel>> {
        self.roots
            .lock()
            .unwrap()
            .get(&resource.id)
            .cloned()
            .ok_or_else(|| Error::provider(format!("unknown resource '{}'", resource.id)))
    }
}

/// Provider whose every call fails; for propagation tests.
pub struct FailingBranchProvider;

#[async_trait]
impl BranchDataProvider for FailingBranchProvider {
    async fn get_children(
        &self,
        _node: Option<&Arc<dyn ResourceModel>>,
    ) -> restree::Result<Option<Vec<Arc<dyn ResourceModel>>>> {
        Err(Error::provider("backend exploded"))
    }

    async fn get_tree_item(&self, _node: &Arc<dyn ResourceModel>) -> restree::Result<TreeItem> {
        Err(Error::provider("backend exploded"))
    }

    async fn get_resource_item(
        &self,
        _resource: &Resource,
    ) -> restree::Result<Arc<dyn ResourceModel>> {
        Err(Error::provider("backend exploded"))
    }
}

/// Provider that reports no children at all (`Ok(None)`).
pub struct BarrenBranchProvider;

#[async_trait]
impl BranchDataProvider for BarrenBranchProvider {
    async fn get_children(
        &self,
        _node: Option<&Arc<dyn ResourceModel>>,
    ) -> restree::Result<Option<Vec<Arc<dyn ResourceModel>>>> {
        Ok(None)
    }

    async fn get_tree_item(&self, _node: &Arc<dyn ResourceModel>) -> restree::Result<TreeItem> {
        Ok(TreeItem::new("barren"))
    }

    async fn get_resource_item(
        &self,
        _resource: &Resource,
    ) -> restree::Result<Arc<dyn ResourceModel>> {
        Err(Error::provider("barren provider resolves nothing"))
    }
}

/// Workspace resource provider backed by a fixed resource list.
pub struct MockResourceProvider {
    resources: Vec<Resource>,
}

impl MockResourceProvider {
    pub fn new(resources: Vec<Resource>) -> Arc<Self> {
        Arc::new(Self { resources })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl WorkspaceResourceProvider for MockResourceProvider {
    async fn get_resources(
        &self,
        _folder: &WorkspaceFolder,
    ) -> restree::Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }
}

/// One scripted user interaction.
pub enum UiAction {
    Pick(usize),
    PickLabel(&'static str),
    Back,
    Cancel,
}

/// Quick-pick UI that replays a script and records every prompt it showed.
pub struct ScriptedUi {
    script: Mutex<VecDeque<UiAction>>,
    prompts: Mutex<Vec<Vec<QuickPickItem>>>,
}

impl ScriptedUi {
    pub fn new(script: Vec<UiAction>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Labels of every prompt shown so far, in order.
    pub fn shown_labels(&self) -> Vec<Vec<String>> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|items| items.iter().map(|item| item.label.clone()).collect())
            .collect()
    }
}

#[async_trait]
impl QuickPickUi for ScriptedUi {
    async fn show_quick_pick(
        &self,
        items: Vec<QuickPickItem>,
        _options: &PromptOptions,
    ) -> restree::Result<usize> {
        self.prompts.lock().unwrap().push(items.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(UiAction::Pick(index)) => Ok(index),
            Some(UiAction::PickLabel(label)) => items
                .iter()
                .position(|item| item.label == label)
                .ok_or_else(|| Error::provider(format!("no item labelled '{label}'"))),
            Some(UiAction::Back) => Err(Error::BackNavigation),
            Some(UiAction::Cancel) | None => Err(Error::Cancelled),
        }
    }
}

/// Fully wired tree over the mock managers, with handles for every moving
/// part a test may want to poke.
pub struct TreeFixture {
    pub cache: Arc<ItemCache>,
    pub branch_providers: Arc<BranchDataProviderManager>,
    pub resource_providers: Arc<ResourceProviderManager>,
    pub refresh: broadcast::Sender<()>,
    pub tree: Arc<TreeDataProvider>,
}

pub fn tree_fixture(workspace: StaticWorkspace) -> TreeFixture {
    let cache = Arc::new(ItemCache::new());
    let branch_providers = BranchDataProviderManager::new();
    let resource_providers = ResourceProviderManager::new();
    let (refresh, _) = broadcast::channel(16);

    let tree = Arc::new(TreeDataProvider::new(
        cache.clone(),
        branch_providers.clone(),
        resource_providers.clone(),
        Arc::new(workspace),
        &refresh,
    ));

    TreeFixture {
        cache,
        branch_providers,
        resource_providers,
        refresh,
        tree,
    }
}

pub fn single_folder_workspace() -> StaticWorkspace {
    StaticWorkspace::single("app", "/work/app")
}
