//! Compatibility layer between the legacy provider generation and the
//! current branch-provider contract.
//!
//! Legacy backends hand out nodes that load their own children and render
//! themselves ([`LegacyTreeItem`]). The shims here translate those calls
//! into the [`BranchDataProvider`]/[`TreeNode`] surface so old and new
//! backends present identically to everything above the wrapping layer.

use crate::branch::item::{merge_tree_item, BranchItemFactory, BranchItemOptions, TreeNode};
use crate::branch::provider::BranchDataProvider;
use crate::cache::{model_key, ItemCache};
use crate::registry::WorkspaceResourceProvider;
use crate::types::{
    LegacyTreeItem, QuickPickOptions, Resource, ResourceModel, TreeItem, WorkspaceFolder,
};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Resource discovery contract of the previous generation: providers hand
/// back legacy-shaped nodes directly instead of `Resource` handles.
#[async_trait]
pub trait LegacyWorkspaceResourceProvider: Send + Sync {
    async fn provide_resources(
        &self,
        folder: &WorkspaceFolder,
    ) -> Result<Option<Vec<Arc<dyn ResourceModel>>>>;
}

/// Compatibility wrapper for legacy-shaped nodes.
///
/// Unlike the native wrapper, this one keeps its own child-wrapper table so
/// repeated enumerations hand back the same wrapper per child node. The
/// legacy change model polls the tree; stable wrappers are what keep
/// expansion state from collapsing under that polling.
pub struct CompatBranchItem {
    model: Arc<dyn ResourceModel>,
    provider: Arc<dyn BranchDataProvider>,
    cache: Arc<ItemCache>,
    options: BranchItemOptions,
    generation: u64,
    children: Mutex<HashMap<usize, Arc<dyn TreeNode>>>,
}

impl CompatBranchItem {
    pub(crate) fn new(
        model: Arc<dyn ResourceModel>,
        provider: Arc<dyn BranchDataProvider>,
        cache: Arc<ItemCache>,
        options: BranchItemOptions,
        generation: u64,
    ) -> Self {
        Self {
            model,
            provider,
            cache,
            options,
            generation,
            children: Mutex::new(HashMap::new()),
        }
    }

    fn legacy(&self) -> Result<&dyn LegacyTreeItem> {
        self.model
            .as_legacy()
            .ok_or_else(|| Error::provider("compatibility wrapper holds a non-legacy node"))
    }
}

#[async_trait]
impl TreeNode for CompatBranchItem {
    async fn get_children(&self) -> Result<Vec<Arc<dyn TreeNode>>> {
        let models = self.legacy()?.load_children().await?;
        let factory = BranchItemFactory::new(self.cache.clone());

        let mut wrappers = self.children.lock().unwrap();
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let key = model_key(&model);
            let item = match wrappers.get(&key) {
                Some(existing) => {
                    // Keep identity lookups valid after a cache clear.
                    self.cache.add_item(&model, existing);
                    existing.clone()
                }
                None => {
                    let wrapped = factory.wrap(
                        model,
                        self.provider.clone(),
                        BranchItemOptions::default(),
                    );
                    wrappers.insert(key, wrapped.clone());
                    wrapped
                }
            };
            out.push(item);
        }
        Ok(out)
    }

    async fn get_tree_item(&self) -> Result<TreeItem> {
        let legacy = self.legacy()?;
        let item = TreeItem {
            label: legacy.label(),
            description: legacy.description(),
            tooltip: None,
            context_value: Some(legacy.context_value()),
            is_leaf: Some(!legacy.collapsible()),
        };
        Ok(merge_tree_item(self.options.defaults.clone(), item))
    }

    fn model(&self) -> &Arc<dyn ResourceModel> {
        &self.model
    }

    fn cache_generation(&self) -> u64 {
        self.generation
    }

    fn quick_pick_options(&self) -> Option<QuickPickOptions> {
        match self.model.as_legacy() {
            Some(legacy) => Some(QuickPickOptions {
                is_leaf: !legacy.collapsible(),
            }),
            None => self.model.quick_pick_options(),
        }
    }
}

/// Legacy provider presented on the current discovery surface.
///
/// Synthesizes `Resource` handles from the legacy nodes and remembers the
/// node behind each handle so the paired branch provider can resolve it
/// back.
pub struct CompatWorkspaceResourceProvider {
    resource_type: String,
    legacy: Arc<dyn LegacyWorkspaceResourceProvider>,
    resolved: Arc<Mutex<HashMap<String, Arc<dyn ResourceModel>>>>,
}

#[async_trait]
impl WorkspaceResourceProvider for CompatWorkspaceResourceProvider {
    async fn get_resources(&self, folder: &WorkspaceFolder) -> Result<Vec<Resource>> {
        let models = self
            .legacy
            .provide_resources(folder)
            .await?
            .unwrap_or_default();

        let mut resolved = self.resolved.lock().unwrap();
        let mut resources = Vec::with_capacity(models.len());
        for model in models {
            let name = match model.as_legacy() {
                Some(item) => item.label(),
                None => {
                    return Err(Error::provider(
                        "legacy workspace resource provider returned a non-legacy node",
                    ))
                }
            };
            let id = format!("{}/{}/{}", self.resource_type, folder.name, name);
            resolved.insert(id.clone(), model);
            resources.push(Resource::new(id, name, self.resource_type.clone()));
        }
        Ok(resources)
    }
}

/// Legacy node tree presented on the branch-provider surface.
pub struct CompatBranchDataProvider {
    resolved: Arc<Mutex<HashMap<String, Arc<dyn ResourceModel>>>>,
}

#[async_trait]
impl BranchDataProvider for CompatBranchDataProvider {
    async fn get_children(
        &self,
        node: Option<&Arc<dyn ResourceModel>>,
    ) -> Result<Option<Vec<Arc<dyn ResourceModel>>>> {
        match node {
            Some(model) => {
                let legacy = model.as_legacy().ok_or_else(|| {
                    Error::provider("compatibility branch provider received a non-legacy node")
                })?;
                Ok(Some(legacy.load_children().await?))
            }
            // Top-level enumeration goes through get_resource_item.
            None => Ok(None),
        }
    }

    async fn get_tree_item(&self, node: &Arc<dyn ResourceModel>) -> Result<TreeItem> {
        let legacy = node.as_legacy().ok_or_else(|| {
            Error::provider("compatibility branch provider received a non-legacy node")
        })?;
        Ok(TreeItem {
            label: legacy.label(),
            description: legacy.description(),
            tooltip: None,
            context_value: Some(legacy.context_value()),
            is_leaf: Some(!legacy.collapsible()),
        })
    }

    async fn get_resource_item(&self, resource: &Resource) -> Result<Arc<dyn ResourceModel>> {
        self.resolved
            .lock()
            .unwrap()
            .get(&resource.id)
            .cloned()
            .ok_or_else(|| {
                Error::Provider(anyhow::anyhow!(
                    "legacy resource '{}' has not been enumerated",
                    resource.id
                ))
            })
    }
}

/// Build the two halves of the shim for one legacy provider. They share the
/// handle-to-node table, so resources discovered by one half resolve on the
/// other.
pub fn compat_provider_pair(
    resource_type: impl Into<String>,
    legacy: Arc<dyn LegacyWorkspaceResourceProvider>,
) -> (
    Arc<CompatWorkspaceResourceProvider>,
    Arc<CompatBranchDataProvider>,
) {
    let resolved = Arc::new(Mutex::new(HashMap::new()));
    (
        Arc::new(CompatWorkspaceResourceProvider {
            resource_type: resource_type.into(),
            legacy,
            resolved: resolved.clone(),
        }),
        Arc::new(CompatBranchDataProvider { resolved }),
    )
}
