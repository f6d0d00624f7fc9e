//! Native node wrapper and the wrap-time factory.

use crate::branch::compat::CompatBranchItem;
use crate::branch::provider::BranchDataProvider;
use crate::cache::ItemCache;
use crate::types::{QuickPickOptions, Resource, ResourceModel, TreeItem};
use crate::Result;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Uniform node interface the host tree and the picker traverse.
///
/// Implementations wrap exactly one [`ResourceModel`] and the provider that
/// produced it; they do not own the provider. Children are re-fetched on
/// every call — the only caching above the provider is identity
/// registration in the [`ItemCache`].
#[async_trait]
pub trait TreeNode: Send + Sync {
    /// Lazily enumerate and wrap this node's children. An absent provider
    /// result yields an empty sequence, never an error.
    async fn get_children(&self) -> Result<Vec<Arc<dyn TreeNode>>>;

    /// Display projection merged over caller-supplied defaults.
    async fn get_tree_item(&self) -> Result<TreeItem>;

    /// The wrapped backend node.
    fn model(&self) -> &Arc<dyn ResourceModel>;

    /// Cache generation this wrapper was registered under.
    fn cache_generation(&self) -> u64;

    fn resource(&self) -> Option<Resource> {
        self.model().resource()
    }

    fn quick_pick_options(&self) -> Option<QuickPickOptions> {
        self.model().quick_pick_options()
    }
}

impl std::fmt::Debug for dyn TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeNode").finish_non_exhaustive()
    }
}

/// Typed unwrap of the backend node behind a wrapper. The caller asserts
/// the concrete type; no conversion is performed.
pub fn unwrap_model<T: Any>(node: &dyn TreeNode) -> Option<&T> {
    node.model().as_any().downcast_ref::<T>()
}

/// Caller-supplied display defaults applied under the provider projection.
#[derive(Debug, Clone, Default)]
pub struct BranchItemOptions {
    pub defaults: Option<TreeItem>,
}

impl BranchItemOptions {
    pub fn with_defaults(defaults: TreeItem) -> Self {
        Self {
            defaults: Some(defaults),
        }
    }
}

/// Defaults first, provider fields override, and a tooltip exposing the
/// context value is synthesized when neither side supplies one.
pub(crate) fn merge_tree_item(defaults: Option<TreeItem>, provided: TreeItem) -> TreeItem {
    let mut merged = defaults.unwrap_or_default();
    merged.tooltip = Some(format!(
        "Context value: {}",
        provided.context_value.as_deref().unwrap_or_default()
    ));
    merged.label = provided.label;
    if provided.description.is_some() {
        merged.description = provided.description;
    }
    if provided.tooltip.is_some() {
        merged.tooltip = provided.tooltip;
    }
    if provided.context_value.is_some() {
        merged.context_value = provided.context_value;
    }
    if provided.is_leaf.is_some() {
        merged.is_leaf = provided.is_leaf;
    }
    merged
}

/// Native wrapper around a current-generation provider node.
pub struct BranchItem {
    model: Arc<dyn ResourceModel>,
    provider: Arc<dyn BranchDataProvider>,
    cache: Arc<ItemCache>,
    options: BranchItemOptions,
    generation: u64,
}

impl BranchItem {
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
        }
    }
}

#[async_trait]
impl TreeNode for BranchItem {
    async fn get_children(&self) -> Result<Vec<Arc<dyn TreeNode>>> {
        let children = self.provider.get_children(Some(&self.model)).await?;
        let factory = BranchItemFactory::new(self.cache.clone());

        Ok(children
            .unwrap_or_default()
            .into_iter()
            .map(|child| factory.wrap(child, self.provider.clone(), BranchItemOptions::default()))
            .collect())
    }

    async fn get_tree_item(&self) -> Result<TreeItem> {
        let item = self.provider.get_tree_item(&self.model).await?;
        Ok(merge_tree_item(self.options.defaults.clone(), item))
    }

    fn model(&self) -> &Arc<dyn ResourceModel> {
        &self.model
    }

    fn cache_generation(&self) -> u64 {
        self.generation
    }
}

/// The single polymorphism point between provider generations.
///
/// Every wrapper is produced here: the factory probes the node's shape once
/// at wrap time, builds the matching variant, and registers the pair in the
/// item cache. Constructing a wrapper any other way would bypass identity
/// registration.
pub struct BranchItemFactory {
    cache: Arc<ItemCache>,
}

impl BranchItemFactory {
    pub fn new(cache: Arc<ItemCache>) -> Self {
        Self { cache }
    }

    pub fn wrap(
        &self,
        model: Arc<dyn ResourceModel>,
        provider: Arc<dyn BranchDataProvider>,
        options: BranchItemOptions,
    ) -> Arc<dyn TreeNode> {
        let generation = self.cache.generation();
        let item: Arc<dyn TreeNode> = if model.as_legacy().is_some() {
            Arc::new(CompatBranchItem::new(
                model.clone(),
                provider,
                self.cache.clone(),
                options,
                generation,
            ))
        } else {
            Arc::new(BranchItem::new(
                model.clone(),
                provider,
                self.cache.clone(),
                options,
                generation,
            ))
        };
        self.cache.add_item(&model, &item);
        item
    }
}
