//! Backend capability contract.

use crate::types::{Resource, ResourceModel, TreeItem};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability a backend must implement to plug one resource type into the
/// tree.
///
/// Providers may fail with provider-specific errors; the runtime propagates
/// them verbatim and never retries. An `Ok(None)` child enumeration means
/// "no children", not an error.
#[async_trait]
pub trait BranchDataProvider: Send + Sync {
    /// Children of `node`, or the top level of the resource when `node` is
    /// `None`.
    async fn get_children(
        &self,
        node: Option<&Arc<dyn ResourceModel>>,
    ) -> Result<Option<Vec<Arc<dyn ResourceModel>>>>;

    /// Display projection for `node`.
    async fn get_tree_item(&self, node: &Arc<dyn ResourceModel>) -> Result<TreeItem>;

    /// Resolve a top-level resource handle into its root node.
    async fn get_resource_item(&self, resource: &Resource) -> Result<Arc<dyn ResourceModel>>;
}
