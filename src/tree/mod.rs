//! Host-facing tree data provider.
//!
//! Implements the host tree-view protocol on top of the wrapping layer:
//! root requests discover and wrap top-level resources, node requests
//! delegate to the element's own wrapper. Change notifications are the
//! fan-in of three independent sources; any one of them clears the item
//! cache and re-renders from the root.

use crate::branch::{BranchItemFactory, BranchItemOptions, TreeNode};
use crate::cache::ItemCache;
use crate::registry::{BranchDataProviderManager, ResourceProviderManager};
use crate::types::{Resource, TreeItem, Workspace};
use crate::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Empty-state context signal exposed to the host. The three states are
/// mutually exclusive; the host picks its welcome message from whichever
/// one is set after a root render that produced zero children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkspaceState {
    NoWorkspace,
    NoResources,
    NoProviders,
}

/// The traversal surface of the host tree-view protocol. Implemented by
/// [`TreeDataProvider`] and consumed by the picker, which walks the same
/// wrapper graph independently of the host's rendering.
#[async_trait]
pub trait TreeDataSource: Send + Sync {
    async fn get_children(
        &self,
        element: Option<&Arc<dyn TreeNode>>,
    ) -> Result<Vec<Arc<dyn TreeNode>>>;

    async fn get_tree_item(&self, element: &Arc<dyn TreeNode>) -> Result<TreeItem>;
}

pub struct TreeDataProvider {
    item_cache: Arc<ItemCache>,
    branch_providers: Arc<BranchDataProviderManager>,
    resource_providers: Arc<ResourceProviderManager>,
    workspace: Arc<dyn Workspace>,
    state: watch::Sender<Option<WorkspaceState>>,
    changes: broadcast::Sender<()>,
    fan_in: JoinHandle<()>,
}

impl TreeDataProvider {
    /// Build a provider and start its change fan-in task. The task is
    /// scoped to the provider and aborted on drop.
    ///
    /// `refresh` is the external refresh signal; keep the sender and fire
    /// it to force a full re-render.
    pub fn new(
        item_cache: Arc<ItemCache>,
        branch_providers: Arc<BranchDataProviderManager>,
        resource_providers: Arc<ResourceProviderManager>,
        workspace: Arc<dyn Workspace>,
        refresh: &broadcast::Sender<()>,
    ) -> Self {
        let (state, _) = watch::channel(None);
        let (changes, _) = broadcast::channel(16);
        let fan_in = spawn_fan_in(
            item_cache.clone(),
            changes.clone(),
            branch_providers.subscribe(),
            resource_providers.subscribe(),
            refresh.subscribe(),
        );

        Self {
            item_cache,
            branch_providers,
            resource_providers,
            workspace,
            state,
            changes,
            fan_in,
        }
    }

    /// Fires after every upstream change, once the item cache has been
    /// cleared. Receiving on this channel means lookups against the cache
    /// already see the new generation.
    pub fn on_did_change(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Watch the empty-state signal. `None` while resources are rendering.
    pub fn state(&self) -> watch::Receiver<Option<WorkspaceState>> {
        self.state.subscribe()
    }

    pub fn item_cache(&self) -> &Arc<ItemCache> {
        &self.item_cache
    }

    fn set_state(&self, state: Option<WorkspaceState>) {
        if *self.state.borrow() != state {
            tracing::debug!(?state, "workspace state changed");
        }
        self.state.send_replace(state);
    }

    async fn on_get_children(
        &self,
        element: Option<&Arc<dyn TreeNode>>,
    ) -> Result<Vec<Arc<dyn TreeNode>>> {
        if let Some(element) = element {
            return element.get_children().await;
        }

        let folders = self.workspace.folders();
        let Some(folder) = folders.first() else {
            self.set_state(Some(WorkspaceState::NoWorkspace));
            return Ok(Vec::new());
        };

        let resources = self.resource_providers.get_resources(folder).await?;
        if resources.is_empty() {
            let state = if self.resource_providers.has_providers() {
                WorkspaceState::NoResources
            } else {
                WorkspaceState::NoProviders
            };
            self.set_state(Some(state));
            return Ok(Vec::new());
        }

        self.set_state(None);
        let factory = BranchItemFactory::new(self.item_cache.clone());
        let roots = join_all(
            resources
                .iter()
                .map(|resource| self.resource_root(&factory, resource)),
        )
        .await;
        roots.into_iter().collect()
    }

    async fn resource_root(
        &self,
        factory: &BranchItemFactory,
        resource: &Resource,
    ) -> Result<Arc<dyn TreeNode>> {
        let provider = self.branch_providers.provider_for(&resource.resource_type)?;
        let model = provider.get_resource_item(resource).await?;
        Ok(factory.wrap(
            model,
            provider,
            BranchItemOptions::with_defaults(TreeItem::new(resource.name.clone())),
        ))
    }
}

#[async_trait]
impl TreeDataSource for TreeDataProvider {
    async fn get_children(
        &self,
        element: Option<&Arc<dyn TreeNode>>,
    ) -> Result<Vec<Arc<dyn TreeNode>>> {
        self.on_get_children(element).await
    }

    async fn get_tree_item(&self, element: &Arc<dyn TreeNode>) -> Result<TreeItem> {
        element.get_tree_item().await
    }
}

impl Drop for TreeDataProvider {
    fn drop(&mut self) {
        self.fan_in.abort();
    }
}

/// Merge the three change sources into one re-render trigger. Cached
/// wrappers hold node references a backend may have invalidated out of
/// band, so every signal clears the whole cache before notifying.
fn spawn_fan_in(
    cache: Arc<ItemCache>,
    changes: broadcast::Sender<()>,
    mut branch_changes: broadcast::Receiver<()>,
    mut resource_changes: broadcast::Receiver<()>,
    mut refresh: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut branch_open = true;
        let mut resource_open = true;
        let mut refresh_open = true;

        while branch_open || resource_open || refresh_open {
            // A lagged receiver still means "something changed"; only a
            // closed source drops out of the merge.
            let source = tokio::select! {
                received = branch_changes.recv(), if branch_open => match received {
                    Ok(()) | Err(RecvError::Lagged(_)) => "branch-data",
                    Err(RecvError::Closed) => {
                        branch_open = false;
                        continue;
                    }
                },
                received = resource_changes.recv(), if resource_open => match received {
                    Ok(()) | Err(RecvError::Lagged(_)) => "resource-providers",
                    Err(RecvError::Closed) => {
                        resource_open = false;
                        continue;
                    }
                },
                received = refresh.recv(), if refresh_open => match received {
                    Ok(()) | Err(RecvError::Lagged(_)) => "refresh",
                    Err(RecvError::Closed) => {
                        refresh_open = false;
                        continue;
                    }
                },
            };

            tracing::debug!(source, "tree change signal");
            cache.clear();
            let _ = changes.send(());
        }
    })
}
