//! # restree
//!
//! Virtual resource tree runtime: lets a host IDE browse a lazily-loaded
//! tree of heterogeneous backend resources, and lets wizard-driven commands
//! prompt a user to navigate that same tree through filtered quick-picks.
//!
//! ## Overview
//!
//! Backends plug in per resource type through two capabilities: a
//! [`WorkspaceResourceProvider`] that discovers top-level resources and a
//! [`BranchDataProvider`] that renders each resource's subtree. The runtime
//! wraps every backend node behind the uniform [`TreeNode`] interface —
//! including nodes from the previous provider generation, which are routed
//! through a compatibility shim at wrap time — and keeps a
//! generation-scoped identity table ([`ItemCache`]) so each backend node
//! has exactly one live wrapper per render generation.
//!
//! ## Core Philosophy
//!
//! - **Uniform wrapping**: callers never see which provider generation
//!   produced a node; the wrap-time factory dispatches once, not per call
//! - **Lazy everything**: children are re-fetched on every expansion; the
//!   only cache is identity registration
//! - **Conservative invalidation**: any change signal from any source
//!   clears the whole cache and re-renders from the root
//! - **Errors pass through**: backend failures are propagated verbatim,
//!   never retried, never swallowed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restree::{
//!     BranchDataProviderManager, ContextValueFilter, ItemCache, QuickPickContext,
//!     QuickPickStep, ResourceProviderManager, StaticWorkspace, TreeDataProvider, Wizard,
//! };
//! use std::sync::Arc;
//! use tokio::sync::broadcast;
//!
//! #[tokio::main]
//! async fn main() -> restree::Result<()> {
//!     let branch_providers = BranchDataProviderManager::new();
//!     let resource_providers = ResourceProviderManager::new();
//!     // resource_providers.register("functionApp", my_discovery_provider);
//!     // branch_providers.register("functionApp", my_branch_provider);
//!
//!     let (refresh, _) = broadcast::channel(16);
//!     let tree = Arc::new(TreeDataProvider::new(
//!         Arc::new(ItemCache::new()),
//!         branch_providers,
//!         resource_providers,
//!         Arc::new(StaticWorkspace::single("app", "/work/app")),
//!         &refresh,
//!     ));
//!
//!     // Walk two levels deep looking for a function app.
//!     let step = QuickPickStep::new(tree.clone(), ContextValueFilter::include("functionApp"));
//!     let wizard = Wizard::repeated(step, 2);
//!     let mut context = QuickPickContext::new(todo!("host quick-pick UI"));
//!     wizard.run(&mut context).await?;
//!
//!     println!("picked: {:?}", context.final_pick().is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Resources, workspace handles, display projections, model contracts |
//! | [`cache`] | Generation-scoped model/wrapper identity table |
//! | [`branch`] | Branch provider contract, node wrappers, compatibility shims |
//! | [`registry`] | Provider registration surface with disposal guards |
//! | [`tree`] | Host-facing tree data provider and change fan-in |
//! | [`picker`] | Context-value filter, quick-pick step, wizard driver |

pub mod branch;
pub mod cache;
pub mod picker;
pub mod registry;
pub mod tree;
pub mod types;

// Re-export main types for convenience
pub use branch::{
    compat_provider_pair, unwrap_model, BranchDataProvider, BranchItem, BranchItemFactory,
    BranchItemOptions, CompatBranchDataProvider, CompatBranchItem,
    CompatWorkspaceResourceProvider, LegacyWorkspaceResourceProvider, TreeNode,
};
pub use cache::ItemCache;
pub use picker::{
    ContextValueFilter, PromptOptions, QuickPickContext, QuickPickItem, QuickPickStep,
    QuickPickUi, Wizard,
};
pub use registry::{
    has_legacy_workspace_provider, register_legacy_workspace_provider, BranchDataProviderManager,
    Registration, ResourceProviderManager, WorkspaceResourceProvider,
};
pub use tree::{TreeDataProvider, TreeDataSource, WorkspaceState};
pub use types::{
    LegacyTreeItem, QuickPickOptions, Resource, ResourceModel, StaticWorkspace, TreeItem,
    Workspace, WorkspaceFolder,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
