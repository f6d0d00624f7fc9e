//! Branch providers and the uniform node wrapping layer.
//!
//! A [`BranchDataProvider`] is the capability a backend implements for one
//! resource type: enumerate children, project a node for display, resolve a
//! top-level resource into its root node. Everything above the provider
//! speaks [`TreeNode`], the uniform wrapper interface, regardless of which
//! provider generation produced a given node.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BranchDataProvider`] | Backend capability contract |
//! | [`TreeNode`] | Polymorphic wrapper interface |
//! | [`BranchItem`] | Native wrapper |
//! | [`CompatBranchItem`] | Compatibility wrapper for legacy-shaped nodes |
//! | [`BranchItemFactory`] | Wrap-time dispatch between the two variants |
//! | [`CompatBranchDataProvider`] | Legacy provider adapted to the contract |

pub mod compat;
pub mod item;
pub mod provider;

pub use compat::{
    compat_provider_pair, CompatBranchDataProvider, CompatBranchItem,
    CompatWorkspaceResourceProvider, LegacyWorkspaceResourceProvider,
};
pub use item::{unwrap_model, BranchItem, BranchItemFactory, BranchItemOptions, TreeNode};
pub use provider::BranchDataProvider;
