//! Core type definitions: resources, workspace handles, display
//! projections, and the opaque backend model contracts.

pub mod item;
pub mod model;
pub mod resource;

pub use item::{QuickPickOptions, TreeItem};
pub use model::{LegacyTreeItem, ResourceModel};
pub use resource::{Resource, StaticWorkspace, Workspace, WorkspaceFolder};
