//! Opaque backend node contracts.
//!
//! A [`ResourceModel`] is whatever a branch data provider hands back: the
//! runtime never looks inside it beyond the accessors below. Identity is
//! `Arc` pointer identity, so a backend that wants stable identity across
//! enumerations must return the same allocation for the same logical node.

use crate::types::{QuickPickOptions, Resource};
use crate::Result;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// The opaque unit a branch data provider returns.
pub trait ResourceModel: Send + Sync + 'static {
    /// Access for typed unwrapping; implementors return `self`.
    fn as_any(&self) -> &dyn Any;

    /// The top-level resource this node stands for, if any.
    fn resource(&self) -> Option<Resource> {
        None
    }

    /// Quick-pick metadata passthrough.
    fn quick_pick_options(&self) -> Option<QuickPickOptions> {
        None
    }

    /// Shape probe for the previous provider generation. The wrap-time
    /// factory calls this exactly once per node to decide between the
    /// native wrapper and the compatibility wrapper.
    fn as_legacy(&self) -> Option<&dyn LegacyTreeItem> {
        None
    }
}

/// Node contract of the previous provider generation.
///
/// Legacy nodes load their own children and expose display fields directly
/// instead of going through a branch data provider. The compatibility
/// wrapper translates these calls into the uniform [`TreeNode`] contract.
///
/// [`TreeNode`]: crate::branch::TreeNode
#[async_trait]
pub trait LegacyTreeItem: Send + Sync {
    fn label(&self) -> String;

    fn description(&self) -> Option<String> {
        None
    }

    fn context_value(&self) -> String;

    /// Whether the node can be expanded. Maps onto `is_leaf == !collapsible`
    /// on the new surface.
    fn collapsible(&self) -> bool;

    async fn load_children(&self) -> Result<Vec<Arc<dyn ResourceModel>>>;
}
