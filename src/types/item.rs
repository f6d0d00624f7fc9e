//! Display projection and quick-pick metadata.

use serde::{Deserialize, Serialize};

/// Display projection of a tree node.
///
/// Both the branch-provider surface and the host tree-view surface speak
/// this shape. Only `label` is mandatory; optional fields that a provider
/// leaves unset fall through to caller-supplied defaults when the wrapper
/// merges projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leaf: Option<bool>,
}

impl TreeItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_context_value(mut self, context_value: impl Into<String>) -> Self {
        self.context_value = Some(context_value.into());
        self
    }

    pub fn with_is_leaf(mut self, is_leaf: bool) -> Self {
        self.is_leaf = Some(is_leaf);
        self
    }
}

/// Quick-pick metadata a backend model may carry.
///
/// `is_leaf: false` marks a container node the picker offers for descent
/// even when the node itself does not match the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickPickOptions {
    pub is_leaf: bool,
}

impl QuickPickOptions {
    pub fn leaf() -> Self {
        Self { is_leaf: true }
    }

    pub fn container() -> Self {
        Self { is_leaf: false }
    }
}
