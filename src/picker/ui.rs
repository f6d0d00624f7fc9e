//! Picker UI protocol consumed by the wizard steps.

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One row of a quick-pick prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickPickItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub place_holder: Option<String>,
}

impl PromptOptions {
    pub fn with_place_holder(place_holder: impl Into<String>) -> Self {
        Self {
            place_holder: Some(place_holder.into()),
        }
    }
}

/// Host prompt surface.
///
/// Returns the index of the confirmed item. Dismissal surfaces as
/// [`Error::Cancelled`], the back button as [`Error::BackNavigation`]; the
/// wizard machinery tells the two apart, the step itself does not.
///
/// [`Error::Cancelled`]: crate::Error::Cancelled
/// [`Error::BackNavigation`]: crate::Error::BackNavigation
#[async_trait]
pub trait QuickPickUi: Send + Sync {
    async fn show_quick_pick(
        &self,
        items: Vec<QuickPickItem>,
        options: &PromptOptions,
    ) -> Result<usize>;
}
