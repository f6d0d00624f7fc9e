use thiserror::Error;

/// Unified error type for the resource tree runtime.
///
/// `BackNavigation` and `Cancelled` are control signals raised by the picker
/// UI rather than true failures; callers are expected to probe for them with
/// [`Error::is_back_navigation`] / [`Error::is_cancelled`] instead of
/// treating them as terminal. Everything else terminates the current
/// traversal or prompt chain and is reported to the invoking layer unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A picker step found zero eligible and zero descendable children.
    #[error("no resource matching the current filter was found")]
    NoMatch,

    /// The user dismissed a prompt.
    #[error("the prompt was cancelled")]
    Cancelled,

    /// The user asked to return to the previous prompt.
    #[error("back navigation was requested")]
    BackNavigation,

    /// No branch data provider (and no default) is registered for a
    /// discovered resource type.
    #[error("no branch data provider is registered for resource type '{0}'")]
    NoProvider(String),

    /// Opaque backend failure. Never retried, never interpreted.
    #[error("provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

impl Error {
    /// Construct an opaque provider error from a message.
    pub fn provider(message: impl Into<String>) -> Self {
        Error::Provider(anyhow::anyhow!(message.into()))
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    pub fn is_back_navigation(&self) -> bool {
        matches!(self, Error::BackNavigation)
    }
}
