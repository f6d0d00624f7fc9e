//! Interactive multi-step resource picking.
//!
//! A [`QuickPickStep`] walks the same wrapper graph the host tree renders,
//! shortlists children by [`ContextValueFilter`], and records confirmed
//! picks on the [`QuickPickContext`]'s selection path. The [`Wizard`] runs
//! steps in order and steps back on the back-navigation signal.

pub mod filter;
pub mod step;
pub mod ui;
pub mod wizard;

pub use filter::ContextValueFilter;
pub use step::{QuickPickContext, QuickPickStep};
pub use ui::{PromptOptions, QuickPickItem, QuickPickUi};
pub use wizard::Wizard;
