//! Minimal wizard driver for sequences of quick-pick steps.

use crate::picker::step::{QuickPickContext, QuickPickStep};
use crate::{Error, Result};

/// Runs steps in order over one shared context.
///
/// A step raising the back-navigation signal has already popped its pick
/// off the selection path; the wizard only moves the cursor back one step
/// and re-prompts. Back navigation at the first step cancels the run.
/// Every other error aborts immediately.
pub struct Wizard {
    steps: Vec<QuickPickStep>,
}

impl Wizard {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step(mut self, step: QuickPickStep) -> Self {
        self.steps.push(step);
        self
    }

    /// The same step repeated `depth` times; valid because steps support
    /// duplicates — behavior depends only on the path tail.
    pub fn repeated(step: QuickPickStep, depth: usize) -> Self {
        Self {
            steps: vec![step; depth],
        }
    }

    pub fn push(&mut self, step: QuickPickStep) {
        self.steps.push(step);
    }

    pub async fn run(&self, context: &mut QuickPickContext) -> Result<()> {
        let mut index = 0;
        while index < self.steps.len() {
            match self.steps[index].prompt(context).await {
                Ok(_) => index += 1,
                Err(err) if err.is_back_navigation() => {
                    if index == 0 {
                        return Err(Error::Cancelled);
                    }
                    index -= 1;
                    tracing::debug!(step = index, "navigating back");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
