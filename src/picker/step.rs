//! Generic tree-walking wizard step.

use crate::branch::TreeNode;
use crate::picker::filter::ContextValueFilter;
use crate::picker::ui::{PromptOptions, QuickPickItem, QuickPickUi};
use crate::tree::TreeDataSource;
use crate::{Error, Result};
use std::sync::Arc;

/// Traversal context shared by every step of one picking session.
///
/// `picked_nodes` is the selection path: one entry per completed prompt,
/// the last entry being the parent scope for the next prompt's child
/// enumeration. Steps append on confirmation and pop exactly once on back
/// navigation; nothing else mutates it.
pub struct QuickPickContext {
    pub picked_nodes: Vec<Arc<dyn TreeNode>>,
    ui: Arc<dyn QuickPickUi>,
}

impl QuickPickContext {
    pub fn new(ui: Arc<dyn QuickPickUi>) -> Self {
        Self {
            picked_nodes: Vec::new(),
            ui,
        }
    }

    pub fn ui(&self) -> &Arc<dyn QuickPickUi> {
        &self.ui
    }

    /// The most recently confirmed node.
    pub fn final_pick(&self) -> Option<&Arc<dyn TreeNode>> {
        self.picked_nodes.last()
    }
}

/// One prompt of a tree walk: enumerate the children of the current path
/// tail, shortlist them, prompt, and record the confirmed node.
///
/// The step's behavior depends only on the path tail, so the same step
/// value can recur at multiple depths of a wizard
/// ([`QuickPickStep::supports_duplicate_steps`]).
#[derive(Clone)]
pub struct QuickPickStep {
    tree: Arc<dyn TreeDataSource>,
    filter: ContextValueFilter,
    options: PromptOptions,
}

impl QuickPickStep {
    pub fn new(tree: Arc<dyn TreeDataSource>, filter: ContextValueFilter) -> Self {
        Self {
            tree,
            filter,
            options: PromptOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn supports_duplicate_steps(&self) -> bool {
        true
    }

    /// Run the prompt. On the back-navigation signal the most recent entry
    /// is popped off the selection path — preserving provenance for the
    /// one-level-shallower prompt — and the signal is re-raised for the
    /// outer wizard to act on.
    pub async fn prompt(&self, context: &mut QuickPickContext) -> Result<Arc<dyn TreeNode>> {
        match self.prompt_internal(context).await {
            Err(err) => {
                if err.is_back_navigation() {
                    context.picked_nodes.pop();
                }
                Err(err)
            }
            picked => picked,
        }
    }

    async fn prompt_internal(&self, context: &mut QuickPickContext) -> Result<Arc<dyn TreeNode>> {
        let picks = self.get_picks(context).await?;
        let items = picks.iter().map(|(item, _)| item.clone()).collect();

        let index = context.ui().show_quick_pick(items, &self.options).await?;
        let (_, node) = picks
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::provider("quick pick returned an out-of-range index"))?;

        context.picked_nodes.push(node.clone());
        Ok(node)
    }

    /// Candidate policy: children matching the filter win outright; failing
    /// that, container nodes are offered so the user can descend; failing
    /// both, the walk hit a dead end.
    async fn get_picks(
        &self,
        context: &QuickPickContext,
    ) -> Result<Vec<(QuickPickItem, Arc<dyn TreeNode>)>> {
        let parent = context.picked_nodes.last();
        let children = self.tree.get_children(parent).await?;

        let mut projected = Vec::with_capacity(children.len());
        for child in children {
            let item = self.tree.get_tree_item(&child).await?;
            let matches = self.filter.matches(item.context_value.as_deref());
            let descendable = child
                .quick_pick_options()
                .is_some_and(|options| !options.is_leaf);
            projected.push((child, item, matches, descendable));
        }

        let matching: Vec<_> = projected.iter().filter(|entry| entry.2).collect();
        let choices = if matching.is_empty() {
            let descendable: Vec<_> = projected.iter().filter(|entry| entry.3).collect();
            if descendable.is_empty() {
                return Err(Error::NoMatch);
            }
            descendable
        } else {
            matching
        };

        Ok(choices
            .into_iter()
            .map(|(node, item, _, _)| {
                (
                    QuickPickItem {
                        label: item.label.clone(),
                        description: item.description.clone(),
                    },
                    node.clone(),
                )
            })
            .collect())
    }
}
