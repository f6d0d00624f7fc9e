//! Structural-tag predicate for shortlisting pick candidates.

use serde::{Deserialize, Serialize};

/// Predicate over a node's context value.
///
/// A context value is a `;`-separated tag list. The filter matches when at
/// least one `include` tag is present (an empty `include` list matches any
/// tagged node) and no `exclude` tag is. Stateless and reusable across
/// steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextValueFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ContextValueFilter {
    pub fn include(tag: impl Into<String>) -> Self {
        Self {
            include: vec![tag.into()],
            exclude: Vec::new(),
        }
    }

    pub fn and_include(mut self, tag: impl Into<String>) -> Self {
        self.include.push(tag.into());
        self
    }

    pub fn and_exclude(mut self, tag: impl Into<String>) -> Self {
        self.exclude.push(tag.into());
        self
    }

    /// Evaluate against a display-projected context value. Untagged nodes
    /// never match.
    pub fn matches(&self, context_value: Option<&str>) -> bool {
        let Some(context_value) = context_value else {
            return false;
        };
        let tags: Vec<&str> = context_value
            .split(';')
            .filter(|tag| !tag.is_empty())
            .collect();

        let included = self.include.is_empty()
            || self.include.iter().any(|tag| tags.contains(&tag.as_str()));
        let excluded = self.exclude.iter().any(|tag| tags.contains(&tag.as_str()));

        included && !excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_included_tag() {
        let filter = ContextValueFilter::include("functionApp").and_include("webApp");
        assert!(filter.matches(Some("webApp;remote")));
        assert!(filter.matches(Some("functionApp")));
        assert!(!filter.matches(Some("storageAccount")));
    }

    #[test]
    fn excluded_tag_wins_over_included() {
        let filter = ContextValueFilter::include("webApp").and_exclude("readonly");
        assert!(filter.matches(Some("webApp")));
        assert!(!filter.matches(Some("webApp;readonly")));
    }

    #[test]
    fn untagged_nodes_never_match() {
        let filter = ContextValueFilter::default();
        assert!(!filter.matches(None));
        assert!(filter.matches(Some("anything")));
    }

    #[test]
    fn empty_tags_are_ignored() {
        let filter = ContextValueFilter::include("webApp");
        assert!(filter.matches(Some(";webApp;")));
        assert!(!filter.matches(Some(";;")));
    }
}
