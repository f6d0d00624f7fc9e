//! Generation-scoped identity table between backend models and their
//! wrappers.
//!
//! This is not an LRU cache: there is no eviction beyond [`ItemCache::clear`],
//! which drops every entry at once and bumps the generation counter. The
//! table exists so that a given backend node has at most one live wrapper per
//! generation, so "refresh this node" and reverse lookups from native-node
//! checks can find the wrapper that the host tree currently displays.

use crate::branch::TreeNode;
use crate::types::ResourceModel;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

/// Identity key derived from an `Arc` allocation. Fat pointers are thinned
/// so the vtable half does not participate in identity.
pub(crate) fn model_key(model: &Arc<dyn ResourceModel>) -> usize {
    Arc::as_ptr(model) as *const () as usize
}

pub(crate) fn item_key(item: &Arc<dyn TreeNode>) -> usize {
    Arc::as_ptr(item) as *const () as usize
}

#[derive(Default)]
struct CacheState {
    generation: u64,
    /// model identity -> wrapper
    forward: HashMap<usize, Arc<dyn TreeNode>>,
    /// wrapper identity -> model (back-reference only; the wrapper itself
    /// is owned by the forward map and by whoever holds it in the host tree)
    backward: HashMap<usize, Arc<dyn ResourceModel>>,
}

/// Process-wide identity table shared by every wrapper of one tree.
///
/// Write discipline: overwrite-on-register per node, wholesale clear on
/// refresh. Overwriting is idempotent, which is what makes uncoordinated
/// concurrent expansions safe without locks beyond the interior `RwLock`.
pub struct ItemCache {
    inner: RwLock<CacheState>,
}

impl ItemCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheState::default()),
        }
    }

    /// Register a model/wrapper pair, replacing any prior registration for
    /// the same model. Wrapper construction always funnels through here via
    /// the factory; bypassing it silently breaks identity lookups.
    pub fn add_item(&self, model: &Arc<dyn ResourceModel>, item: &Arc<dyn TreeNode>) {
        let mut state = self.inner.write().unwrap();
        if let Some(previous) = state.forward.insert(model_key(model), item.clone()) {
            state.backward.remove(&item_key(&previous));
        }
        state.backward.insert(item_key(item), model.clone());
    }

    /// The wrapper most recently registered for `model` in the current
    /// generation.
    pub fn item_for(&self, model: &Arc<dyn ResourceModel>) -> Option<Arc<dyn TreeNode>> {
        self.inner.read().unwrap().forward.get(&model_key(model)).cloned()
    }

    /// Reverse lookup: the model a live wrapper was produced from.
    pub fn model_for(&self, item: &Arc<dyn TreeNode>) -> Option<Arc<dyn ResourceModel>> {
        self.inner.read().unwrap().backward.get(&item_key(item)).cloned()
    }

    /// Drop every entry and start a new generation. Wrappers handed out
    /// before the clear may still be referenced elsewhere but are no longer
    /// part of the live tree.
    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap();
        state.generation += 1;
        state.forward.clear();
        state.backward.clear();
        tracing::debug!(generation = state.generation, "item cache cleared");
    }

    /// Current cache generation. Bumped on every [`ItemCache::clear`].
    pub fn generation(&self) -> u64 {
        self.inner.read().unwrap().generation
    }

    /// Whether a wrapper was registered in the current generation. Stale
    /// wrappers from before a refresh report `false` here rather than being
    /// silently reused.
    pub fn is_current(&self, item: &dyn TreeNode) -> bool {
        item.cache_generation() == self.generation()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().forward.is_empty()
    }
}

impl Default for ItemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreeItem;
    use crate::Result;
    use async_trait::async_trait;
    use std::any::Any;

    struct StubModel;

    impl ResourceModel for StubModel {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct StubNode {
        model: Arc<dyn ResourceModel>,
        generation: u64,
    }

    #[async_trait]
    impl TreeNode for StubNode {
        async fn get_children(&self) -> Result<Vec<Arc<dyn TreeNode>>> {
            Ok(Vec::new())
        }

        async fn get_tree_item(&self) -> Result<TreeItem> {
            Ok(TreeItem::new("stub"))
        }

        fn model(&self) -> &Arc<dyn ResourceModel> {
            &self.model
        }

        fn cache_generation(&self) -> u64 {
            self.generation
        }
    }

    fn stub_pair(cache: &ItemCache) -> (Arc<dyn ResourceModel>, Arc<dyn TreeNode>) {
        let model: Arc<dyn ResourceModel> = Arc::new(StubModel);
        let item: Arc<dyn TreeNode> = Arc::new(StubNode {
            model: model.clone(),
            generation: cache.generation(),
        });
        (model, item)
    }

    #[test]
    fn overwrite_on_register_keeps_latest_wrapper() {
        let cache = ItemCache::new();
        let (model, first) = stub_pair(&cache);
        let second: Arc<dyn TreeNode> = Arc::new(StubNode {
            model: model.clone(),
            generation: cache.generation(),
        });

        cache.add_item(&model, &first);
        cache.add_item(&model, &second);

        let live = cache.item_for(&model).unwrap();
        assert!(Arc::ptr_eq(&live, &second));
        assert!(cache.model_for(&second).is_some());
        // The displaced wrapper is no longer reverse-resolvable.
        assert!(cache.model_for(&first).is_none());
    }

    #[test]
    fn clear_drops_all_entries_and_bumps_generation() {
        let cache = ItemCache::new();
        let (model, item) = stub_pair(&cache);
        cache.add_item(&model, &item);
        assert_eq!(cache.len(), 1);
        assert!(cache.is_current(item.as_ref()));

        let before = cache.generation();
        cache.clear();

        assert!(cache.item_for(&model).is_none());
        assert!(cache.model_for(&item).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), before + 1);
        assert!(!cache.is_current(item.as_ref()));
    }

    #[test]
    fn back_reference_resolves_registered_model() {
        let cache = ItemCache::new();
        let (model, item) = stub_pair(&cache);
        cache.add_item(&model, &item);

        let resolved = cache.model_for(&item).unwrap();
        assert!(Arc::ptr_eq(&resolved, &model));
    }
}
