//! Per-frame coalescing of targets: the newest target for a key wins.

use std::collections::BTreeMap;

use super::tween::TweenTarget;

/// Targets waiting for the next animation frame.
///
/// Keys name an element/channel pair; pushing a second target for the
/// same key before `flush` replaces the first, so stale positions are
/// superseded instead of queued.
#[derive(Debug, Clone)]
pub struct FrameBatch<K: Ord + Copy> {
    pending: BTreeMap<K, TweenTarget>,
}

impl<K: Ord + Copy> Default for FrameBatch<K> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> FrameBatch<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `target` for `key`. Returns true when the batch was empty,
    /// i.e. when the caller needs to request a frame.
    pub fn push(&mut self, key: K, target: TweenTarget) -> bool {
        let was_empty = self.pending.is_empty();
        self.pending.insert(key, target);
        was_empty
    }

    pub fn pending(&self, key: K) -> Option<&TweenTarget> {
        self.pending.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending target, in key order.
    pub fn flush(&mut self) -> Vec<(K, TweenTarget)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Drop everything pending (teardown).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
