//! Lazy propagation.
//!
//! A tag on a node is a range update that has been accepted for the node's
//! whole subtree but not yet applied to the node's own aggregate. Every walk
//! resolves the tag of each node it visits before reading or descending, so
//! a value read from `tree[]` always reflects all updates above it.

use std::{ops::RangeBounds, time::Instant};

use tracing::{debug, trace};

use crate::{RangeRule, SegmentTree, SegtreeError, Value};

impl<T: Value> SegmentTree<T> {
    /// Apply `value` to every element in `range`.
    ///
    /// SUM trees add `value` to each element; MIN and MAX trees overwrite each
    /// element with `value`. Fails with `InvalidOperation` on trees built
    /// without lazy propagation, before the range is looked at.
    pub fn update_range(
        &mut self,
        range: impl RangeBounds<usize>,
        value: T,
    ) -> Result<(), SegtreeError> {
        let Some(rule) = self.lazy.as_ref().and(self.op.range_rule()) else {
            debug!(op = %self.op, "range update on a tree without lazy propagation");
            return Err(SegtreeError::InvalidOperation);
        };
        let (left, right) = self.bounds(range)?;
        let start = Instant::now();
        self.update_range_rec(rule, 1, 0, self.size - 1, left, right, value);
        self.stats.record_update(start.elapsed());
        trace!(left, right, %value, "update_range");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn update_range_rec(
        &mut self,
        rule: RangeRule,
        node: usize,
        start: usize,
        end: usize,
        l: usize,
        r: usize,
        value: T,
    ) {
        self.propagate(node, start, end);
        if r < start || end < l {
            return;
        }
        if l <= start && end <= r {
            if let Some(lazy) = self.lazy.as_mut() {
                lazy[node] = Some(rule.compose(lazy[node], value));
            }
            // Resolve right away: the aggregate is updated and the tag moves
            // to the children, where it stays until they are visited.
            self.propagate(node, start, end);
            return;
        }
        let mid = (start + end) / 2;
        self.update_range_rec(rule, 2 * node, start, mid, l, r, value);
        self.update_range_rec(rule, 2 * node + 1, mid + 1, end, l, r, value);
        self.pull(node, start, end);
    }

    /// Resolve the pending tag of `node`, which covers `[start, end]`.
    ///
    /// No-op for trees without lazy propagation.
    pub(crate) fn propagate(&mut self, node: usize, start: usize, end: usize) {
        let (Some(lazy), Some(rule)) = (self.lazy.as_mut(), self.op.range_rule()) else {
            return;
        };
        let Some(tag) = lazy[node].take() else {
            return;
        };
        self.tree[node] = rule.apply(self.tree[node], tag, end - start + 1);
        if start != end {
            for child in [2 * node, 2 * node + 1] {
                lazy[child] = Some(rule.compose(lazy[child], tag));
            }
        }
    }

    /// Recompute `node` from its children, resolving their tags first.
    pub(crate) fn pull(&mut self, node: usize, start: usize, end: usize) {
        let mid = (start + end) / 2;
        self.propagate(2 * node, start, mid);
        self.propagate(2 * node + 1, mid + 1, end);
        self.tree[node] = self.op.combine(self.tree[2 * node], self.tree[2 * node + 1]);
    }
}
