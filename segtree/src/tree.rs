use std::{
    ops::{Bound, RangeBounds},
    time::Instant,
};

use tracing::{debug, trace};

use crate::{Operation, SegtreeError, Stats, Value, MAX_SIZE};

/// Array-backed segment tree over a sequence of `len()` elements.
///
/// Nodes use implicit 1-based indexing: the root is `1` and node `i` has
/// children `2i` and `2i + 1`. Buffers hold `2 * capacity` slots, where
/// `capacity` is the smallest power of two `>= len()`.
#[derive(Debug, Clone)]
pub struct SegmentTree<T> {
    /// The number of elements.
    pub(crate) size: usize,
    pub(crate) capacity: usize,
    /// Aggregate per node.
    pub(crate) tree: Vec<T>,
    /// Pending range updates, only present for lazy trees.
    /// A tag on node `i` has not been applied to `tree[i]` yet.
    pub(crate) lazy: Option<Vec<Option<T>>>,
    pub(crate) op: Operation<T>,
    pub(crate) stats: Stats,
}

/// Freshly built buffers, not yet owned by a tree.
struct Buffers<T> {
    capacity: usize,
    tree: Vec<T>,
    lazy: Option<Vec<Option<T>>>,
}

impl<T: Value> Buffers<T> {
    fn build(values: &[T], op: &Operation<T>, lazy: bool) -> Result<Self, SegtreeError> {
        let n = values.len();
        if n == 0 || n > MAX_SIZE {
            debug!(len = n, max = MAX_SIZE, "rejected sequence length");
            return Err(SegtreeError::InvalidRange);
        }
        let capacity = n.next_power_of_two();
        let mut tree = alloc(2 * capacity, op.identity())?;
        let lazy = if lazy {
            Some(alloc(2 * capacity, None)?)
        } else {
            None
        };
        build(&mut tree, op, values, 1, 0, n - 1);
        Ok(Self {
            capacity,
            tree,
            lazy,
        })
    }
}

fn alloc<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, SegtreeError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, fill);
    Ok(buf)
}

/// Fill the subtree of `node`, which covers `values[start..=end]`.
fn build<T: Value>(
    tree: &mut [T],
    op: &Operation<T>,
    values: &[T],
    node: usize,
    start: usize,
    end: usize,
) {
    if start == end {
        tree[node] = values[start];
        return;
    }
    let mid = (start + end) / 2;
    build(tree, op, values, 2 * node, start, mid);
    build(tree, op, values, 2 * node + 1, mid + 1, end);
    tree[node] = op.combine(tree[2 * node], tree[2 * node + 1]);
}

impl<T: Value> SegmentTree<T> {
    /// Build a tree without lazy propagation.
    ///
    /// Fails with `InvalidRange` when `values` is empty or longer than
    /// [`MAX_SIZE`], and with `MemoryAllocation` when the buffer cannot be
    /// allocated.
    pub fn new(values: &[T], op: Operation<T>) -> Result<Self, SegtreeError> {
        Self::from_buffers(values, op, false)
    }

    /// Build a tree for a caller supplied associative `combine` with neutral
    /// element `identity`.
    pub fn with_custom(
        values: &[T],
        combine: fn(T, T) -> T,
        identity: T,
    ) -> Result<Self, SegtreeError> {
        Self::new(values, Operation::Custom { combine, identity })
    }

    /// Build a tree that also supports [`update_range`](Self::update_range).
    ///
    /// Custom operations have no range-update rule and are rejected with
    /// `InvalidOperation`.
    pub fn new_lazy(values: &[T], op: Operation<T>) -> Result<Self, SegtreeError> {
        if op.range_rule().is_none() {
            debug!(op = %op, "lazy propagation requested for an operation without a range rule");
            return Err(SegtreeError::InvalidOperation);
        }
        Self::from_buffers(values, op, true)
    }

    fn from_buffers(values: &[T], op: Operation<T>, lazy: bool) -> Result<Self, SegtreeError> {
        let Buffers {
            capacity,
            tree,
            lazy,
        } = Buffers::build(values, &op, lazy)?;
        debug!(size = values.len(), capacity, op = %op, lazy = lazy.is_some(), "built segment tree");
        Ok(Self {
            size: values.len(),
            capacity,
            tree,
            lazy,
            op,
            stats: Stats::default(),
        })
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: a tree holds at least one element.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn operation(&self) -> &Operation<T> {
        &self.op
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy.is_some()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Resolve `range` to inclusive `[left, right]` with `left <= right < len()`.
    pub(crate) fn bounds(
        &self,
        range: impl RangeBounds<usize>,
    ) -> Result<(usize, usize), SegtreeError> {
        let left = match range.start_bound() {
            Bound::Included(&l) => Some(l),
            Bound::Excluded(&l) => l.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let right = match range.end_bound() {
            Bound::Included(&r) => Some(r),
            Bound::Excluded(&r) => r.checked_sub(1),
            Bound::Unbounded => Some(self.size - 1),
        };
        match (left, right) {
            (Some(l), Some(r)) if l <= r && r < self.size => Ok((l, r)),
            _ => {
                debug!(?left, ?right, size = self.size, "rejected range");
                Err(SegtreeError::InvalidRange)
            }
        }
    }

    /// Aggregate of the elements in `range`.
    ///
    /// Takes `&mut self` because pending tags are pushed down on the way.
    pub fn query(&mut self, range: impl RangeBounds<usize>) -> Result<T, SegtreeError> {
        let (left, right) = self.bounds(range)?;
        let start = Instant::now();
        let result = self.query_rec(1, 0, self.size - 1, left, right);
        self.stats.record_query(start.elapsed());
        trace!(left, right, %result, "query");
        Ok(result)
    }

    fn query_rec(&mut self, node: usize, start: usize, end: usize, l: usize, r: usize) -> T {
        self.propagate(node, start, end);
        if r < start || end < l {
            return self.op.identity();
        }
        if l <= start && end <= r {
            return self.tree[node];
        }
        let mid = (start + end) / 2;
        let left = self.query_rec(2 * node, start, mid, l, r);
        let right = self.query_rec(2 * node + 1, mid + 1, end, l, r);
        self.op.combine(left, right)
    }

    /// Overwrite the element at `index`.
    pub fn update_point(&mut self, index: usize, value: T) -> Result<(), SegtreeError> {
        if index >= self.size {
            debug!(index, size = self.size, "rejected point update");
            return Err(SegtreeError::InvalidRange);
        }
        let start = Instant::now();
        self.update_point_rec(1, 0, self.size - 1, index, value);
        self.stats.record_update(start.elapsed());
        trace!(index, %value, "update_point");
        Ok(())
    }

    fn update_point_rec(&mut self, node: usize, start: usize, end: usize, index: usize, value: T) {
        // Clears a pending tag on the leaf, so it is not applied over `value` later.
        self.propagate(node, start, end);
        if start == end {
            self.tree[node] = value;
            return;
        }
        let mid = (start + end) / 2;
        if index <= mid {
            self.update_point_rec(2 * node, start, mid, index, value);
        } else {
            self.update_point_rec(2 * node + 1, mid + 1, end, index, value);
        }
        self.pull(node, start, end);
    }

    /// Replace the whole sequence, keeping the operation and lazy mode.
    ///
    /// The new buffers are built before the old ones are dropped, so on error
    /// the tree is unchanged.
    pub fn rebuild(&mut self, values: &[T]) -> Result<(), SegtreeError> {
        let Buffers {
            capacity,
            tree,
            lazy,
        } = Buffers::build(values, &self.op, self.is_lazy())?;
        debug!(
            old_size = self.size,
            size = values.len(),
            old_capacity = self.capacity,
            capacity,
            "rebuilt segment tree"
        );
        self.size = values.len();
        self.capacity = capacity;
        self.tree = tree;
        self.lazy = lazy;
        Ok(())
    }
}
