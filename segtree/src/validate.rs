use crate::{SegmentTree, Value, MAX_SIZE};

impl<T: Value> SegmentTree<T> {
    /// Check the tree's internal consistency. Meant for tests and debugging.
    ///
    /// Verifies the buffer geometry, that every internal aggregate equals the
    /// combination of its children (with their pending tags applied), and
    /// that the identity is neutral for every element. Never mutates.
    pub fn validate(&self) -> bool {
        let slots = 2 * self.capacity;
        if self.size == 0
            || self.size > MAX_SIZE
            || !self.capacity.is_power_of_two()
            || self.capacity < self.size
            || self.tree.len() != slots
        {
            return false;
        }
        if let Some(lazy) = &self.lazy {
            if lazy.len() != slots || self.op.range_rule().is_none() {
                return false;
            }
        }
        self.validate_rec(1, 0, self.size - 1)
    }

    fn validate_rec(&self, node: usize, start: usize, end: usize) -> bool {
        if node >= self.tree.len() {
            return false;
        }
        if start == end {
            let x = self.resolved(node, start, end);
            let id = self.op.identity();
            return self.op.combine(id, x) == x && self.op.combine(x, id) == x;
        }
        let mid = (start + end) / 2;
        self.validate_rec(2 * node, start, mid)
            && self.validate_rec(2 * node + 1, mid + 1, end)
            && self.tree[node]
                == self.op.combine(
                    self.resolved(2 * node, start, mid),
                    self.resolved(2 * node + 1, mid + 1, end),
                )
    }

    /// The aggregate of `node` with its own pending tag applied.
    fn resolved(&self, node: usize, start: usize, end: usize) -> T {
        let tag = self.lazy.as_ref().and_then(|lazy| lazy[node]);
        match (tag, self.op.range_rule()) {
            (Some(tag), Some(rule)) => rule.apply(self.tree[node], tag, end - start + 1),
            _ => self.tree[node],
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Operation, SegmentTree};

    #[test]
    fn fresh_trees() {
        for n in 1..40 {
            let a = (0..n).map(|_| rand::random::<i16>()).collect::<Vec<_>>();
            for op in [Operation::Sum, Operation::Min, Operation::Max] {
                let a = a.iter().map(|&x| x as i64).collect::<Vec<_>>();
                assert!(SegmentTree::new(&a, op).unwrap().validate());
                assert!(SegmentTree::new_lazy(&a, op).unwrap().validate());
            }
        }
    }

    #[test]
    fn with_pending_tags() {
        let mut st = SegmentTree::new_lazy(&[5i64; 13], Operation::Sum).unwrap();
        st.update_range(2..=11, 4).unwrap();
        st.update_range(0..=6, -1).unwrap();
        // Tags are still parked below the covering nodes.
        assert!(st.lazy.as_ref().unwrap().iter().any(Option::is_some));
        assert!(st.validate());
    }

    #[test]
    fn mismatched_identity() {
        let st = SegmentTree::with_custom(&[2, 3, 4], |a: i32, b: i32| a * b, 0).unwrap();
        assert!(!st.validate());
        let st = SegmentTree::with_custom(&[2, 3, 4], |a: i32, b: i32| a * b, 1).unwrap();
        assert!(st.validate());
    }

    #[test]
    fn corrupted_aggregate() {
        let mut st = SegmentTree::new(&[1, 2, 3, 4, 5], Operation::Sum).unwrap();
        assert!(st.validate());
        st.tree[2] += 1;
        assert!(!st.validate());
    }

    #[test]
    fn corrupted_geometry() {
        let mut st = SegmentTree::new(&[1, 2, 3], Operation::Max).unwrap();
        st.tree.pop();
        assert!(!st.validate());

        let mut st = SegmentTree::new_lazy(&[1, 2, 3], Operation::Max).unwrap();
        st.lazy.as_mut().unwrap().push(None);
        assert!(!st.validate());
    }
}
