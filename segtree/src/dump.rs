use std::fmt;

use crate::{SegmentTree, Value};

/// Read-only view printing a tree's configuration and node buffers.
pub struct Dump<'a, T> {
    st: &'a SegmentTree<T>,
}

impl<T: Value> SegmentTree<T> {
    pub fn dump(&self) -> Dump<'_, T> {
        Dump { st: self }
    }
}

impl<T: Value> Dump<'_, T> {
    fn node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: usize,
        start: usize,
        end: usize,
        depth: usize,
    ) -> fmt::Result {
        let st = self.st;
        if node >= st.tree.len() {
            return Ok(());
        }
        write!(
            f,
            "{:indent$}Node {node} [{start}-{end}]: {}",
            "",
            st.tree[node],
            indent = 2 * depth
        )?;
        if let Some(tag) = st.lazy.as_ref().and_then(|lazy| lazy[node]) {
            write!(f, " (lazy: {tag})")?;
        }
        writeln!(f)?;
        if start == end {
            return Ok(());
        }
        let mid = (start + end) / 2;
        self.node(f, 2 * node, start, mid, depth + 1)?;
        self.node(f, 2 * node + 1, mid + 1, end, depth + 1)
    }
}

impl<T: Value> fmt::Display for Dump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.st;
        writeln!(f, "=== Segment Tree Debug Info ===")?;
        writeln!(f, "Size: {}, Capacity: {}", st.size, st.capacity)?;
        writeln!(
            f,
            "Operation: {}, Lazy: {}",
            st.op,
            if st.is_lazy() { "yes" } else { "no" }
        )?;
        writeln!(f, "Identity: {}", st.op.identity())?;
        writeln!(
            f,
            "Queries: {}, Updates: {}",
            st.stats.query_count, st.stats.update_count
        )?;
        writeln!(f, "=== Tree Structure ===")?;
        self.node(f, 1, 0, st.size - 1, 0)?;
        writeln!(f, "=== End Debug Info ===")
    }
}

#[cfg(test)]
mod test {
    use crate::{Operation, SegmentTree};

    #[test]
    fn structure() {
        let st = SegmentTree::new(&[1, 2, 3], Operation::Sum).unwrap();
        let dump = st.dump().to_string();
        assert!(dump.contains("Size: 3, Capacity: 4"));
        assert!(dump.contains("Operation: sum, Lazy: no"));
        assert!(dump.contains("Identity: 0"));
        let nodes = dump
            .lines()
            .filter(|line| line.trim_start().starts_with("Node"))
            .collect::<Vec<_>>();
        assert_eq!(
            nodes,
            [
                "Node 1 [0-2]: 6",
                "  Node 2 [0-1]: 3",
                "    Node 4 [0-0]: 1",
                "    Node 5 [1-1]: 2",
                "  Node 3 [2-2]: 3",
            ]
        );
    }

    #[test]
    fn pending_tags() {
        let mut st = SegmentTree::new_lazy(&[0, 0, 0, 0], Operation::Sum).unwrap();
        st.update_range(.., 2).unwrap();
        let dump = st.dump().to_string();
        assert!(dump.contains("Lazy: yes"));
        assert!(dump.contains("Node 1 [0-3]: 8\n"));
        assert!(dump.contains("Node 2 [0-1]: 0 (lazy: 2)"));
        assert!(dump.contains("Queries: 0, Updates: 1"));
    }
}
