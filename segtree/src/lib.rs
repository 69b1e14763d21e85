//! Array-backed segment tree with lazy propagation.
//!
//! A [`SegmentTree`] aggregates a fixed-length sequence under an
//! [`Operation`]: sum, min, max, or a caller supplied associative function.
//! Range queries and point updates take O(lg n). Trees built with
//! [`SegmentTree::new_lazy`] also support O(lg n) range updates: an added
//! delta for sums, an assignment for min and max.
//!
//! ```
//! use segtree::{Operation, SegmentTree};
//!
//! let mut st = SegmentTree::new_lazy(&[1, 2, 3, 4, 5, 6, 7, 8], Operation::Sum)?;
//! st.update_range(1..=4, 10)?;
//! assert_eq!(st.query(..)?, 76);
//! assert_eq!(st.query(0..=0)?, 1);
//! # Ok::<(), segtree::SegtreeError>(())
//! ```

mod dump;
mod error;
mod lazy;
mod op;
mod stats;
mod tree;
mod validate;
mod value;

pub use dump::Dump;
pub use error::SegtreeError;
pub use op::{Operation, RangeRule};
pub use stats::Stats;
pub use tree::SegmentTree;
pub use value::Value;

/// Largest supported number of elements.
pub const MAX_SIZE: usize = 1_000_000;
