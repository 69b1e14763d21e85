use std::fmt;

use crate::Value;

/// The aggregation a tree is built for.
///
/// Each variant fixes the combine function, its identity, and the rule used by
/// range updates, so the three can never disagree.
#[derive(Clone, Copy, Debug)]
pub enum Operation<T> {
    Sum,
    Min,
    Max,
    /// A caller supplied associative `combine` with its neutral `identity`.
    /// Range updates are not available for custom operations.
    Custom { combine: fn(T, T) -> T, identity: T },
}

/// How a range update changes every element it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeRule {
    /// Add a delta to every element.
    Add,
    /// Overwrite every element.
    Assign,
}

impl<T: Value> Operation<T> {
    #[inline]
    pub fn combine(&self, a: T, b: T) -> T {
        match self {
            Operation::Sum => a.add_wrapping(b),
            Operation::Min => T::min(a, b),
            Operation::Max => T::max(a, b),
            Operation::Custom { combine, .. } => combine(a, b),
        }
    }

    /// `combine(identity(), x) == x` for every valid `x`.
    #[inline]
    pub fn identity(&self) -> T {
        match self {
            Operation::Sum => T::ZERO,
            Operation::Min => T::MAX,
            Operation::Max => T::MIN,
            Operation::Custom { identity, .. } => *identity,
        }
    }

    /// The range-update rule, or `None` when lazy propagation is unsupported.
    pub fn range_rule(&self) -> Option<RangeRule> {
        match self {
            Operation::Sum => Some(RangeRule::Add),
            Operation::Min | Operation::Max => Some(RangeRule::Assign),
            Operation::Custom { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Custom { .. } => "custom",
        }
    }
}

impl<T: Value> fmt::Display for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RangeRule {
    /// Merge a newer tag into a pending one.
    #[inline]
    pub(crate) fn compose<T: Value>(self, pending: Option<T>, tag: T) -> T {
        match (self, pending) {
            (RangeRule::Add, Some(old)) => old.add_wrapping(tag),
            _ => tag,
        }
    }

    /// The aggregate of a node covering `len` elements after `tag` is applied.
    #[inline]
    pub(crate) fn apply<T: Value>(self, aggregate: T, tag: T, len: usize) -> T {
        match self {
            RangeRule::Add => aggregate.add_wrapping(tag.scale(len)),
            RangeRule::Assign => tag,
        }
    }
}
