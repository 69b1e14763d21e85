use std::{collections::TryReserveError, error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegtreeError {
    /// The range is empty or reaches past the last element, or the sequence
    /// length is zero or above [`MAX_SIZE`](crate::MAX_SIZE).
    InvalidRange,
    /// A tree buffer could not be allocated.
    MemoryAllocation,
    /// Range update on a tree without lazy propagation.
    InvalidOperation,
}

impl fmt::Display for SegtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SegtreeError::InvalidRange => "invalid range",
            SegtreeError::MemoryAllocation => "memory allocation failed",
            SegtreeError::InvalidOperation => "operation not supported by this tree",
        })
    }
}

impl error::Error for SegtreeError {}

impl From<TryReserveError> for SegtreeError {
    fn from(_: TryReserveError) -> Self {
        SegtreeError::MemoryAllocation
    }
}
