use thiserror::Error;

use crate::compare::ComparisonFailed;

/// Errors returned by the sort engine.
///
/// Whatever the variant, the slice still holds exactly the values it held
/// before the call. Only their order is unspecified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SortError {
    #[error("comparator failed; sort aborted")]
    ComparatorFailed(#[from] ComparisonFailed),

    #[error("heap range [{index}, {right}] is out of bounds for a slice of length {len}")]
    RangeOutOfBounds {
        index: usize,
        right: usize,
        len: usize,
    },
}

impl SortError {
    pub fn is_comparator_failure(&self) -> bool {
        matches!(self, SortError::ComparatorFailed(_))
    }
}
