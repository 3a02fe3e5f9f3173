//! In-place heap sort over runtime values with a comparator that can fail.
//!
//! The engine reorders a slice using a three-way comparison callback. If the
//! callback fails, the sort stops at once and the slice is left as a
//! permutation of its input: no value is dropped, duplicated, or lost, even
//! when the comparator panics.

mod algorithms;
mod compare;
mod error;

use std::cmp::Ordering;

pub use algorithms::heap_sort::{build_heap, heap_sort, sift_down};
pub use compare::{Comparator, CompareSign, ComparisonFailed, PendingFailure, SortOrder};
pub use error::SortError;

/// Sorts the whole slice under `compare`, passing `ctx` to every call.
///
/// Slices shorter than two elements are left alone without calling the
/// comparator.
pub fn sort<T, C, F>(data: &mut [T], ctx: &C, mut compare: F) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    let len = data.len();
    if len < 2 {
        return Ok(());
    }

    heap_sort(data, len - 1, ctx, &mut compare)
}

/// Sorts the slice with a fallible closure and returns the closure's first
/// error, if any.
pub fn try_sort_by<T, E, F>(data: &mut [T], mut compare: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut pending = PendingFailure::new();
    // Every failure this comparator reports is recorded in `pending` first,
    // and the whole-slice range is always valid, so `pending` alone decides
    // the outcome.
    let _ = sort(data, &(), |a: &T, b: &T, _: &()| {
        compare(a, b).map_err(|err| pending.record(err))
    });

    pending.take().map_or(Ok(()), Err)
}
