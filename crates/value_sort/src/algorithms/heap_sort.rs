use crate::SortError;
use crate::compare::{Comparator, CompareSign, SortOrder};

use super::hole::Hole;

/// Sorts `data[..=right]` into non-descending order under `compare`.
///
/// Builds a max-heap over the range, then repeatedly swaps the maximum to the
/// tail of the shrinking heap and sifts the new root down. The sort is not
/// stable. The first comparator failure aborts the sort; `data` then still
/// holds every value it held on entry, in unspecified order.
pub fn heap_sort<T, C, F>(
    data: &mut [T],
    right: usize,
    ctx: &C,
    compare: &mut F,
) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    check_range(data, 0, right)?;

    let _span = tracing::trace_span!("heap_sort", right).entered();
    build_heap_unchecked(data, right, ctx, compare)?;

    for end in (1..=right).rev() {
        // The root is the maximum of `[0, end]`; park it at its final slot.
        data.swap(0, end);
        // SAFETY: `0 <= end - 1 < data.len()`.
        let sifted = unsafe { sift_down_unchecked(data, 0, end - 1, ctx, compare) };
        sifted.inspect_err(|_| {
            tracing::debug!(
                phase = "extract",
                right = end - 1,
                "comparator failed, heap sort aborted"
            );
        })?;
    }

    Ok(())
}

/// Arranges `data[..=right]` into a max-heap: afterwards no element of the
/// range orders after `data[0]`.
pub fn build_heap<T, C, F>(
    data: &mut [T],
    right: usize,
    ctx: &C,
    compare: &mut F,
) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    check_range(data, 0, right)?;
    build_heap_unchecked(data, right, ctx, compare)
}

/// Restores the max-heap property of `data[index..=right]`, given that both
/// subtrees of `index` already have it.
pub fn sift_down<T, C, F>(
    data: &mut [T],
    index: usize,
    right: usize,
    ctx: &C,
    compare: &mut F,
) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    check_range(data, index, right)?;
    // SAFETY: checked above.
    unsafe { sift_down_unchecked(data, index, right, ctx, compare) }
}

#[inline]
fn check_range<T>(data: &[T], index: usize, right: usize) -> Result<(), SortError> {
    if index <= right && right < data.len() {
        Ok(())
    } else {
        Err(SortError::RangeOutOfBounds {
            index,
            right,
            len: data.len(),
        })
    }
}

fn build_heap_unchecked<T, C, F>(
    data: &mut [T],
    right: usize,
    ctx: &C,
    compare: &mut F,
) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    for node in (0..=right / 2).rev() {
        // SAFETY: `node <= right / 2 <= right < data.len()`.
        let sifted = unsafe { sift_down_unchecked(data, node, right, ctx, compare) };
        sifted.inspect_err(|_| {
            tracing::debug!(phase = "build", node, right, "comparator failed, heap sort aborted");
        })?;
    }
    Ok(())
}

#[inline]
fn left_child(node: usize) -> Option<usize> {
    node.checked_mul(2)?.checked_add(1)
}

#[inline]
fn order_of<T, C, F>(compare: &mut F, a: &T, b: &T, ctx: &C) -> Result<SortOrder, SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    let outcome = compare.compare(a, b, ctx)?;
    let order = outcome.sort_order();
    drop(outcome);
    Ok(order)
}

// SAFETY: the caller guarantees `index <= right < data.len()`.
unsafe fn sift_down_unchecked<T, C, F>(
    data: &mut [T],
    index: usize,
    right: usize,
    ctx: &C,
    compare: &mut F,
) -> Result<(), SortError>
where
    C: ?Sized,
    F: Comparator<T, C>,
{
    debug_assert!(index <= right && right < data.len());

    // SAFETY: `index` is in bounds. Every index handed to the hole below is a
    // child of the hole's position, so it is both in bounds (`<= right`) and
    // distinct from it. Dropping the hole, including on the `?` paths, puts
    // the lifted value back at the parent of `child`.
    unsafe {
        let mut hole = Hole::new(data, index);
        let mut next = left_child(hole.pos());

        while let Some(mut child) = next {
            if child > right {
                break;
            }

            // Pick the greater child; ties go right.
            if child < right {
                let order = order_of(compare, hole.get(child), hole.get(child + 1), ctx)?;
                if !order.is_after() {
                    child += 1;
                }
            }

            // Stop once the greater child no longer orders strictly after the lifted value.
            let order = order_of(compare, hole.get(child), hole.element(), ctx)?;
            if !order.is_after() {
                break;
            }

            hole.move_to(child);
            next = left_child(hole.pos());
        }
    }

    Ok(())
}
