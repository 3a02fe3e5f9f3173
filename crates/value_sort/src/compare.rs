//! The comparator boundary.
//!
//! Comparators speak the external numeric convention (a signed number, or a
//! failure). The engine converts that to [`SortOrder`] as soon as the outcome
//! arrives and never looks at the raw number again.

use std::cmp::Ordering;

use thiserror::Error;

/// Three-way ordering signal between two values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortOrder {
    /// The first operand orders before the second.
    Before,
    /// No strict order between the operands.
    Equal,
    /// The first operand orders after the second.
    After,
}

impl SortOrder {
    /// Maps a numeric comparator result onto an order. NaN counts as zero.
    #[inline]
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 {
            SortOrder::Before
        } else if sign > 0.0 {
            SortOrder::After
        } else {
            SortOrder::Equal
        }
    }

    /// The external numeric encoding of this order.
    #[inline]
    pub fn to_sign(self) -> f64 {
        match self {
            SortOrder::Before => -1.0,
            SortOrder::Equal => 0.0,
            SortOrder::After => 1.0,
        }
    }

    /// `true` only for a strict "orders after".
    #[inline]
    pub fn is_after(self) -> bool {
        self == SortOrder::After
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            SortOrder::Before => SortOrder::After,
            SortOrder::Equal => SortOrder::Equal,
            SortOrder::After => SortOrder::Before,
        }
    }
}

impl From<Ordering> for SortOrder {
    #[inline]
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => SortOrder::Before,
            Ordering::Equal => SortOrder::Equal,
            Ordering::Greater => SortOrder::After,
        }
    }
}

impl From<SortOrder> for Ordering {
    #[inline]
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Before => Ordering::Less,
            SortOrder::Equal => Ordering::Equal,
            SortOrder::After => Ordering::Greater,
        }
    }
}

/// A comparator outcome whose sign can be read.
///
/// The engine takes outcomes by value and drops them right after reading the
/// sign, so a runtime may return its own managed numeric value here.
pub trait CompareSign {
    fn sort_order(&self) -> SortOrder;
}

impl CompareSign for SortOrder {
    #[inline]
    fn sort_order(&self) -> SortOrder {
        *self
    }
}

impl CompareSign for Ordering {
    #[inline]
    fn sort_order(&self) -> SortOrder {
        (*self).into()
    }
}

impl CompareSign for f64 {
    #[inline]
    fn sort_order(&self) -> SortOrder {
        SortOrder::from_sign(*self)
    }
}

impl CompareSign for f32 {
    #[inline]
    fn sort_order(&self) -> SortOrder {
        SortOrder::from_sign(f64::from(*self))
    }
}

macro_rules! impl_compare_sign_int {
    ($($ty:ty),*) => {
        $(
            impl CompareSign for $ty {
                #[inline]
                fn sort_order(&self) -> SortOrder {
                    self.cmp(&0).into()
                }
            }
        )*
    };
}

impl_compare_sign_int!(i8, i16, i32, i64, isize);

/// Marker returned by a comparator that failed.
///
/// It carries nothing: the failure detail belongs to whoever ran the
/// comparison, usually in a [`PendingFailure`] slot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Error)]
#[error("comparison failed")]
pub struct ComparisonFailed;

/// Three-way comparison callback that may fail.
///
/// `ctx` is passed through untouched on every call. Implementations must not
/// mutate the slice being sorted.
pub trait Comparator<T, C: ?Sized> {
    type Outcome: CompareSign;

    fn compare(&mut self, a: &T, b: &T, ctx: &C) -> Result<Self::Outcome, ComparisonFailed>;
}

impl<T, C, O, F> Comparator<T, C> for F
where
    C: ?Sized,
    O: CompareSign,
    F: FnMut(&T, &T, &C) -> Result<O, ComparisonFailed>,
{
    type Outcome = O;

    #[inline]
    fn compare(&mut self, a: &T, b: &T, ctx: &C) -> Result<O, ComparisonFailed> {
        self(a, b, ctx)
    }
}

/// Slot holding the detail of the first unrecovered comparator failure.
#[derive(Debug)]
pub struct PendingFailure<E> {
    slot: Option<E>,
}

impl<E> Default for PendingFailure<E> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<E> PendingFailure<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `err` unless a failure is already pending, and hands back the
    /// marker to return from the comparator.
    pub fn record(&mut self, err: E) -> ComparisonFailed {
        if self.slot.is_none() {
            self.slot = Some(err);
        }
        ComparisonFailed
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn take(&mut self) -> Option<E> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_conversion() {
        assert_eq!(SortOrder::from_sign(-0.5), SortOrder::Before);
        assert_eq!(SortOrder::from_sign(3.0), SortOrder::After);
        assert_eq!(SortOrder::from_sign(0.0), SortOrder::Equal);
        assert_eq!(SortOrder::from_sign(-0.0), SortOrder::Equal);
        assert_eq!(SortOrder::from_sign(f64::NAN), SortOrder::Equal);
        assert_eq!(SortOrder::from_sign(f64::NEG_INFINITY), SortOrder::Before);

        for order in [SortOrder::Before, SortOrder::Equal, SortOrder::After] {
            assert_eq!(SortOrder::from_sign(order.to_sign()), order);
            assert_eq!(SortOrder::from(Ordering::from(order)), order);
            assert_eq!(order.reverse().reverse(), order);
        }
    }

    #[test]
    fn integer_outcomes() {
        assert_eq!((-7_i32).sort_order(), SortOrder::Before);
        assert_eq!(0_i64.sort_order(), SortOrder::Equal);
        assert_eq!(isize::MAX.sort_order(), SortOrder::After);
        assert_eq!(Ordering::Greater.sort_order(), SortOrder::After);
    }

    #[test]
    fn pending_failure_keeps_first() {
        let mut pending = PendingFailure::new();
        assert!(!pending.is_pending());
        assert_eq!(pending.record("first"), ComparisonFailed);
        assert_eq!(pending.record("second"), ComparisonFailed);
        assert!(pending.is_pending());
        assert_eq!(pending.take(), Some("first"));
        assert!(!pending.is_pending());
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn failure_marker_is_an_error() {
        let err: Box<dyn std::error::Error> = Box::new(ComparisonFailed);
        assert_eq!(err.to_string(), "comparison failed");
        assert!(err.source().is_none());
    }

    #[test]
    fn closures_are_comparators() {
        let mut calls = 0;
        let mut cmp = |a: &i32, b: &i32, offset: &i32| {
            calls += 1;
            Ok::<_, ComparisonFailed>((a + offset) - b)
        };
        let outcome = cmp.compare(&1, &3, &1).map(|o| o.sort_order());
        assert_eq!(outcome, Ok(SortOrder::Before));
        assert_eq!(calls, 1);
    }
}
