//! Precedence predicates over container elements.
//!
//! Containers are parameterized by a [`Precedence`] rather than requiring
//! `T: Ord` because the multi-top variants hold up to three *independent*
//! orderings over the same element type, which a single `Ord` impl cannot
//! express.

/// A precedence predicate over two elements.
///
/// `precedes(a, b)` returns `true` if `a` must come out of the container
/// before `b`. Not required to be a strict total order: ties (neither
/// element precedes the other) are permitted and left unresolved among
/// themselves.
///
/// Implemented for every `Fn(&T, &T) -> bool`, so a closure works anywhere
/// a comparator is needed:
///
/// ```
/// use intruq::Precedence;
///
/// let earliest = |a: &u64, b: &u64| a < b;
/// assert!(earliest.precedes(&1, &2));
/// assert!(!earliest.precedes(&2, &2));
/// ```
pub trait Precedence<T: ?Sized> {
    /// Returns `true` if `a` must precede `b`.
    fn precedes(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Precedence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Precedence by the element's own `Ord`, smallest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

impl<T: Ord + ?Sized> Precedence<T> for MinFirst {
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Precedence by the element's own `Ord`, largest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

impl<T: Ord + ?Sized> Precedence<T> for MaxFirst {
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        a > b
    }
}
