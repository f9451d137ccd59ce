//! Selector-argument facade over the three-ordering container.
//!
//! [`MultiVec`] carries the same contract and algorithm as
//! [`MultiTop`](crate::MultiTop); it only changes the surface, exposing the
//! three named tops through a single [`TopKind`] argument instead of three
//! method families. Useful when the ordering to consult is itself data
//! (e.g. a scheduler phase variable).

use core::fmt;
use core::fmt::Write as _;
use core::ops::Deref;

use crate::base::PushError;
use crate::linear::MultiTop;
use crate::order::Precedence;
use crate::slot::{Primary, Slotted};

/// Selects one of the three simultaneous orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopKind {
    /// The earliest-reservation ordering.
    Reservation,
    /// The proportional-priority ordering.
    Ready,
    /// The hard-limit deadline ordering.
    Limit,
}

/// A three-ordering container addressed by [`TopKind`] selector.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{MultiVec, PosSlot, Slotted, TopKind};
///
/// struct Request {
///     reservation: u64,
///     priority: u64,
///     limit: u64,
///     pos: PosSlot,
/// }
///
/// impl Slotted for Request {
///     fn slot(&self) -> &PosSlot {
///         &self.pos
///     }
/// }
///
/// let mut queue = MultiVec::new(
///     |a: &Request, b: &Request| a.reservation < b.reservation,
///     |a: &Request, b: &Request| a.priority > b.priority,
///     |a: &Request, b: &Request| a.limit < b.limit,
/// );
///
/// queue.push(Rc::new(Request { reservation: 5, priority: 1, limit: 9, pos: PosSlot::new() }));
/// queue.push(Rc::new(Request { reservation: 3, priority: 8, limit: 2, pos: PosSlot::new() }));
///
/// assert_eq!(queue.top(TopKind::Reservation).unwrap().reservation, 3);
/// let served = queue.pop(TopKind::Ready).unwrap();
/// assert_eq!(served.priority, 8);
/// ```
pub struct MultiVec<I, R, P, L, M = Primary> {
    inner: MultiTop<I, R, P, L, M>,
}

impl<I, R, P, L, M> MultiVec<I, R, P, L, M> {
    /// Creates an empty container with the three ordering predicates.
    #[inline]
    pub const fn new(cmp_resv: R, cmp_ready: P, cmp_limit: L) -> Self {
        Self {
            inner: MultiTop::new(cmp_resv, cmp_ready, cmp_limit),
        }
    }

    /// Creates an empty container with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(cmp_resv: R, cmp_ready: P, cmp_limit: L, capacity: usize) -> Self {
        Self {
            inner: MultiTop::with_capacity(cmp_resv, cmp_ready, cmp_limit, capacity),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the container is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the stored handles in backing order.
    #[inline]
    pub fn handles(&self) -> core::slice::Iter<'_, I> {
        self.inner.handles()
    }
}

impl<I, R, P, L, M> MultiVec<I, R, P, L, M>
where
    I: Deref,
    I::Target: Slotted<M>,
    R: Precedence<I::Target>,
    P: Precedence<I::Target>,
    L: Precedence<I::Target>,
{
    /// Pushes a handle and rescans all three tops. O(n).
    ///
    /// # Panics
    ///
    /// Panics if the backing vector cannot grow.
    #[inline]
    pub fn push(&mut self, item: I) {
        self.inner.push(item);
    }

    /// Pushes a handle, reporting backing-storage growth failure.
    #[inline]
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        self.inner.try_push(item)
    }

    /// Current extremal element under the selected ordering.
    pub fn top(&self, kind: TopKind) -> Option<&I::Target> {
        match kind {
            TopKind::Reservation => self.inner.top_resv(),
            TopKind::Ready => self.inner.top_ready(),
            TopKind::Limit => self.inner.top_limit(),
        }
    }

    /// Handle of the extremal element under the selected ordering.
    pub fn top_handle(&self, kind: TopKind) -> Option<&I> {
        match kind {
            TopKind::Reservation => self.inner.top_resv_handle(),
            TopKind::Ready => self.inner.top_ready_handle(),
            TopKind::Limit => self.inner.top_limit_handle(),
        }
    }

    /// Removes and returns the extremal element under the selected
    /// ordering.
    pub fn pop(&mut self, kind: TopKind) -> Option<I> {
        match kind {
            TopKind::Reservation => self.inner.pop_resv(),
            TopKind::Ready => self.inner.pop_ready(),
            TopKind::Limit => self.inner.pop_limit(),
        }
    }

    /// Element at index 0 (backing order) without removing it.
    #[inline]
    pub fn front(&self) -> Option<&I::Target> {
        self.inner.peek()
    }

    /// Removes and returns the element at index 0 (backing order).
    #[inline]
    pub fn pop_front(&mut self) -> Option<I> {
        self.inner.pop()
    }

    /// Recomputes all three named tops in one O(n) sweep.
    #[inline]
    pub fn adjust(&mut self) {
        self.inner.adjust();
    }

    /// Removes the element `item` refers to, in O(1) + O(n) rescan.
    #[inline]
    pub fn remove(&mut self, item: &I) -> I {
        self.inner.remove(item)
    }

    /// Removes the element at `elem`'s address.
    #[inline]
    pub fn remove_elem(&mut self, elem: &I::Target) -> I {
        self.inner.remove_elem(elem)
    }

    /// Linear scan for a handle by identity.
    #[inline]
    pub fn find(&self, item: &I) -> Option<usize> {
        self.inner.find(item)
    }

    /// Linear scan for a handle by identity, starting from the tail.
    #[inline]
    pub fn rfind(&self, item: &I) -> Option<usize> {
        self.inner.rfind(item)
    }

    /// Iterates over the elements in backing order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.inner.iter()
    }

    /// Removes every element, detaching all slots and clearing the tops.
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<I, R, P, L, M> MultiVec<I, R, P, L, M>
where
    I: Deref,
    I::Target: Slotted<M> + fmt::Display,
    R: Precedence<I::Target>,
    P: Precedence<I::Target>,
    L: Precedence<I::Target>,
{
    /// Diagnostic rendering in the order successive `pop(kind)` calls
    /// would drain the container, filtered by `filter`.
    ///
    /// Simulated on a scratch index vector; live slots and tops are never
    /// touched.
    pub fn display_sorted<F>(&self, kind: TopKind, filter: F) -> String
    where
        F: Fn(&I::Target) -> bool,
    {
        let cmp: &dyn Precedence<I::Target> = match kind {
            TopKind::Reservation => self.inner.cmp_resv(),
            TopKind::Ready => self.inner.cmp_ready(),
            TopKind::Limit => self.inner.cmp_limit(),
        };

        let mut order: Vec<usize> = (0..self.inner.len()).collect();
        let mut out = String::new();
        while !order.is_empty() {
            // The position pop(kind) would remove: the extremal under cmp.
            let mut top = 0;
            for pos in 1..order.len() {
                if cmp.precedes(
                    self.inner.elem_at(order[pos]),
                    self.inner.elem_at(order[top]),
                ) {
                    top = pos;
                }
            }
            let index = order.swap_remove(top);
            let elem = self.inner.elem_at(index);
            if filter(elem) {
                if !out.is_empty() {
                    out.push_str(", ");
                }
                let _ = write!(out, "{elem}");
            }
        }
        out
    }
}

impl<I, R, P, L, M> fmt::Display for MultiVec<I, R, P, L, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::PosSlot;
    use core::cell::Cell;
    use std::rc::Rc;

    struct Job {
        cost: Cell<i32>,
        pos: PosSlot,
    }

    impl Job {
        fn new(cost: i32) -> Rc<Self> {
            Rc::new(Self {
                cost: Cell::new(cost),
                pos: PosSlot::new(),
            })
        }
    }

    impl Slotted for Job {
        fn slot(&self) -> &PosSlot {
            &self.pos
        }
    }

    impl fmt::Display for Job {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.cost.get())
        }
    }

    fn ascending(a: &Job, b: &Job) -> bool {
        a.cost.get() < b.cost.get()
    }

    fn descending(a: &Job, b: &Job) -> bool {
        a.cost.get() > b.cost.get()
    }

    fn evens_first(a: &Job, b: &Job) -> bool {
        let (a, b) = (a.cost.get(), b.cost.get());
        match (a % 2 == 0, b % 2 == 0) {
            (true, false) => true,
            (false, true) => false,
            _ => a > b,
        }
    }

    type Cmp = fn(&Job, &Job) -> bool;

    fn queue() -> MultiVec<Rc<Job>, Cmp, Cmp, Cmp> {
        MultiVec::new(ascending as Cmp, descending as Cmp, evens_first as Cmp)
    }

    #[test]
    fn selector_matches_named_tops() {
        let mut q = queue();
        for cost in [2, 99, 1, -5, 12, -12, -7] {
            q.push(Job::new(cost));
        }

        assert_eq!(q.top(TopKind::Reservation).unwrap().cost.get(), -12);
        assert_eq!(q.top(TopKind::Ready).unwrap().cost.get(), 99);
        assert_eq!(q.top(TopKind::Limit).unwrap().cost.get(), 12);
    }

    #[test]
    fn pop_by_selector() {
        let mut q = queue();
        for cost in [2, 99, 1, -5, 12, -12, -7] {
            q.push(Job::new(cost));
        }

        assert_eq!(q.pop(TopKind::Reservation).unwrap().cost.get(), -12);
        assert_eq!(q.pop(TopKind::Ready).unwrap().cost.get(), 99);
        assert_eq!(q.pop(TopKind::Limit).unwrap().cost.get(), 12);
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn front_is_backing_order() {
        let mut q = queue();
        for cost in [2, 99, 1] {
            q.push(Job::new(cost));
        }
        assert_eq!(q.front().unwrap().cost.get(), 2);
        assert_eq!(q.pop_front().unwrap().cost.get(), 2);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn empty_selectors() {
        let mut q = queue();
        for kind in [TopKind::Reservation, TopKind::Ready, TopKind::Limit] {
            assert!(q.top(kind).is_none());
            assert!(q.top_handle(kind).is_none());
            assert!(q.pop(kind).is_none());
        }
    }

    #[test]
    fn display_sorted_by_each_ordering() {
        let mut q = queue();
        for cost in [2, 99, 1, -5, 12, -12, -7] {
            q.push(Job::new(cost));
        }

        assert_eq!(
            q.display_sorted(TopKind::Reservation, |_| true),
            "-12, -7, -5, 1, 2, 12, 99"
        );
        assert_eq!(
            q.display_sorted(TopKind::Ready, |_| true),
            "99, 12, 2, 1, -5, -7, -12"
        );
        assert_eq!(
            q.display_sorted(TopKind::Limit, |_| true),
            "12, 2, -12, 99, 1, -5, -7"
        );
        assert_eq!(
            q.display_sorted(TopKind::Reservation, |j| j.cost.get() < 0),
            "-12, -7, -5"
        );

        // Container untouched by the simulation.
        assert_eq!(q.len(), 7);
        assert_eq!(q.top(TopKind::Reservation).unwrap().cost.get(), -12);
    }

    #[test]
    fn remove_by_handle() {
        let mut q = queue();
        let job = Job::new(12);
        for cost in [2, 99, 1] {
            q.push(Job::new(cost));
        }
        q.push(Rc::clone(&job));

        assert_eq!(q.top(TopKind::Limit).unwrap().cost.get(), 12);
        q.remove(&job);
        assert_eq!(q.top(TopKind::Limit).unwrap().cost.get(), 2);
        assert_eq!(q.len(), 3);
    }
}
