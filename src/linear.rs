//! Three simultaneous orderings over one element set, maintained by O(n)
//! rescan.
//!
//! [`MultiTop`] keeps three named extremal indices - reservation, ready,
//! limit - over a single backing vector. Instead of three independently
//! maintained heaps (triple bookkeeping on every mutation), one linear
//! pass recomputes all three tops with one comparison per ordering per
//! element. For the small to medium live sets a QoS scheduler carries,
//! the rescan is simpler and the single sweep halves data traffic versus
//! three separate passes.

use core::fmt;
use core::ops::Deref;

use crate::base::{IndirectVec, PushError};
use crate::order::Precedence;
use crate::slot::{Primary, Slotted, DETACHED};

/// A container tracking three named extremal elements under independent
/// orderings.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{MultiTop, PosSlot, Slotted};
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
/// let mut queue = MultiTop::new(
///     |a: &Request, b: &Request| a.reservation < b.reservation,
///     |a: &Request, b: &Request| a.priority > b.priority,
///     |a: &Request, b: &Request| a.limit < b.limit,
/// );
///
/// queue.push(Rc::new(Request { reservation: 5, priority: 1, limit: 9, pos: PosSlot::new() }));
/// queue.push(Rc::new(Request { reservation: 3, priority: 8, limit: 2, pos: PosSlot::new() }));
///
/// assert_eq!(queue.top_resv().unwrap().reservation, 3);
/// assert_eq!(queue.top_ready().unwrap().priority, 8);
/// assert_eq!(queue.top_limit().unwrap().limit, 2);
/// ```
pub struct MultiTop<I, R, P, L, M = Primary> {
    base: IndirectVec<I, M>,
    cmp_resv: R,
    cmp_ready: P,
    cmp_limit: L,
    resv: usize,
    ready: usize,
    limit: usize,
}

impl<I, R, P, L, M> MultiTop<I, R, P, L, M> {
    /// Creates an empty container with the three ordering predicates.
    #[inline]
    pub const fn new(cmp_resv: R, cmp_ready: P, cmp_limit: L) -> Self {
        Self {
            base: IndirectVec::new(),
            cmp_resv,
            cmp_ready,
            cmp_limit,
            resv: DETACHED,
            ready: DETACHED,
            limit: DETACHED,
        }
    }

    /// Creates an empty container with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(cmp_resv: R, cmp_ready: P, cmp_limit: L, capacity: usize) -> Self {
        Self {
            base: IndirectVec::with_capacity(capacity),
            cmp_resv,
            cmp_ready,
            cmp_limit,
            resv: DETACHED,
            ready: DETACHED,
            limit: DETACHED,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Returns `true` if the container is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Iterates over the stored handles in backing order.
    #[inline]
    pub fn handles(&self) -> core::slice::Iter<'_, I> {
        self.base.handles()
    }
}

impl<I, R, P, L, M> MultiTop<I, R, P, L, M>
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
        self.base.push(item);
        self.adjust();
    }

    /// Pushes a handle, reporting backing-storage growth failure.
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        self.base.try_push(item)?;
        self.adjust();
        Ok(())
    }

    /// Current extremal element under the reservation ordering.
    #[inline]
    pub fn top_resv(&self) -> Option<&I::Target> {
        self.top_at(self.resv)
    }

    /// Current extremal element under the ready ordering.
    #[inline]
    pub fn top_ready(&self) -> Option<&I::Target> {
        self.top_at(self.ready)
    }

    /// Current extremal element under the limit ordering.
    #[inline]
    pub fn top_limit(&self) -> Option<&I::Target> {
        self.top_at(self.limit)
    }

    /// Handle of the reservation top.
    #[inline]
    pub fn top_resv_handle(&self) -> Option<&I> {
        self.handle_at(self.resv)
    }

    /// Handle of the ready top.
    #[inline]
    pub fn top_ready_handle(&self) -> Option<&I> {
        self.handle_at(self.ready)
    }

    /// Handle of the limit top.
    #[inline]
    pub fn top_limit_handle(&self) -> Option<&I> {
        self.handle_at(self.limit)
    }

    /// Removes and returns the reservation top.
    #[inline]
    pub fn pop_resv(&mut self) -> Option<I> {
        self.pop_top(self.resv)
    }

    /// Removes and returns the ready top.
    #[inline]
    pub fn pop_ready(&mut self) -> Option<I> {
        self.pop_top(self.ready)
    }

    /// Removes and returns the limit top.
    #[inline]
    pub fn pop_limit(&mut self) -> Option<I> {
        self.pop_top(self.limit)
    }

    /// Removes and returns the element at index 0 (backing order, not any
    /// named ordering).
    pub fn pop(&mut self) -> Option<I> {
        if self.base.is_empty() {
            None
        } else {
            Some(self.remove_at(0))
        }
    }

    /// Element at index 0 without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&I::Target> {
        self.base.peek()
    }

    /// Removes the element `item` refers to, in O(1) + O(n) rescan.
    pub fn remove(&mut self, item: &I) -> I {
        let index = self.base.index_of(item);
        self.remove_at(index)
    }

    /// Removes the element at `elem`'s address.
    pub fn remove_elem(&mut self, elem: &I::Target) -> I {
        let index = self.base.index_of_elem(elem);
        self.remove_at(index)
    }

    /// Recomputes all three named tops in one O(n) sweep.
    ///
    /// Call after external events changed ordering keys. One comparison
    /// per ordering per element; a second call with no intervening
    /// mutation is a no-op.
    pub fn adjust(&mut self) {
        if self.base.is_empty() {
            self.resv = DETACHED;
            self.ready = DETACHED;
            self.limit = DETACHED;
            return;
        }

        self.resv = 0;
        self.ready = 0;
        self.limit = 0;
        for i in 1..self.base.len() {
            let elem = self.base.elem(i);
            if self.cmp_resv.precedes(elem, self.base.elem(self.resv)) {
                self.resv = i;
            }
            if self.cmp_ready.precedes(elem, self.base.elem(self.ready)) {
                self.ready = i;
            }
            if self.cmp_limit.precedes(elem, self.base.elem(self.limit)) {
                self.limit = i;
            }
        }
    }

    /// Recomputes only the reservation top, for when only reservation
    /// keys changed.
    pub fn adjust_resv(&mut self) {
        if self.base.is_empty() {
            self.resv = DETACHED;
            return;
        }
        self.resv = 0;
        for i in 1..self.base.len() {
            if self
                .cmp_resv
                .precedes(self.base.elem(i), self.base.elem(self.resv))
            {
                self.resv = i;
            }
        }
    }

    /// Recomputes the ready and limit tops, for when reservation keys are
    /// unchanged.
    pub fn adjust_ready_limit(&mut self) {
        if self.base.is_empty() {
            self.ready = DETACHED;
            self.limit = DETACHED;
            return;
        }
        self.ready = 0;
        self.limit = 0;
        for i in 1..self.base.len() {
            let elem = self.base.elem(i);
            if self.cmp_ready.precedes(elem, self.base.elem(self.ready)) {
                self.ready = i;
            }
            if self.cmp_limit.precedes(elem, self.base.elem(self.limit)) {
                self.limit = i;
            }
        }
    }

    /// Linear scan for a handle by identity.
    #[inline]
    pub fn find(&self, item: &I) -> Option<usize> {
        self.base.find(item)
    }

    /// Linear scan for a handle by identity, starting from the tail.
    #[inline]
    pub fn rfind(&self, item: &I) -> Option<usize> {
        self.base.rfind(item)
    }

    /// Iterates over the elements in backing order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.base.iter()
    }

    /// Removes every element, detaching all slots and clearing the tops.
    pub fn clear(&mut self) {
        self.base.clear();
        self.resv = DETACHED;
        self.ready = DETACHED;
        self.limit = DETACHED;
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> I {
        let item = self.base.remove_at(index);
        if self.base.is_empty() {
            self.resv = DETACHED;
            self.ready = DETACHED;
            self.limit = DETACHED;
        } else {
            self.adjust();
        }
        item
    }

    pub(crate) fn elem_at(&self, index: usize) -> &I::Target {
        self.base.elem(index)
    }

    pub(crate) fn cmp_resv(&self) -> &R {
        &self.cmp_resv
    }

    pub(crate) fn cmp_ready(&self) -> &P {
        &self.cmp_ready
    }

    pub(crate) fn cmp_limit(&self) -> &L {
        &self.cmp_limit
    }

    #[inline]
    fn top_at(&self, index: usize) -> Option<&I::Target> {
        if index == DETACHED {
            None
        } else {
            Some(self.base.elem(index))
        }
    }

    #[inline]
    fn handle_at(&self, index: usize) -> Option<&I> {
        if index == DETACHED {
            None
        } else {
            Some(self.base.handle(index))
        }
    }

    #[inline]
    fn pop_top(&mut self, index: usize) -> Option<I> {
        if index == DETACHED {
            None
        } else {
            Some(self.remove_at(index))
        }
    }
}

impl<I, R, P, L, M> fmt::Display for MultiTop<I, R, P, L, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}
