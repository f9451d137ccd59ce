//! Single-minimum indirect queue maintained by O(n) rescan.
//!
//! [`ScanQueue`] offers the same external contract as
//! [`SortedQueue`](crate::SortedQueue) but a strictly weaker guarantee: the
//! backing order is arbitrary and only the current extremal element is
//! tracked. Mutations that can dethrone the cached minimum trigger a full
//! rescan; everything else is O(1). The trade is deliberate - cheap
//! pushes and removals against linear pops - and the two types are never
//! silently substituted for one another.

use core::fmt;
use core::ops::Deref;

use crate::base::{IndirectVec, PushError};
use crate::order::Precedence;
use crate::slot::{Primary, Slotted, DETACHED};

/// A priority queue tracking only its current extremal element.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{PosSlot, ScanQueue, Slotted};
///
/// struct Request {
///     deadline: u64,
///     pos: PosSlot,
/// }
///
/// impl Slotted for Request {
///     fn slot(&self) -> &PosSlot {
///         &self.pos
///     }
/// }
///
/// let mut queue = ScanQueue::new(|a: &Request, b: &Request| a.deadline < b.deadline);
/// queue.push(Rc::new(Request { deadline: 30, pos: PosSlot::new() }));
/// queue.push(Rc::new(Request { deadline: 10, pos: PosSlot::new() }));
///
/// assert_eq!(queue.peek().unwrap().deadline, 10);
/// ```
pub struct ScanQueue<I, C, M = Primary> {
    base: IndirectVec<I, M>,
    cmp: C,
    min: usize,
}

impl<I, C, M> ScanQueue<I, C, M> {
    /// Creates an empty queue ordered by `cmp`.
    #[inline]
    pub const fn new(cmp: C) -> Self {
        Self {
            base: IndirectVec::new(),
            cmp,
            min: DETACHED,
        }
    }

    /// Creates an empty queue with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            base: IndirectVec::with_capacity(capacity),
            cmp,
            min: DETACHED,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Returns `true` if the queue is empty.
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

impl<I, C, M> ScanQueue<I, C, M>
where
    I: Deref,
    I::Target: Slotted<M>,
    C: Precedence<I::Target>,
{
    /// Pushes a handle; one comparison updates the cached extremal.
    ///
    /// # Panics
    ///
    /// Panics if the backing vector cannot grow.
    pub fn push(&mut self, item: I) {
        self.base.push(item);
        self.note_pushed();
    }

    /// Pushes a handle, reporting backing-storage growth failure.
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        self.base.try_push(item)?;
        self.note_pushed();
        Ok(())
    }

    /// Removes and returns the extremal element's handle.
    ///
    /// O(n): removal dethrones the cached minimum, forcing a rescan.
    pub fn pop(&mut self) -> Option<I> {
        if self.min == DETACHED {
            return None;
        }
        let item = self.base.remove_at(self.min);
        self.rescan();
        Some(item)
    }

    /// Returns the extremal element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&I::Target> {
        if self.min == DETACHED {
            None
        } else {
            Some(self.base.elem(self.min))
        }
    }

    /// Returns the extremal element's handle without removing it.
    #[inline]
    pub fn peek_handle(&self) -> Option<&I> {
        if self.min == DETACHED {
            None
        } else {
            Some(self.base.handle(self.min))
        }
    }

    /// Notes that `elem`'s key *decreased*: one comparison against the
    /// cached extremal.
    pub fn promote(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        if index != self.min
            && self
                .cmp
                .precedes(self.base.elem(index), self.base.elem(self.min))
        {
            self.min = index;
        }
    }

    /// Notes that `elem`'s key *increased*: rescans only if the cached
    /// extremal was dethroned.
    pub fn demote(&mut self, elem: &I::Target) {
        if self.base.index_of_elem(elem) == self.min {
            self.rescan();
        }
    }

    /// Notes that `elem`'s key changed in an unknown direction.
    pub fn adjust(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        if index == self.min {
            self.rescan();
        } else if self
            .cmp
            .precedes(self.base.elem(index), self.base.elem(self.min))
        {
            self.min = index;
        }
    }

    /// Removes the element `item` refers to; O(1) locate plus O(n) rescan
    /// when the extremal is affected.
    pub fn remove(&mut self, item: &I) -> I {
        let index = self.base.index_of(item);
        self.remove_at(index)
    }

    /// Removes the element at `elem`'s address.
    pub fn remove_elem(&mut self, elem: &I::Target) -> I {
        let index = self.base.index_of_elem(elem);
        self.remove_at(index)
    }

    /// Linear scan for a handle by identity.
    #[inline]
    pub fn find(&self, item: &I) -> Option<usize> {
        self.base.find(item)
    }

    /// Iterates over the elements in backing order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.base.iter()
    }

    /// Removes every element, detaching all slots.
    pub fn clear(&mut self) {
        self.base.clear();
        self.min = DETACHED;
    }

    fn remove_at(&mut self, index: usize) -> I {
        let item = self.base.remove_at(index);
        // Swap-remove may have moved the cached extremal; its index is no
        // longer trustworthy.
        self.rescan();
        item
    }

    fn note_pushed(&mut self) {
        let pushed = self.base.len() - 1;
        if self.min == DETACHED
            || self
                .cmp
                .precedes(self.base.elem(pushed), self.base.elem(self.min))
        {
            self.min = pushed;
        }
    }

    fn rescan(&mut self) {
        if self.base.is_empty() {
            self.min = DETACHED;
            return;
        }
        self.min = 0;
        for i in 1..self.base.len() {
            if self
                .cmp
                .precedes(self.base.elem(i), self.base.elem(self.min))
            {
                self.min = i;
            }
        }
    }
}

impl<I, C, M> Default for ScanQueue<I, C, M>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<I, C, M> fmt::Display for ScanQueue<I, C, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
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

    fn ascending(a: &Job, b: &Job) -> bool {
        a.cost.get() < b.cost.get()
    }

    type Cmp = fn(&Job, &Job) -> bool;

    fn queue() -> ScanQueue<Rc<Job>, Cmp> {
        ScanQueue::new(ascending as Cmp)
    }

    fn assert_min_is_true_min(q: &ScanQueue<Rc<Job>, Cmp>) {
        match q.peek() {
            None => assert!(q.is_empty()),
            Some(min) => {
                for elem in q.iter() {
                    assert!(!ascending(elem, min), "cached extremal dethroned");
                }
            }
        }
    }

    #[test]
    fn tracks_minimum_across_pushes() {
        let mut q = queue();
        for cost in [2, 99, 1, -5, 12, -12, -7] {
            q.push(Job::new(cost));
            assert_min_is_true_min(&q);
        }
        assert_eq!(q.peek().unwrap().cost.get(), -12);
    }

    #[test]
    fn pop_drains_in_order() {
        let mut q = queue();
        for cost in [2, 99, 1, -5, 12, -12, -7] {
            q.push(Job::new(cost));
        }

        let mut drained = Vec::new();
        while let Some(job) = q.pop() {
            drained.push(job.cost.get());
            assert_min_is_true_min(&q);
        }
        assert_eq!(drained, [-12, -7, -5, 1, 2, 12, 99]);
    }

    #[test]
    fn remove_rescans() {
        let mut q = queue();
        let min = Job::new(-12);
        for cost in [2, 99, 1] {
            q.push(Job::new(cost));
        }
        q.push(Rc::clone(&min));

        q.remove(&min);
        assert_eq!(q.peek().unwrap().cost.get(), 1);
        assert_min_is_true_min(&q);
    }

    #[test]
    fn promote_is_one_comparison() {
        let mut q = queue();
        let job = Job::new(50);
        q.push(Job::new(10));
        q.push(Rc::clone(&job));

        job.cost.set(-1);
        q.promote(&job);
        assert_eq!(q.peek().unwrap().cost.get(), -1);
        assert_min_is_true_min(&q);
    }

    #[test]
    fn demote_rescans_only_when_minimum_moves() {
        let mut q = queue();
        let min = Job::new(1);
        let other = Job::new(20);
        q.push(Rc::clone(&min));
        q.push(Rc::clone(&other));
        q.push(Job::new(10));

        // Demoting a non-extremal element changes nothing.
        other.cost.set(30);
        q.demote(&other);
        assert_eq!(q.peek().unwrap().cost.get(), 1);

        min.cost.set(99);
        q.demote(&min);
        assert_eq!(q.peek().unwrap().cost.get(), 10);
        assert_min_is_true_min(&q);
    }

    #[test]
    fn adjust_either_direction() {
        let mut q = queue();
        let a = Job::new(5);
        let b = Job::new(15);
        q.push(Rc::clone(&a));
        q.push(Rc::clone(&b));
        q.push(Job::new(10));

        a.cost.set(50);
        q.adjust(&a);
        assert_eq!(q.peek().unwrap().cost.get(), 10);

        b.cost.set(-3);
        q.adjust(&b);
        assert_eq!(q.peek().unwrap().cost.get(), -3);
        assert_min_is_true_min(&q);
    }

    #[test]
    fn empty_after_clear() {
        let mut q = queue();
        q.push(Job::new(1));
        q.clear();
        assert!(q.is_empty());
        assert!(q.peek().is_none());
        assert!(q.pop().is_none());
    }
}
