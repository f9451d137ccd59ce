//! Fully-sorted indirect queue maintained by local bubbling.
//!
//! [`SortedQueue`] keeps its entire backing vector in precedence order.
//! Each mutation disturbs at most one position, and an O(k) bubble (k =
//! distance moved) restores full order: a backward bubble assumes the
//! prefix before the disturbance is sorted, a forward bubble assumes the
//! suffix after it is. Compare [`ScanQueue`](crate::ScanQueue), which
//! gives up full order and tracks only the current minimum.

use core::fmt;
use core::ops::Deref;

use crate::base::{IndirectVec, PushError};
use crate::order::Precedence;
use crate::slot::{Primary, Slotted};

/// A priority queue whose backing sequence is always fully sorted.
///
/// Invariant: for every `i` in `[0, len-1)`, the element at `i + 1` does
/// not precede the element at `i`.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{PosSlot, Slotted, SortedQueue};
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
/// let mut queue = SortedQueue::new(|a: &Request, b: &Request| a.deadline < b.deadline);
/// queue.push(Rc::new(Request { deadline: 30, pos: PosSlot::new() }));
/// queue.push(Rc::new(Request { deadline: 10, pos: PosSlot::new() }));
/// queue.push(Rc::new(Request { deadline: 20, pos: PosSlot::new() }));
///
/// let order: Vec<u64> = queue.iter().map(|r| r.deadline).collect();
/// assert_eq!(order, [10, 20, 30]);
/// ```
pub struct SortedQueue<I, C, M = Primary> {
    base: IndirectVec<I, M>,
    cmp: C,
}

impl<I, C, M> SortedQueue<I, C, M> {
    /// Creates an empty queue ordered by `cmp`.
    #[inline]
    pub const fn new(cmp: C) -> Self {
        Self {
            base: IndirectVec::new(),
            cmp,
        }
    }

    /// Creates an empty queue with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            base: IndirectVec::with_capacity(capacity),
            cmp,
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

    /// Iterates over the stored handles in sorted order.
    #[inline]
    pub fn handles(&self) -> core::slice::Iter<'_, I> {
        self.base.handles()
    }
}

impl<I, C, M> SortedQueue<I, C, M>
where
    I: Deref,
    I::Target: Slotted<M>,
    C: Precedence<I::Target>,
{
    /// Pushes a handle and bubbles it backward to its sorted position.
    ///
    /// O(k), where k is the distance from the tail to the final position.
    ///
    /// # Panics
    ///
    /// Panics if the backing vector cannot grow.
    #[inline]
    pub fn push(&mut self, item: I) {
        self.base.push(item);
        self.go_backward(self.base.len() - 1);
    }

    /// Pushes a handle, reporting backing-storage growth failure.
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        self.base.try_push(item)?;
        self.go_backward(self.base.len() - 1);
        Ok(())
    }

    /// Removes and returns the extremal element (index 0).
    ///
    /// Returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<I> {
        if self.base.is_empty() {
            None
        } else {
            Some(self.shift_remove(0))
        }
    }

    /// Returns the extremal element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&I::Target> {
        self.base.peek()
    }

    /// Returns the extremal element's handle without removing it.
    #[inline]
    pub fn peek_handle(&self) -> Option<&I> {
        self.base.peek_handle()
    }

    /// Restores order after `elem`'s key *decreased*: backward bubble.
    #[inline]
    pub fn promote(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        self.go_backward(index);
    }

    /// Restores order after `elem`'s key *increased*: forward bubble.
    #[inline]
    pub fn demote(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        self.go_forward(index);
    }

    /// Restores order after `elem`'s key changed in an unknown direction.
    ///
    /// One neighbor comparison decides the bubble direction.
    pub fn adjust(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        if index == 0 {
            self.go_forward(0);
        } else if index == self.base.len() - 1 {
            self.go_backward(index);
        } else if self
            .cmp
            .precedes(self.base.elem(index), self.base.elem(index - 1))
        {
            self.go_backward(index);
        } else {
            self.go_forward(index);
        }
    }

    /// Removes the element `item` refers to, preserving sorted order.
    ///
    /// O(n - i): the tail shifts down one position, each moved element's
    /// slot rewritten.
    pub fn remove(&mut self, item: &I) -> I {
        let index = self.base.index_of(item);
        self.shift_remove(index)
    }

    /// Removes the element at `elem`'s address, preserving sorted order.
    pub fn remove_elem(&mut self, elem: &I::Target) -> I {
        let index = self.base.index_of_elem(elem);
        self.shift_remove(index)
    }

    /// Linear scan for a handle by identity.
    #[inline]
    pub fn find(&self, item: &I) -> Option<usize> {
        self.base.find(item)
    }

    /// Returns `true` if a handle to the same element is present.
    #[inline]
    pub fn contains(&self, item: &I) -> bool {
        self.base.contains(item)
    }

    /// Iterates over the elements in sorted order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.base.iter()
    }

    /// Removes every element, detaching all slots.
    #[inline]
    pub fn clear(&mut self) {
        self.base.clear();
    }

    /// Removes index `index` by shifting the tail down one position.
    fn shift_remove(&mut self, mut index: usize) -> I {
        assert!(index < self.base.len(), "index out of range");
        let last = self.base.len() - 1;
        while index < last {
            self.base.swap(index, index + 1);
            index += 1;
        }
        // Removing the final index never moves another element.
        self.base.remove_at(last)
    }

    /// Bubble toward the tail. The suffix after `index` is sorted.
    fn go_forward(&mut self, mut index: usize) {
        while index + 1 < self.base.len()
            && self
                .cmp
                .precedes(self.base.elem(index + 1), self.base.elem(index))
        {
            self.base.swap(index, index + 1);
            index += 1;
        }
    }

    /// Bubble toward the front. The prefix before `index` is sorted.
    fn go_backward(&mut self, mut index: usize) {
        while index > 0
            && self
                .cmp
                .precedes(self.base.elem(index), self.base.elem(index - 1))
        {
            self.base.swap(index, index - 1);
            index -= 1;
        }
    }
}

impl<I, C, M> SortedQueue<I, C, M>
where
    I: Deref,
    I::Target: Slotted<M> + fmt::Display,
    C: Precedence<I::Target>,
{
    /// Diagnostic rendering in sorted order, filtered by `filter`.
    ///
    /// The backing sequence is already sorted, so this is a plain filtered
    /// walk.
    pub fn display_sorted<F>(&self, filter: F) -> String
    where
        F: Fn(&I::Target) -> bool,
    {
        use core::fmt::Write as _;
        let mut out = String::new();
        for elem in self.iter().filter(|e| filter(e)) {
            if !out.is_empty() {
                out.push_str(", ");
            }
            let _ = write!(out, "{elem}");
        }
        out
    }
}

impl<I, C, M> Default for SortedQueue<I, C, M>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<I, C, M> fmt::Display for SortedQueue<I, C, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}
