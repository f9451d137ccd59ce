//! Sift-based binary heap over indirect handles with O(1) removal by
//! reference.
//!
//! [`Heap`] keeps one ordering. Elements embed their own position via
//! [`Slotted`], so `promote`/`demote`/`adjust` after an external key change
//! and `remove` by handle all locate the element in O(1) and restore the
//! heap property in O(log n).

use core::cmp::Ordering;
use core::fmt;
use core::ops::Deref;

use crate::base::{IndirectVec, PushError};
use crate::order::Precedence;
use crate::slot::{Primary, Slotted};

/// A binary min-style heap under an arbitrary precedence predicate.
///
/// The heap property: for every index `i > 0`, the element at `i` does not
/// precede its parent.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{Heap, PosSlot, Slotted};
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
/// let mut heap = Heap::new(|a: &Request, b: &Request| a.deadline < b.deadline);
///
/// let urgent = Rc::new(Request { deadline: 10, pos: PosSlot::new() });
/// heap.push(Rc::new(Request { deadline: 70, pos: PosSlot::new() }));
/// heap.push(Rc::clone(&urgent));
/// heap.push(Rc::new(Request { deadline: 30, pos: PosSlot::new() }));
///
/// assert_eq!(heap.peek().unwrap().deadline, 10);
///
/// // Cancellation: remove by handle, no scan.
/// heap.remove(&urgent);
/// assert_eq!(heap.peek().unwrap().deadline, 30);
/// ```
pub struct Heap<I, C, M = Primary> {
    base: IndirectVec<I, M>,
    cmp: C,
}

impl<I, C, M> Heap<I, C, M> {
    /// Creates an empty heap ordered by `cmp`.
    #[inline]
    pub const fn new(cmp: C) -> Self {
        Self {
            base: IndirectVec::new(),
            cmp,
        }
    }

    /// Creates an empty heap with pre-allocated capacity.
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

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Iterates over the stored handles in backing (heap) order.
    #[inline]
    pub fn handles(&self) -> core::slice::Iter<'_, I> {
        self.base.handles()
    }
}

impl<I, C, M> Heap<I, C, M>
where
    I: Deref,
    I::Target: Slotted<M>,
    C: Precedence<I::Target>,
{
    /// Pushes a handle and sifts it up to its place.
    ///
    /// # Panics
    ///
    /// Panics if the backing vector cannot grow.
    #[inline]
    pub fn push(&mut self, item: I) {
        self.base.push(item);
        self.sift_up(self.base.len() - 1);
    }

    /// Pushes a handle, reporting backing-storage growth failure.
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        self.base.try_push(item)?;
        self.sift_up(self.base.len() - 1);
        Ok(())
    }

    /// Removes and returns the extremal element's handle.
    ///
    /// Returns `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<I> {
        if self.base.is_empty() {
            return None;
        }
        let item = self.base.remove_at(0);
        if !self.base.is_empty() {
            self.sift_down(0);
        }
        Some(item)
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

    /// Restores the heap property after `elem`'s key *decreased*.
    ///
    /// O(log n) sift toward the root from the position stored in the
    /// element's slot.
    #[inline]
    pub fn promote(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        self.sift_up(index);
    }

    /// Restores the heap property after `elem`'s key *increased*.
    #[inline]
    pub fn demote(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        self.sift_down(index);
    }

    /// Restores the heap property after `elem`'s key changed in an unknown
    /// direction.
    ///
    /// One parent comparison picks the sift direction, so only one of the
    /// two directions is ever probed.
    #[inline]
    pub fn adjust(&mut self, elem: &I::Target) {
        let index = self.base.index_of_elem(elem);
        self.sift(index);
    }

    /// Removes the element `item` refers to, in O(1) + O(log n) re-sift.
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

    /// Returns `true` if a handle to the same element is present.
    #[inline]
    pub fn contains(&self, item: &I) -> bool {
        self.base.contains(item)
    }

    /// Iterates over the elements in backing (heap) order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.base.iter()
    }

    /// Removes every element, detaching all slots.
    #[inline]
    pub fn clear(&mut self) {
        self.base.clear();
    }

    fn remove_at(&mut self, index: usize) -> I {
        let item = self.base.remove_at(index);
        // The moved-in element came from a leaf; it may violate the heap
        // property in either direction at its new position.
        if index < self.base.len() {
            self.sift(index);
        }
        item
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self
                .cmp
                .precedes(self.base.elem(index), self.base.elem(parent))
            {
                break;
            }
            self.base.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.base.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }

            // The right child wins only if it strictly precedes the left.
            let right = left + 1;
            let mut child = left;
            if right < len
                && self
                    .cmp
                    .precedes(self.base.elem(right), self.base.elem(left))
            {
                child = right;
            }

            if !self
                .cmp
                .precedes(self.base.elem(child), self.base.elem(index))
            {
                break;
            }
            self.base.swap(index, child);
            index = child;
        }
    }

    fn sift(&mut self, index: usize) {
        if index == 0 {
            // At the root only a downward violation is possible.
            self.sift_down(0);
        } else {
            let parent = (index - 1) / 2;
            if self
                .cmp
                .precedes(self.base.elem(index), self.base.elem(parent))
            {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
        }
    }
}

impl<I, C, M> Heap<I, C, M>
where
    I: Deref,
    I::Target: Slotted<M> + fmt::Display,
    C: Precedence<I::Target>,
{
    /// Diagnostic rendering in precedence order, filtered by `filter`.
    ///
    /// Equivalent to draining a copy by successive pops, but computed on
    /// borrowed references; the heap and all slots are untouched.
    pub fn display_sorted<F>(&self, filter: F) -> String
    where
        F: Fn(&I::Target) -> bool,
    {
        let mut refs: Vec<&I::Target> = self.base.iter().collect();
        refs.sort_by(|a, b| {
            if self.cmp.precedes(a, b) {
                Ordering::Less
            } else if self.cmp.precedes(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });

        let mut out = String::new();
        for elem in refs.into_iter().filter(|e| filter(e)) {
            if !out.is_empty() {
                out.push_str(", ");
            }
            use core::fmt::Write as _;
            let _ = write!(out, "{elem}");
        }
        out
    }
}

impl<I, C, M> Default for Heap<I, C, M>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<I, C, M> fmt::Display for Heap<I, C, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}
