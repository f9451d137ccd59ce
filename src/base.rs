//! Base indirect container: a dense vector of handles with intrusive
//! position bookkeeping.
//!
//! [`IndirectVec`] is the shared substrate of every ordered container in
//! this crate. It maintains a single invariant: for each live element, the
//! position slot selected by the marker `M` equals the element's current
//! index in the backing vector. That invariant is what makes
//! [`remove`](IndirectVec::remove) O(1) - the handle's own slot says where
//! it is, no scan required.
//!
//! `IndirectVec` imposes no ordering of its own. The ordered containers
//! ([`Heap`](crate::Heap), [`MultiTop`](crate::MultiTop),
//! [`SortedQueue`](crate::SortedQueue), [`ScanQueue`](crate::ScanQueue))
//! compose it and restore their particular invariant after each base
//! mutation.

use core::fmt;
use core::fmt::Write as _;
use core::marker::PhantomData;
use core::ops::Deref;

use crate::handle::Handle;
use crate::slot::{Primary, Slotted};

/// Error returned when the backing vector cannot grow.
///
/// Carries the rejected handle so the caller keeps ownership of the
/// element. This is the only recoverable failure in the crate; every other
/// misuse is a contract violation and panics.
pub struct PushError<I> {
    handle: I,
}

impl<I> PushError<I> {
    /// Returns the handle that could not be pushed.
    pub fn into_handle(self) -> I {
        self.handle
    }
}

impl<I> fmt::Debug for PushError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushError(..)")
    }
}

impl<I> fmt::Display for PushError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backing storage growth failed")
    }
}

impl<I> std::error::Error for PushError<I> {}

/// A dense vector of handles with intrusive position slots.
///
/// Indices `0..len` are always populated; removal collapses the gap by
/// moving the last live element into the vacated index and rewriting its
/// slot.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use intruq::{IndirectVec, PosSlot, Slotted};
///
/// struct Request {
///     id: u32,
///     pos: PosSlot,
/// }
///
/// impl Slotted for Request {
///     fn slot(&self) -> &PosSlot {
///         &self.pos
///     }
/// }
///
/// let mut pending: IndirectVec<Rc<Request>> = IndirectVec::new();
///
/// let a = Rc::new(Request { id: 1, pos: PosSlot::new() });
/// let b = Rc::new(Request { id: 2, pos: PosSlot::new() });
/// pending.push(Rc::clone(&a));
/// pending.push(Rc::clone(&b));
///
/// // O(1) removal by reference, no scan
/// let removed = pending.remove(&a);
/// assert_eq!(removed.id, 1);
/// assert_eq!(pending.len(), 1);
/// ```
pub struct IndirectVec<I, M = Primary> {
    data: Vec<I>,
    _slot: PhantomData<fn() -> M>,
}

impl<I, M> IndirectVec<I, M> {
    /// Creates an empty container.
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            _slot: PhantomData,
        }
    }

    /// Creates a container with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            _slot: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the backing vector.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Iterates over the stored handles in backing order.
    #[inline]
    pub fn handles(&self) -> core::slice::Iter<'_, I> {
        self.data.iter()
    }
}

impl<I, M> IndirectVec<I, M>
where
    I: Deref,
    I::Target: Slotted<M>,
{
    /// Appends a handle, writing the new index into the element's slot.
    ///
    /// No reordering happens here; ordered containers restore their
    /// invariant afterward.
    ///
    /// # Panics
    ///
    /// Panics if the backing vector cannot grow. Use
    /// [`try_push`](Self::try_push) to handle that case.
    #[inline]
    pub fn push(&mut self, item: I) {
        if self.try_push(item).is_err() {
            panic!("backing storage growth failed");
        }
    }

    /// Appends a handle, reporting backing-storage growth failure.
    ///
    /// On failure the handle is returned inside the error and the
    /// container is unchanged.
    pub fn try_push(&mut self, item: I) -> Result<(), PushError<I>> {
        debug_assert!(
            !item.slot().is_queued(),
            "element is already in a container"
        );

        if self.data.try_reserve(1).is_err() {
            return Err(PushError { handle: item });
        }

        item.slot().set(self.data.len());
        self.data.push(item);
        Ok(())
    }

    /// Removes and returns the handle at index 0.
    ///
    /// Returns `None` if the container is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<I> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.remove_at(0))
        }
    }

    /// Removes and returns the handle at `index`.
    ///
    /// The last live element moves into the vacated index and its slot is
    /// rewritten; the removed element's slot is detached.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` - an out-of-range index is a contract
    /// violation, not a recoverable error.
    pub fn remove_at(&mut self, index: usize) -> I {
        assert!(index < self.data.len(), "index out of range");

        let item = self.data.swap_remove(index);
        item.slot().clear();
        if index < self.data.len() {
            self.data[index].slot().set(index);
        }
        item
    }

    /// Removes the element `item` refers to, in O(1) via its own slot.
    ///
    /// Returns the container's handle for the element; if that handle was
    /// the element's sole owner, dropping the return value ends the
    /// element's lifetime.
    ///
    /// # Panics
    ///
    /// Panics (debug builds diagnose precisely) if the element is not in
    /// this container.
    #[inline]
    pub fn remove(&mut self, item: &I) -> I {
        let index = self.index_of(item);
        self.remove_at(index)
    }

    /// Removes the element at `elem`'s address, in O(1) via its slot.
    ///
    /// Same contract as [`remove`](Self::remove) but keyed by element
    /// reference rather than handle.
    #[inline]
    pub fn remove_elem(&mut self, elem: &I::Target) -> I {
        let index = self.index_of_elem(elem);
        self.remove_at(index)
    }

    /// Returns the element at index 0 without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&I::Target> {
        self.data.first().map(|h| &**h)
    }

    /// Returns the handle at index 0 without removing it.
    #[inline]
    pub fn peek_handle(&self) -> Option<&I> {
        self.data.first()
    }

    /// Linear forward scan for a handle by identity.
    ///
    /// Returns the backing index, or `None` if absent.
    pub fn find(&self, item: &I) -> Option<usize> {
        self.data.iter().position(|h| h.same(item))
    }

    /// Linear scan for a handle by identity, starting from the tail.
    pub fn rfind(&self, item: &I) -> Option<usize> {
        self.data.iter().rposition(|h| h.same(item))
    }

    /// Linear forward scan for an element by address.
    pub fn find_elem(&self, elem: &I::Target) -> Option<usize> {
        self.data.iter().position(|h| h.refers_to(elem))
    }

    /// Linear scan for an element by address, starting from the tail.
    pub fn rfind_elem(&self, elem: &I::Target) -> Option<usize> {
        self.data.iter().rposition(|h| h.refers_to(elem))
    }

    /// Returns `true` if a handle to the same element is present.
    #[inline]
    pub fn contains(&self, item: &I) -> bool {
        self.find(item).is_some()
    }

    /// Iterates over the elements in backing (not sorted) order.
    ///
    /// Structural mutation while an iterator is live is rejected at
    /// compile time by the borrow checker.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &I::Target> {
        self.data.iter().map(|h| &**h)
    }

    /// Removes every element, detaching all slots.
    pub fn clear(&mut self) {
        for item in &self.data {
            item.slot().clear();
        }
        self.data.clear();
    }

    /// Element at `index`. Caller guarantees `index < len`.
    #[inline]
    pub(crate) fn elem(&self, index: usize) -> &I::Target {
        &*self.data[index]
    }

    /// Handle at `index`. Caller guarantees `index < len`.
    #[inline]
    pub(crate) fn handle(&self, index: usize) -> &I {
        &self.data[index]
    }

    /// Swaps two live entries and rewrites both slots.
    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.data[a].slot().set(a);
        self.data[b].slot().set(b);
    }

    /// Reads `item`'s index out of its slot, validating it in debug builds.
    #[inline]
    pub(crate) fn index_of(&self, item: &I) -> usize {
        let index = item.slot().get();
        debug_assert!(
            index < self.data.len() && self.data[index].same(item),
            "handle does not belong to this container"
        );
        index
    }

    /// Reads `elem`'s index out of its slot, validating it in debug builds.
    #[inline]
    pub(crate) fn index_of_elem(&self, elem: &I::Target) -> usize {
        let index = elem.slot().get();
        debug_assert!(
            index < self.data.len() && self.data[index].refers_to(elem),
            "element is not in this container"
        );
        index
    }
}

impl<I, M> IndirectVec<I, M>
where
    I: Deref,
    I::Target: Slotted<M> + fmt::Display,
{
    /// Diagnostic rendering in the order successive [`pop`](Self::pop)s
    /// would drain the container, filtered by `filter`.
    ///
    /// Runs on a scratch index vector; live slots are never touched, so
    /// shared handles stay coherent and the container is unchanged.
    pub fn display_sorted<F>(&self, filter: F) -> String
    where
        F: Fn(&I::Target) -> bool,
    {
        let mut order: Vec<usize> = (0..self.data.len()).collect();
        let mut out = String::new();
        while !order.is_empty() {
            // Mirrors pop(): take index 0, move the last entry into it.
            let index = order.swap_remove(0);
            let elem = self.elem(index);
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

impl<I, M> Default for IndirectVec<I, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, M> fmt::Display for IndirectVec<I, M>
where
    I: Deref,
    I::Target: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in &self.data {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", &**item)?;
            first = false;
        }
        Ok(())
    }
}
