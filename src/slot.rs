//! Embedded position slots and the capability contract for stored elements.
//!
//! Every element stored in one of this crate's containers carries a
//! [`PosSlot`]: a single `usize` of bookkeeping that always equals the
//! element's current index in the container's backing vector. The container
//! rewrites it on every structural move, which is what makes removal by
//! reference O(1) - no scan is ever needed to locate an element.
//!
//! Slot values are meaningless to callers. Reads and writes are
//! crate-private, so the only code that can move an element is container
//! code; callers can merely ask [`PosSlot::is_queued`].

use core::cell::Cell;
use core::fmt;

/// Sentinel stored in a slot that no container currently tracks.
pub(crate) const DETACHED: usize = usize::MAX;

/// An element's embedded position bookkeeping.
///
/// Interior-mutable so containers can rewrite it through shared handles
/// (`Rc<T>`, `&T`). Contains a [`Cell`], which makes slotted elements
/// `!Sync`; these containers are single-threaded by construction.
///
/// # Example
///
/// ```
/// use intruq::{PosSlot, Slotted};
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
/// let req = Request { deadline: 10, pos: PosSlot::new() };
/// assert!(!req.slot().is_queued());
/// ```
pub struct PosSlot(Cell<usize>);

impl PosSlot {
    /// Creates a detached slot.
    #[inline]
    pub const fn new() -> Self {
        Self(Cell::new(DETACHED))
    }

    /// Returns `true` if a container currently tracks this slot.
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.0.get() != DETACHED
    }

    #[inline]
    pub(crate) fn get(&self) -> usize {
        self.0.get()
    }

    #[inline]
    pub(crate) fn set(&self, index: usize) {
        self.0.set(index);
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.0.set(DETACHED);
    }
}

impl Default for PosSlot {
    fn default() -> Self {
        Self::new()
    }
}

// A cloned element is not in any container; it starts detached.
impl Clone for PosSlot {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for PosSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            DETACHED => f.write_str("PosSlot(detached)"),
            index => write!(f, "PosSlot({index})"),
        }
    }
}

/// Marker-selected access to an element's embedded position slot.
///
/// An element may sit in up to three containers at once by carrying one
/// slot per container and implementing `Slotted<M>` once per marker. The
/// marker plays the role the original member-pointer parameter plays in
/// classic intrusive designs: it names *which* slot a given container uses.
///
/// # Example
///
/// ```
/// use intruq::{PosSlot, Slotted};
///
/// struct ByDeadline;
/// struct ByPriority;
///
/// struct Request {
///     deadline_pos: PosSlot,
///     priority_pos: PosSlot,
/// }
///
/// impl Slotted<ByDeadline> for Request {
///     fn slot(&self) -> &PosSlot {
///         &self.deadline_pos
///     }
/// }
///
/// impl Slotted<ByPriority> for Request {
///     fn slot(&self) -> &PosSlot {
///         &self.priority_pos
///     }
/// }
/// ```
pub trait Slotted<M = Primary> {
    /// Returns the position slot this marker selects.
    fn slot(&self) -> &PosSlot;
}

/// Default slot marker for elements that live in a single container.
#[derive(Debug, Clone, Copy, Default)]
pub struct Primary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_detached() {
        let slot = PosSlot::new();
        assert!(!slot.is_queued());
        assert_eq!(slot.get(), DETACHED);
    }

    #[test]
    fn set_and_clear() {
        let slot = PosSlot::new();
        slot.set(7);
        assert!(slot.is_queued());
        assert_eq!(slot.get(), 7);

        slot.clear();
        assert!(!slot.is_queued());
    }

    #[test]
    fn clone_detaches() {
        let slot = PosSlot::new();
        slot.set(3);

        let copy = slot.clone();
        assert!(!copy.is_queued());
        assert_eq!(slot.get(), 3);
    }

    #[test]
    fn debug_output() {
        let slot = PosSlot::new();
        assert_eq!(format!("{slot:?}"), "PosSlot(detached)");
        slot.set(5);
        assert_eq!(format!("{slot:?}"), "PosSlot(5)");
    }
}
