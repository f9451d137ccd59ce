//! The handle capability contract.
//!
//! A handle is an indirection that resolves to exactly one element:
//! `Box<T>` (exclusive ownership), `Rc<T>` / `Arc<T>` (shared, duplicable),
//! or `&T` (borrowed). Containers only require `Deref`; [`Handle`] layers
//! identity comparison on top and is blanket-implemented for every `Deref`
//! type, so there is nothing for callers to implement.
//!
//! Handle equality is *identity*, not value: two handles are the same
//! exactly when they resolve to the same element address.

use core::ops::Deref;
use core::ptr;

/// Identity comparison for handle types.
///
/// ```
/// use std::rc::Rc;
/// use intruq::Handle;
///
/// let a = Rc::new(5u64);
/// let b = Rc::clone(&a);
/// let c = Rc::new(5u64);
///
/// assert!(a.same(&b));    // one element, two handles
/// assert!(!a.same(&c));   // equal value, different element
/// ```
pub trait Handle: Deref {
    /// Returns `true` if both handles resolve to the same element.
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(&**self, &**other)
    }

    /// Returns `true` if this handle resolves to `elem`.
    #[inline]
    fn refers_to(&self, elem: &Self::Target) -> bool {
        ptr::eq(&**self, elem)
    }
}

impl<H: Deref> Handle for H {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn boxed_identity() {
        let a = Box::new(1u32);
        let b = Box::new(1u32);
        assert!(a.same(&a));
        assert!(!a.same(&b));
        assert!(a.refers_to(&a));
    }

    #[test]
    fn shared_identity() {
        let a = Rc::new(1u32);
        let b = Rc::clone(&a);
        assert!(a.same(&b));
        assert!(b.refers_to(&a));
    }

    #[test]
    fn borrowed_identity() {
        let x = 1u32;
        let y = 1u32;
        let a: &u32 = &x;
        let b: &u32 = &x;
        let c: &u32 = &y;
        assert!(a.same(&b));
        assert!(!a.same(&c));
    }
}
