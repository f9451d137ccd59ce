//! Indirect intrusive priority queues for multi-ordering QoS schedulers.
//!
//! Every container in this crate stores *handles* (`Box<T>`, `Rc<T>`,
//! `&T`) to elements that embed their own position bookkeeping. The key
//! insight: when the element knows where it sits, a live reference can be
//! promoted, demoted, or removed without scanning.
//!
//! # Design Philosophy
//!
//! Traditional priority queues hide element positions:
//!
//! ```text
//! BinaryHeap<T>   - owns values, no removal from the middle
//! BTreeMap<K, V>  - removal needs the key, keys must be unique
//! ```
//!
//! This crate inverts the model:
//!
//! ```text
//! Element   - carries a PosSlot per container it lives in
//! Handle    - any Deref to the element; identity, not value, equality
//! Container - dense Vec of handles, rewrites slots on every move
//! ```
//!
//! Benefits:
//! - **O(1) removal by reference**: the slot says where the element is
//! - **External key mutation**: change a key, then `promote`/`demote`/
//!   `adjust` - no rebuild
//! - **Multiple simultaneous orderings**: one element set, up to three
//!   extremal views, or several containers sharing elements via markers
//! - **Ownership-polymorphic**: exclusive (`Box`), shared (`Rc`), or
//!   borrowed (`&T`) handles, one code path
//!
//! # Containers
//!
//! | Type | Orderings | Maintenance | Push | Pop | Remove |
//! |------|-----------|-------------|------|-----|--------|
//! | [`IndirectVec`] | none | - | O(1) | O(1) | O(1) |
//! | [`Heap`] | 1 | sift | O(log n) | O(log n) | O(log n) |
//! | [`MultiTop`] | 3 | full rescan | O(n) | O(n) | O(n) |
//! | [`MultiVec`] | 3 (selector) | full rescan | O(n) | O(n) | O(n) |
//! | [`SortedQueue`] | 1 (fully sorted) | local bubble | O(k) | O(n) | O(n-i) |
//! | [`ScanQueue`] | 1 (min only) | min rescan | O(1) | O(n) | O(n) |
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use intruq::{Heap, PosSlot, Slotted};
//!
//! struct Request {
//!     deadline: u64,
//!     pos: PosSlot,
//! }
//!
//! impl Slotted for Request {
//!     fn slot(&self) -> &PosSlot {
//!         &self.pos
//!     }
//! }
//!
//! let mut heap = Heap::new(|a: &Request, b: &Request| a.deadline < b.deadline);
//!
//! let r1 = Rc::new(Request { deadline: 30, pos: PosSlot::new() });
//! let r2 = Rc::new(Request { deadline: 10, pos: PosSlot::new() });
//!
//! heap.push(Rc::clone(&r1));
//! heap.push(Rc::clone(&r2));
//!
//! assert_eq!(heap.peek().unwrap().deadline, 10);
//!
//! // Cancellation: O(1) locate, O(log n) restore.
//! heap.remove(&r1);
//! assert_eq!(heap.len(), 1);
//! ```
//!
//! # Concurrency
//!
//! Single-threaded by construction: [`PosSlot`] is interior-mutable
//! (`Cell`), so slotted elements are `!Sync` and concurrent sharing is
//! rejected at compile time. Wrap the whole container in external mutual
//! exclusion if another thread may mutate it.
//!
//! # Errors
//!
//! Precondition violations (out-of-range index, foreign handle) panic -
//! they are caller bugs, not runtime conditions. The only recoverable
//! failure is backing-storage growth failure, reported by the `try_push`
//! family as [`PushError`].

#![warn(missing_docs)]

pub mod base;
pub mod handle;
pub mod heap;
pub mod linear;
pub mod multi_vec;
pub mod order;
pub mod rescan;
pub mod slot;
pub mod sorted;

pub use base::{IndirectVec, PushError};
pub use handle::Handle;
pub use heap::Heap;
pub use linear::MultiTop;
pub use multi_vec::{MultiVec, TopKind};
pub use order::{MaxFirst, MinFirst, Precedence};
pub use rescan::ScanQueue;
pub use slot::{PosSlot, Primary, Slotted};
pub use sorted::SortedQueue;
