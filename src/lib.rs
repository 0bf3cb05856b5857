//! A growable ring buffer deque, plus a bounded single-producer,
//! single-consumer queue on the same storage layout.
//!
//! [`Deque`] has `O(1)` amortized inserts and removals at both ends and
//! `O(1)` indexing like a vector. Elements live in one allocation; the
//! element at logical index `i` sits in slot `(front + i) % capacity`. When
//! a push fills the last free slot the storage doubles.
//!
//! [`SpscQueue`] keeps the same layout with a fixed capacity and atomic
//! head/tail counters. It can be [split](SpscQueue::split) into a
//! [`Producer`] and a [`Consumer`] that run on two threads.
//!
//! Storage comes from an [`Allocator`]; [`Global`] is the default. Slots
//! outside the live window always hold a valid value, which is why
//! allocation needs `T: Default`.
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Forwards to `odds/std`; the crate itself always uses `std` for
//!     heap storage and `Arc`
//!
//!
//! - `trace`
//!   - Optional, enabled by default
//!   - Emits `tracing` events (target `ringdeque`) when storage is
//!     reallocated and when an SPSC queue is split or reunited
//!
//! Building with `RUSTFLAGS="--cfg loom"` swaps the SPSC atomics, slot
//! cells and `Arc` for `loom`'s model-checked ones.
//!
//! # Examples
//! ```
//! use ringdeque::Deque;
//!
//! let mut vector = Deque::with_capacity(8);
//! assert_eq!(vector.capacity(), 8);
//! assert_eq!(vector.len(), 0);
//!
//! vector.push_back(1);
//! vector.push_back(2);
//! assert_eq!(vector.len(), 2);
//!
//! assert_eq!(vector.pop_front(), Ok(1));
//! assert_eq!(vector.pop_front(), Ok(2));
//! assert!(vector.pop_front().is_err());
//! ```
//!
//! # Insert & Erase
//! ```
//! use ringdeque::Deque;
//!
//! let mut vector: Deque<_> = vec![1, 2, 3, 4, 5].into();
//!
//! vector.insert(2, 99).unwrap();
//! assert_eq!(vector, vec![1, 2, 99, 3, 4, 5]);
//!
//! vector.erase_at(2).unwrap();
//! vector.erase(3..).unwrap();
//! assert_eq!(vector, vec![1, 2, 3]);
//! ```
//!
//! # Cursor
//! ```
//! use ringdeque::Deque;
//!
//! let vector: Deque<_> = (0..5).collect();
//!
//! let mut it = vector.begin();
//! let mut seen = Vec::new();
//! while it != vector.end() {
//!     seen.push(*it);
//!     it.advance();
//! }
//! assert_eq!(seen, vec![0, 1, 2, 3, 4]);
//! ```
//!
//! # Bounded queue
//! ```
//! use ringdeque::SpscQueue;
//!
//! let mut queue = SpscQueue::with_capacity(2);
//! queue.push_back("a").unwrap();
//! queue.push_back("b").unwrap();
//! assert!(queue.push_back("c").is_err());
//! assert_eq!(queue.to_string(), "front = 0 end = 0 [ a b ]");
//! ```

#![deny(missing_docs)]

/// Emits a `tracing` trace event under the crate's target when the `trace`
/// feature is on.
macro_rules! trace_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "trace")]
        {
            tracing::trace!(target: "ringdeque", $($arg)+);
        }
    };
}

mod allocator;
mod cursor;
mod deque;
pub mod error;
mod iter;
mod logic;
mod spsc;
mod utils;

pub use odds::IndexRange as RangeArgument;

pub use crate::allocator::{Allocator, Global};
pub use crate::cursor::Cursor;
pub use crate::deque::{Deque, IntoIter, IterMut};
pub use crate::error::{CapacityError, Error, Result};
pub use crate::iter::Iter;
pub use crate::logic::CircularBuffer;
pub use crate::spsc::{Consumer, Producer, ReuniteError, SpscQueue};

/// Capacity of queues built with `new`.
pub const DEFAULT_CAPACITY: usize = 64;
