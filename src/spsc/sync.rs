//! Synchronization primitives of the queue, swapped for `loom`'s under
//! `cfg(loom)` so the model checker sees every counter and slot access.

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(not(loom))]
pub(crate) use std::sync::Arc;

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicUsize, Ordering};
#[cfg(loom)]
pub(crate) use loom::sync::Arc;

#[cfg(not(loom))]
use std::cell::UnsafeCell;

#[cfg(loom)]
use loom::cell::UnsafeCell;

/// One slot of the ring.
///
/// Shared access goes through [`with`](Slot::with) and
/// [`with_mut`](Slot::with_mut), which hand the closure a raw pointer.
pub(crate) struct Slot<T>(UnsafeCell<T>);

impl<T: Default> Default for Slot<T> {
    #[inline]
    fn default() -> Slot<T> {
        Slot(UnsafeCell::new(T::default()))
    }
}

#[cfg(not(loom))]
impl<T> Slot<T> {
    #[inline]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        f(self.0.get())
    }

    #[inline]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        f(self.0.get())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.0.get_mut()
    }
}

#[cfg(loom)]
impl<T> Slot<T> {
    #[inline]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        self.0.with(f)
    }

    #[inline]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        self.0.with_mut(f)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        // SAFETY: `&mut self` rules out any other access to the slot.
        self.0.with_mut(|p| unsafe { &mut *p })
    }
}
