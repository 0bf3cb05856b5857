//! Storage allocation strategies.

/// Supplies and reclaims the slot storage of a queue.
///
/// Storage is an owned, bounds-tracked slice whose every slot holds a valid
/// value, so growth and release are ordinary safe moves. Queues hand every
/// allocation back through [`deallocate`](Allocator::deallocate) exactly
/// once, either when they grow or when they are dropped.
pub trait Allocator {
    /// Returns storage for exactly `capacity` slots.
    fn allocate<T: Default>(&self, capacity: usize) -> Box<[T]>;

    /// Releases storage previously returned by `allocate`.
    #[inline]
    fn deallocate<T>(&self, storage: Box<[T]>) {
        drop(storage);
    }
}

/// The global heap, filling fresh slots with `T::default()`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Global;

impl Allocator for Global {
    #[inline]
    fn allocate<T: Default>(&self, capacity: usize) -> Box<[T]> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        slots.into_boxed_slice()
    }
}

#[cfg(test)]
pub(crate) mod counting {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{Allocator, Global};

    /// Records every allocation and release, for leak and double-free checks.
    #[derive(Clone, Default)]
    pub struct Counting {
        pub allocated: Rc<Cell<usize>>,
        pub released: Rc<Cell<usize>>,
        pub slots: Rc<Cell<usize>>,
    }

    impl Allocator for Counting {
        fn allocate<T: Default>(&self, capacity: usize) -> Box<[T]> {
            self.allocated.set(self.allocated.get() + 1);
            self.slots.set(self.slots.get() + capacity);
            Global.allocate(capacity)
        }

        fn deallocate<T>(&self, storage: Box<[T]>) {
            self.released.set(self.released.get() + 1);
            self.slots.set(self.slots.get() - storage.len());
            drop(storage);
        }
    }
}
