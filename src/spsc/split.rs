use std::fmt;
use std::marker::PhantomData;

use super::sync::{Arc, Ordering};
use super::{Ring, SpscQueue};
use crate::allocator::{Allocator, Global};
use crate::error::{CapacityError, Error, Result};

pub(super) fn split<T, A: Allocator>(ring: Ring<T, A>) -> (Producer<T, A>, Consumer<T, A>) {
    let ring = Arc::new(ring);
    let producer = Producer { ring: Arc::clone(&ring) };
    let consumer = Consumer { ring, _marker: PhantomData };
    (producer, consumer)
}

/// The writing half of a split [`SpscQueue`].
///
/// Only the producer advances the tail counter. It can be moved to another
/// thread but not cloned, and pushing needs `&mut self`, so at most one
/// thread pushes at a time.
pub struct Producer<T, A: Allocator = Global> {
    ring: Arc<Ring<T, A>>,
}

impl<T, A: Allocator> Producer<T, A> {
    /// Appends an element to the back.
    ///
    /// Acquires the consumer's head to find a free slot, writes it, then
    /// publishes the new tail with release ordering.
    ///
    /// # Errors
    ///
    /// Returns the element inside a [`CapacityError`] when the ring is full.
    /// A full ring is a retry signal: the consumer frees slots over time.
    pub fn push_back(&mut self, element: T) -> std::result::Result<(), CapacityError<T>> {
        let ring = &*self.ring;
        let tail = ring.tail_counter().load(Ordering::Relaxed);
        let head = ring.head_counter().load(Ordering::Acquire);
        if ring.count(head, tail) == ring.capacity() {
            return Err(CapacityError { element });
        }

        // SAFETY: the slot lies outside [head, tail), so the consumer will
        // not touch it until the store below publishes it.
        unsafe {
            ring.write(tail, element);
        }
        ring.tail_counter().store(ring.advance(tail), Ordering::Release);
        Ok(())
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Best-effort element count; the consumer may have popped since.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.observed_len()
    }

    /// Best-effort emptiness check.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best-effort fullness check; `false` means the next push can only
    /// fail if the ring was refilled in between, which only this handle
    /// can do.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Puts the two halves back together.
    ///
    /// # Errors
    ///
    /// Returns both halves inside a [`ReuniteError`] when they were split
    /// from different queues.
    pub fn reunite(self, consumer: Consumer<T, A>) -> std::result::Result<SpscQueue<T, A>, ReuniteError<T, A>> {
        if !Arc::ptr_eq(&self.ring, &consumer.ring) {
            return Err(ReuniteError { producer: self, consumer });
        }
        drop(consumer);

        match Arc::try_unwrap(self.ring) {
            Ok(ring) => {
                trace_event!(capacity = ring.capacity(), len = ring.observed_len(), "spsc queue reunited");
                Ok(SpscQueue::from_ring(ring))
            }
            Err(_) => unreachable!("split halves are the only owners of their ring"),
        }
    }
}

impl<T, A: Allocator> fmt::Debug for Producer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// The reading half of a split [`SpscQueue`].
///
/// Only the consumer advances the head counter. References returned by
/// [`front`](Consumer::front) and [`at`](Consumer::at) borrow the consumer,
/// so their slots cannot be released while they are alive.
pub struct Consumer<T, A: Allocator = Global> {
    ring: Arc<Ring<T, A>>,
    // shared access hands out `&T`
    _marker: PhantomData<T>,
}

impl<T: Default, A: Allocator> Consumer<T, A> {
    /// Removes and returns the front element.
    ///
    /// Acquires the producer's tail to see published slots, moves the front
    /// element out, then releases the slot by publishing the new head.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if no published element is visible. This is a
    /// retry signal while the producer is still running.
    pub fn pop_front(&mut self) -> Result<T> {
        let ring = &*self.ring;
        let head = ring.head_counter().load(Ordering::Relaxed);
        let tail = ring.tail_counter().load(Ordering::Acquire);
        if head == tail {
            return Err(Error::EmptyQueue);
        }

        // SAFETY: the slot lies inside [head, tail), which the producer does
        // not write until the store below releases it.
        let element = unsafe { ring.take(head) };
        ring.head_counter().store(ring.advance(head), Ordering::Release);
        Ok(element)
    }
}

impl<T, A: Allocator> Consumer<T, A> {
    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if no published element is visible.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.at(0).map_err(|_| Error::EmptyQueue)
    }

    /// Checked access to the published element at logical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if fewer than `index + 1` elements are
    /// visible.
    pub fn at(&self, index: usize) -> Result<&T> {
        let ring = &*self.ring;
        let head = ring.head_counter().load(Ordering::Relaxed);
        let tail = ring.tail_counter().load(Ordering::Acquire);
        let len = ring.count(head, tail);
        if index >= len {
            return Err(Error::out_of_range(index, len));
        }
        // SAFETY: the slot is published, and `head` cannot move while this
        // borrow of the consumer lives.
        Ok(unsafe { ring.slot(head + index) })
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Best-effort element count; the producer may have pushed since.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.observed_len()
    }

    /// Best-effort emptiness check.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best-effort fullness check.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T, A: Allocator> fmt::Debug for Consumer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Error returned by [`Producer::reunite`] for halves of different queues.
///
/// Both halves are handed back unchanged.
#[derive(thiserror::Error)]
#[error("tried to reunite halves of different queues")]
pub struct ReuniteError<T, A: Allocator = Global> {
    /// The producer passed to `reunite`.
    pub producer: Producer<T, A>,
    /// The consumer passed to `reunite`.
    pub consumer: Consumer<T, A>,
}

impl<T, A: Allocator> fmt::Debug for ReuniteError<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ReuniteError").finish_non_exhaustive()
    }
}
