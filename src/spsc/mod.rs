//! Bounded single-producer/single-consumer queue.
//!
//! # Design
//!
//! The queue keeps the deque's ring layout but never grows on its own: a push
//! into a full ring is rejected with [`CapacityError`] and the element is
//! handed back. Two counters track the live window:
//!
//! - `head` is advanced only by the consumer;
//! - `tail` is advanced only by the producer.
//!
//! Both run modulo `2 * capacity`, so `tail - head` tells an empty ring
//! (`0`) from a full one (`capacity`) without sacrificing a slot. The slot
//! of a counter is `counter % capacity`.
//!
//! # Ordering
//!
//! ```text
//! producer writes slot, then Release-stores tail  ->  consumer Acquire-loads tail, then reads slot
//! consumer takes slot, then Release-stores head   ->  producer Acquire-loads head, then writes slot
//! ```
//!
//! Only loads and stores are used; there is no compare-and-swap. The single
//! producer and single consumer are enforced by the types: [`split`] hands
//! out exactly one [`Producer`] and one [`Consumer`], neither is `Clone`, and
//! their mutating operations take `&mut self`.
//!
//! [`split`]: SpscQueue::split

use std::cmp;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;

use crossbeam_utils::CachePadded;

use crate::allocator::{Allocator, Global};
use crate::cursor::Cursor;
use crate::error::{CapacityError, Error, Result};
use crate::iter::Iter;
use crate::logic::copy::relocate;
use crate::logic::{CircularBuffer, CircularBufferMut};
use crate::utils::count;
use crate::DEFAULT_CAPACITY;

mod split;
mod sync;

pub use self::split::{Consumer, Producer, ReuniteError};

use self::sync::{AtomicUsize, Ordering, Slot};

/// Slot storage and the two counters, shared by the split halves.
///
/// # Invariants
///
/// - `head` and `tail` are in `[0, 2 * capacity)`.
/// - Slots in the window `[head, tail)` hold live elements; the producer
///   only writes outside it and the consumer only reads inside it.
/// - Only the producer stores `tail`; only the consumer stores `head`.
pub(crate) struct Ring<T, A: Allocator> {
    slots: Box<[Slot<T>]>,
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    alloc: A,
}

// SAFETY: the head/tail protocol gives the producer and the consumer
// disjoint slots, so sharing the ring only ever moves `T` values between
// threads.
unsafe impl<T: Send, A: Allocator + Sync> Sync for Ring<T, A> {}

impl<T: Default, A: Allocator> Ring<T, A> {
    fn with_capacity_in(capacity: usize, alloc: A) -> Ring<T, A> {
        Ring {
            slots: alloc.allocate(cmp::max(capacity, 1)),
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            alloc,
        }
    }
}

impl<T, A: Allocator> Ring<T, A> {
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Next value of a counter.
    #[inline]
    pub(crate) fn advance(&self, counter: usize) -> usize {
        (counter + 1) % (self.capacity() * 2)
    }

    #[inline]
    pub(crate) fn count(&self, head: usize, tail: usize) -> usize {
        count(head, tail, self.capacity())
    }

    /// Shared reference to the value in the slot of `counter`.
    ///
    /// # Safety
    ///
    /// No other thread may write the slot while the reference lives.
    #[inline]
    pub(crate) unsafe fn slot(&self, counter: usize) -> &T {
        self.slots[counter % self.capacity()].with(|p| &*p)
    }

    /// Stores `element` in the slot of `counter`, dropping the old value.
    ///
    /// # Safety
    ///
    /// The caller must be the only party touching the slot.
    #[inline]
    pub(crate) unsafe fn write(&self, counter: usize, element: T) {
        self.slots[counter % self.capacity()].with_mut(|p| *p = element)
    }

    /// Moves the value out of the slot of `counter`, leaving the default.
    ///
    /// # Safety
    ///
    /// The caller must be the only party touching the slot.
    #[inline]
    pub(crate) unsafe fn take(&self, counter: usize) -> T
        where T: Default
    {
        self.slots[counter % self.capacity()].with_mut(|p| mem::take(&mut *p))
    }

    /// Best-effort length: exact for the owner of either counter, possibly
    /// stale for anyone else.
    #[inline]
    pub(crate) fn observed_len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        self.count(head, tail)
    }

    #[inline]
    pub(crate) fn head_counter(&self) -> &AtomicUsize {
        &self.head
    }

    #[inline]
    pub(crate) fn tail_counter(&self) -> &AtomicUsize {
        &self.tail
    }
}

impl<T, A: Allocator> Drop for Ring<T, A> {
    fn drop(&mut self) {
        let storage = mem::take(&mut self.slots);
        self.alloc.deallocate(storage);
    }
}

/// A bounded FIFO queue for one producer thread and one consumer thread.
///
/// While unsplit, the queue is an ordinary single-owner value: every mutator
/// takes `&mut self`, and the accessors borrow it. [`split`] turns it into a
/// [`Producer`] and a [`Consumer`] that can be moved to different threads;
/// [`Producer::reunite`] turns them back.
///
/// The capacity only changes through [`reserve`], which needs the unsplit
/// queue, so the ring never grows under concurrent use.
///
/// # Examples
///
/// ```
/// use ringdeque::SpscQueue;
///
/// let mut queue = SpscQueue::with_capacity(2);
/// queue.push_back(1).unwrap();
/// queue.push_back(2).unwrap();
/// assert!(queue.is_full());
/// assert_eq!(queue.push_back(3).unwrap_err().into_inner(), 3);
/// assert_eq!(queue.pop_front(), Ok(1));
/// ```
///
/// [`split`]: SpscQueue::split
/// [`reserve`]: SpscQueue::reserve
pub struct SpscQueue<T, A: Allocator = Global> {
    ring: Ring<T, A>,
    // shared access hands out `&T`
    _marker: PhantomData<T>,
}

impl<T: Default> SpscQueue<T> {
    /// Creates an empty queue with `DEFAULT_CAPACITY` slots.
    #[inline]
    pub fn new() -> SpscQueue<T> {
        SpscQueue::new_in(Global)
    }

    /// Creates an empty queue with `capacity` slots (at least one).
    #[inline]
    pub fn with_capacity(capacity: usize) -> SpscQueue<T> {
        SpscQueue::with_capacity_in(capacity, Global)
    }
}

impl<T: Default, A: Allocator> SpscQueue<T, A> {
    /// Creates an empty queue whose storage comes from `alloc`.
    #[inline]
    pub fn new_in(alloc: A) -> SpscQueue<T, A> {
        SpscQueue::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates an empty queue with `capacity` slots (at least one) taken from
    /// `alloc`.
    #[inline]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> SpscQueue<T, A> {
        SpscQueue::from_ring(Ring::with_capacity_in(capacity, alloc))
    }

    /// Appends an element to the back.
    ///
    /// # Errors
    ///
    /// Returns the element inside a [`CapacityError`] when the queue is
    /// full. Nothing is overwritten.
    pub fn push_back(&mut self, element: T) -> std::result::Result<(), CapacityError<T>> {
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Relaxed);
        if self.ring.count(head, tail) == self.capacity() {
            return Err(CapacityError { element });
        }
        let capacity = self.capacity();
        *self.ring.slots[tail % capacity].get_mut() = element;
        let tail = self.ring.advance(tail);
        self.ring.tail.store(tail, Ordering::Relaxed);
        Ok(())
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the queue is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Relaxed);
        if head == tail {
            return Err(Error::EmptyQueue);
        }
        let capacity = self.capacity();
        let element = mem::take(self.ring.slots[head % capacity].get_mut());
        let head = self.ring.advance(head);
        self.ring.head.store(head, Ordering::Relaxed);
        Ok(element)
    }

    /// Grows the storage to `capacity` slots. Does nothing if the queue
    /// already has at least that many.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::SpscQueue;
    ///
    /// let mut queue = SpscQueue::with_capacity(1);
    /// queue.push_back('a').unwrap();
    /// queue.reserve(4);
    /// queue.push_back('b').unwrap();
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        let old_capacity = self.capacity();
        if capacity <= old_capacity {
            return;
        }

        let len = CircularBuffer::len(self);
        let mut fresh: Box<[Slot<T>]> = self.ring.alloc.allocate(capacity);
        relocate(self, &mut fresh[..], Slot::get_mut);
        let old = mem::replace(&mut self.ring.slots, fresh);
        self.ring.alloc.deallocate(old);
        self.ring.head.store(0, Ordering::Relaxed);
        self.ring.tail.store(len, Ordering::Relaxed);

        trace_event!(
            old_capacity,
            new_capacity = capacity,
            len,
            "spsc storage reallocated"
        );
    }

    /// Removes every element. The storage is kept; every slot it frees
    /// holds `T::default()` afterwards.
    pub fn clear(&mut self) {
        for i in 0..CircularBuffer::len(self) {
            let p = self.physical(i);
            *self.ring.slots[p].get_mut() = T::default();
        }
        self.ring.head.store(0, Ordering::Relaxed);
        self.ring.tail.store(0, Ordering::Relaxed);
    }
}

impl<T, A: Allocator> SpscQueue<T, A> {
    #[inline]
    fn from_ring(ring: Ring<T, A>) -> SpscQueue<T, A> {
        SpscQueue { ring, _marker: PhantomData }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        CircularBuffer::len(self)
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a push would be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns the allocator backing the queue.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.ring.alloc
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the queue is empty.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.get(0).ok_or(Error::EmptyQueue)
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the queue is empty.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        match self.len() {
            0 => Err(Error::EmptyQueue),
            len => Ok(self.slot(self.physical(len - 1))),
        }
    }

    /// Retrieves the element at logical `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            Some(self.slot(self.physical(index)))
        } else {
            None
        }
    }

    /// Checked access to the element at logical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.get(index).ok_or(Error::out_of_range(index, len))
    }

    /// Returns a front-to-back iterator.
    #[inline]
    pub fn iter(&self) -> Iter<Self> {
        Iter::new(self)
    }

    /// Cursor at logical index 0.
    #[inline]
    pub fn begin(&self) -> Cursor<Self> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<Self> {
        Cursor::new(self, self.len())
    }

    /// Splits the queue into its producer and consumer halves.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::thread;
    /// use ringdeque::SpscQueue;
    ///
    /// let (mut producer, mut consumer) = SpscQueue::with_capacity(4).split();
    /// let sender = thread::spawn(move || {
    ///     for i in 0..100 {
    ///         while producer.push_back(i).is_err() {
    ///             thread::yield_now();
    ///         }
    ///     }
    ///     producer
    /// });
    ///
    /// let mut received = Vec::new();
    /// while received.len() < 100 {
    ///     match consumer.pop_front() {
    ///         Ok(v) => received.push(v),
    ///         Err(_) => thread::yield_now(),
    ///     }
    /// }
    /// assert!(received.into_iter().eq(0..100));
    ///
    /// let producer = sender.join().unwrap();
    /// let queue = producer.reunite(consumer).unwrap();
    /// assert!(queue.is_empty());
    /// ```
    pub fn split(self) -> (Producer<T, A>, Consumer<T, A>) {
        trace_event!(capacity = self.capacity(), len = self.len(), "spsc queue split");
        split::split(self.ring)
    }
}

impl<T, A: Allocator> CircularBuffer for SpscQueue<T, A> {
    type Item = T;

    #[inline]
    fn array_len(&self) -> usize {
        self.ring.capacity()
    }

    #[inline]
    fn head(&self) -> usize {
        self.ring.head.load(Ordering::Relaxed) % self.ring.capacity()
    }

    #[inline]
    fn len(&self) -> usize {
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Relaxed);
        self.ring.count(head, tail)
    }

    #[inline]
    fn slot(&self, physical: usize) -> &T {
        // SAFETY: every mutator of an unsplit queue takes `&mut self`, so no
        // write can overlap this shared borrow.
        unsafe { self.ring.slot(physical) }
    }

    #[inline]
    fn storage_id(&self) -> usize {
        self.ring.slots.as_ptr() as usize
    }
}

impl<T, A: Allocator> CircularBufferMut for SpscQueue<T, A> {
    #[inline]
    fn slot_mut(&mut self, physical: usize) -> &mut T {
        self.ring.slots[physical].get_mut()
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.ring.slots.swap(a, b);
    }

    fn set_head(&mut self, head: usize) {
        let len = CircularBuffer::len(self);
        let span = self.ring.capacity() * 2;
        self.ring.head.store(head, Ordering::Relaxed);
        self.ring.tail.store((head + len) % span, Ordering::Relaxed);
    }

    fn set_len(&mut self, len: usize) {
        let head = self.ring.head.load(Ordering::Relaxed);
        let span = self.ring.capacity() * 2;
        self.ring.tail.store((head + len) % span, Ordering::Relaxed);
    }
}

impl<T: Default> Default for SpscQueue<T> {
    #[inline]
    fn default() -> SpscQueue<T> {
        SpscQueue::new()
    }
}

impl<T, A> Clone for SpscQueue<T, A>
    where T: Clone + Default,
          A: Allocator + Clone
{
    fn clone(&self) -> SpscQueue<T, A> {
        let mut queue = SpscQueue::with_capacity_in(self.capacity(), self.ring.alloc.clone());
        for elt in self.iter() {
            // same capacity, so every element fits
            let _ = queue.push_back(elt.clone());
        }
        queue
    }
}

/// Unchecked positional access through the ring; see [`SpscQueue::at`] for
/// the checked form.
impl<T, A: Allocator> Index<usize> for SpscQueue<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.slot(self.physical(index))
    }
}

impl<T: Default> From<Vec<T>> for SpscQueue<T> {
    /// Capacity is twice the number of elements, and at least one.
    fn from(values: Vec<T>) -> SpscQueue<T> {
        values.into_iter().collect()
    }
}

impl<T: Default> std::iter::FromIterator<T> for SpscQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut queue = SpscQueue::with_capacity(cmp::max(values.len() * 2, 1));
        for elt in values {
            let _ = queue.push_back(elt);
        }
        queue
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a SpscQueue<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, SpscQueue<T, A>>;

    fn into_iter(self) -> Iter<'a, SpscQueue<T, A>> {
        self.iter()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for SpscQueue<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Diagnostic rendering with the physical slots of both counters:
/// `front = 0 end = 3 [ 1 2 3 ]`.
impl<T: fmt::Display, A: Allocator> fmt::Display for SpscQueue<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let capacity = self.capacity();
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Relaxed);
        write!(f, "front = {} end = {} [ ", head % capacity, tail % capacity)?;
        for elt in self.iter() {
            write!(f, "{} ", elt)?;
        }
        f.write_str("]")
    }
}
