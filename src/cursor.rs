//! Random-access position within a queue.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Index, Sub, SubAssign};
use std::ptr;

use crate::logic::CircularBuffer;
use crate::utils::wrap_offset;

/// A logical position inside a queue, bound to the snapshot it was taken
/// from.
///
/// A cursor borrows its queue, so the queue cannot change while the cursor
/// exists. Cursors remember the queue they borrow along with its storage
/// identity, capacity, length and front slot; two cursors are only equal or
/// ordered when all of these match, so cursors over different queues (or a
/// queue and its clone) compare unequal and unordered.
///
/// Dereferencing (`*cursor`, `cursor[offset]`) does not check the position
/// against the length: the position is mapped through the ring and may land
/// on a stale slot. [`get`](Cursor::get) is the checked form.
///
/// # Examples
///
/// ```
/// use ringdeque::Deque;
///
/// let deque: Deque<_> = vec![1, 2, 3, 4, 5].into();
/// let mut it = deque.begin();
/// assert_eq!(*it, 1);
/// it += 2;
/// assert_eq!(*it, 3);
/// assert_eq!(it[1], 4);
/// assert_eq!(deque.end() - it, 3);
/// assert!(it < deque.end());
/// ```
pub struct Cursor<'a, B: CircularBuffer + ?Sized + 'a> {
    ring: &'a B,
    storage: usize,
    capacity: usize,
    len: usize,
    head: usize,
    index: usize,
}

impl<'a, B: CircularBuffer + ?Sized> Cursor<'a, B> {
    #[inline]
    pub(crate) fn new(ring: &'a B, index: usize) -> Cursor<'a, B> {
        Cursor {
            ring,
            storage: ring.storage_id(),
            capacity: ring.array_len(),
            len: ring.len(),
            head: ring.head(),
            index,
        }
    }

    /// Logical index of the position, as accepted by `insert` and `erase`.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the element under the cursor, or `None` when the position is
    /// outside the snapshot's live range.
    #[inline]
    pub fn get(&self) -> Option<&'a B::Item> {
        if self.index < self.len {
            Some(self.slot(self.index))
        } else {
            None
        }
    }

    /// Steps forward and returns the cursor (pre-increment).
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        self.index += 1;
        self
    }

    /// Steps backward and returns the cursor (pre-decrement).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at index 0.
    #[inline]
    pub fn retreat(&mut self) -> &mut Self {
        self.index = self.offset(-1);
        self
    }

    /// Steps forward and returns the position it left (post-increment).
    #[inline]
    pub fn post_advance(&mut self) -> Self {
        let old = *self;
        self.index += 1;
        old
    }

    /// Steps backward and returns the position it left (post-decrement).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at index 0.
    #[inline]
    pub fn post_retreat(&mut self) -> Self {
        let old = *self;
        self.index = self.offset(-1);
        old
    }

    /// Returns `true` if both cursors were taken from the same queue state.
    #[inline]
    pub fn same_snapshot(&self, other: &Cursor<B>) -> bool {
        ptr::eq(self.ring, other.ring)
            && self.storage == other.storage
            && self.capacity == other.capacity
            && self.len == other.len
            && self.head == other.head
    }

    /// Signed distance `self - other`, or `None` across snapshots.
    #[inline]
    pub fn distance(&self, other: &Cursor<B>) -> Option<isize> {
        if self.same_snapshot(other) {
            Some(self.index as isize - other.index as isize)
        } else {
            None
        }
    }

    #[inline]
    fn offset(&self, by: isize) -> usize {
        match self.index.checked_add_signed(by) {
            Some(index) => index,
            None => panic!("cursor moved before the front: index {} offset {}", self.index, by),
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> &'a B::Item {
        let ring = self.ring;
        ring.slot(wrap_offset(self.head, index, self.capacity))
    }
}

impl<'a, B: CircularBuffer + ?Sized> Clone for Cursor<'a, B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, B: CircularBuffer + ?Sized> Copy for Cursor<'a, B> {}

impl<'a, B: CircularBuffer + ?Sized> Deref for Cursor<'a, B> {
    type Target = B::Item;

    #[inline]
    fn deref(&self) -> &B::Item {
        self.slot(self.index)
    }
}

impl<'a, B: CircularBuffer + ?Sized> Index<isize> for Cursor<'a, B> {
    type Output = B::Item;

    #[inline]
    fn index(&self, offset: isize) -> &B::Item {
        self.slot(self.offset(offset))
    }
}

impl<'a, B: CircularBuffer + ?Sized> AddAssign<isize> for Cursor<'a, B> {
    #[inline]
    fn add_assign(&mut self, by: isize) {
        self.index = self.offset(by);
    }
}

impl<'a, B: CircularBuffer + ?Sized> SubAssign<isize> for Cursor<'a, B> {
    #[inline]
    fn sub_assign(&mut self, by: isize) {
        self.index = self.offset(-by);
    }
}

impl<'a, B: CircularBuffer + ?Sized> Add<isize> for Cursor<'a, B> {
    type Output = Cursor<'a, B>;

    #[inline]
    fn add(mut self, by: isize) -> Cursor<'a, B> {
        self += by;
        self
    }
}

impl<'a, B: CircularBuffer + ?Sized> Add<Cursor<'a, B>> for isize {
    type Output = Cursor<'a, B>;

    #[inline]
    fn add(self, cursor: Cursor<'a, B>) -> Cursor<'a, B> {
        cursor + self
    }
}

impl<'a, B: CircularBuffer + ?Sized> Sub<isize> for Cursor<'a, B> {
    type Output = Cursor<'a, B>;

    #[inline]
    fn sub(mut self, by: isize) -> Cursor<'a, B> {
        self -= by;
        self
    }
}

/// Signed distance between the logical indices. Meaningful only for cursors
/// of the same snapshot; see [`Cursor::distance`] for the checked form.
impl<'a, B: CircularBuffer + ?Sized> Sub<Cursor<'a, B>> for Cursor<'a, B> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Cursor<'a, B>) -> isize {
        self.index as isize - other.index as isize
    }
}

impl<'a, B: CircularBuffer + ?Sized> PartialEq for Cursor<'a, B> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_snapshot(other) && self.index == other.index
    }
}

impl<'a, B: CircularBuffer + ?Sized> PartialOrd for Cursor<'a, B> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_snapshot(other) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl<'a, B: CircularBuffer + ?Sized> fmt::Debug for Cursor<'a, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.len)
            .field("head", &self.head)
            .field("capacity", &self.capacity)
            .finish()
    }
}
