use std::cmp;
use std::mem;

use crate::RangeArgument;

use crate::allocator::{Allocator, Global};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::logic::copy::{direct, relocate};
use crate::logic::{insert, remove, CircularBuffer, CircularBufferMut};
use crate::utils::{wrap_add, wrap_sub};
use crate::DEFAULT_CAPACITY;

mod iterator_impls;
mod trait_impls;

pub use self::iterator_impls::{IntoIter, IterMut};

/// A double-ended queue on a growable ring buffer.
///
/// Elements live in a single allocation of `capacity()` slots. The element at
/// logical index `i` sits in slot `(front + i) % capacity()`, so pushing and
/// popping at either end is `O(1)` and indexing is `O(1)`. When a push fills
/// the last free slot the storage doubles, the live elements are copied to
/// the start of the new storage in order, and the old storage is handed back
/// to the allocator.
///
/// Slots outside the live range hold `T::default()`; this is why allocation
/// needs `T: Default`. Removing an element never leaves a copy of it behind.
///
/// # Examples
///
/// ```
/// use ringdeque::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(2);
/// deque.push_back(3);
/// deque.push_front(1);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.at(1), Ok(&2));
/// assert_eq!(deque.pop_front(), Ok(1));
/// assert_eq!(deque.pop_back(), Ok(3));
/// ```
pub struct Deque<T, A: Allocator = Global> {
    buf: Box<[T]>,
    head: usize,
    len: usize,
    alloc: A,
}

impl<T: Default> Deque<T> {
    /// Creates an empty deque with room for `DEFAULT_CAPACITY` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, DEFAULT_CAPACITY};
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert_eq!(deque.capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn new() -> Deque<T> {
        Deque::new_in(Global)
    }

    /// Creates an empty deque with exactly `capacity` slots (at least one).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(10);
    /// assert_eq!(deque.capacity(), 10);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Deque<T> {
        Deque::with_capacity_in(capacity, Global)
    }
}

impl<T: Default, A: Allocator> Deque<T, A> {
    /// Creates an empty deque whose storage comes from `alloc`.
    #[inline]
    pub fn new_in(alloc: A) -> Deque<T, A> {
        Deque::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates an empty deque with `capacity` slots (at least one) taken
    /// from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Deque<T, A> {
        let buf = alloc.allocate(cmp::max(capacity, 1));
        Deque { buf, head: 0, len: 0, alloc }
    }

    /// Appends an element to the back, growing once the ring is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::with_capacity(2);
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.back(), Ok(&2));
    /// assert_eq!(deque.capacity(), 4);
    /// ```
    pub fn push_back(&mut self, element: T) {
        let tail = self.physical(self.len);
        self.buf[tail] = element;
        self.len += 1;
        self.grow_if_full();
    }

    /// Prepends an element to the front, growing once the ring is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// assert_eq!(deque.front(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, element: T) {
        self.head = wrap_sub(self.head, 1, self.capacity());
        self.buf[self.head] = element;
        self.len += 1;
        self.grow_if_full();
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque: Deque<_> = vec![1, 2].into();
    /// assert_eq!(deque.pop_front(), Ok(1));
    /// assert_eq!(deque.pop_front(), Ok(2));
    /// assert_eq!(deque.pop_front(), Err(Error::EmptyQueue));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        self.check_nonempty()?;
        let head = self.head;
        self.head = wrap_add(head, 1, self.capacity());
        self.len -= 1;
        Ok(mem::take(&mut self.buf[head]))
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque: Deque<_> = vec![1, 3].into();
    /// assert_eq!(deque.pop_back(), Ok(3));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        self.check_nonempty()?;
        self.len -= 1;
        let tail = self.physical(self.len);
        Ok(mem::take(&mut self.buf[tail]))
    }

    /// Inserts an element at logical `index`. Whichever side of `index`
    /// holds fewer elements is moved to make room.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3, 4, 5].into();
    /// let at = deque.begin() + 2;
    /// let index = at.index();
    /// deque.insert(index, 99).unwrap();
    /// assert_eq!(deque, vec![1, 2, 99, 3, 4, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        if index > self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        insert::insert(self, index, element);
        self.grow_if_full();
        Ok(())
    }

    /// Removes and returns the element at logical `index`, closing the gap
    /// from whichever side is shorter.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3].into();
    /// assert_eq!(deque.remove(1), Ok(2));
    /// assert_eq!(deque, vec![1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        let p = self.physical(index);
        let element = mem::take(&mut self.buf[p]);
        remove::erase(self, index, index + 1);
        Ok(element)
    }

    /// Grows the storage to `capacity` slots. Does nothing if the deque
    /// already has at least that many.
    ///
    /// The live elements move to slots `0..len()` of the new storage in
    /// logical order and the old storage is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<u8> = Deque::with_capacity(4);
    /// deque.reserve(100);
    /// assert_eq!(deque.capacity(), 100);
    /// deque.reserve(10);
    /// assert_eq!(deque.capacity(), 100);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        let old_capacity = self.capacity();
        if capacity <= old_capacity {
            return;
        }

        let mut fresh: Box<[T]> = self.alloc.allocate(capacity);
        relocate(self, &mut fresh[..], direct);
        let old = mem::replace(&mut self.buf, fresh);
        self.alloc.deallocate(old);
        self.head = 0;

        trace_event!(
            old_capacity,
            new_capacity = capacity,
            len = self.len,
            "deque storage reallocated"
        );
    }

    /// Resizes to `new_len` elements, filling new slots with
    /// `T::default()`.
    #[inline]
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }

    /// Resizes to `new_len` elements. Shrinking drops elements from the back;
    /// growing fills new slots with `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2].into();
    /// deque.resize(4, 7);
    /// assert_eq!(deque, vec![1, 2, 7, 7]);
    /// deque.resize(1, 0);
    /// assert_eq!(deque, vec![1]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T)
        where T: Clone
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Replaces the contents with the elements of `iter`, reusing the
    /// storage when it is large enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3].into();
    /// deque.assign(vec![7, 8]);
    /// assert_eq!(deque, vec![7, 8]);
    /// ```
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
    }

    /// Removes the logical range `range`, closing the gap from whichever
    /// side holds fewer surviving elements.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] unless `start <= end <= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = (0..8).collect();
    /// deque.erase(2..5).unwrap();
    /// assert_eq!(deque, vec![0, 1, 5, 6, 7]);
    /// deque.erase(3..).unwrap();
    /// assert_eq!(deque, vec![0, 1, 5]);
    /// assert!(deque.erase(2..9).is_err());
    /// ```
    pub fn erase<R>(&mut self, range: R) -> Result<()>
        where R: RangeArgument<usize>
    {
        let len = self.len;
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        if end > len {
            return Err(Error::out_of_range(end, len));
        }
        if start > end {
            return Err(Error::out_of_range(start, end));
        }
        remove::erase(self, start, end);
        Ok(())
    }

    /// Removes the element at logical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 99, 3].into();
    /// deque.erase_at(2).unwrap();
    /// assert_eq!(deque, vec![1, 2, 3]);
    /// ```
    pub fn erase_at(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        remove::erase(self, index, index + 1);
        Ok(())
    }

    /// Removes every element. The storage is kept; every slot it frees
    /// holds `T::default()` afterwards.
    pub fn clear(&mut self) {
        for slot in self.iter_mut() {
            *slot = T::default();
        }
        self.len = 0;
        self.head = 0;
    }

    fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut fill: F) {
        if new_len <= self.len {
            for i in new_len..self.len {
                let p = self.physical(i);
                self.buf[p] = T::default();
            }
            self.len = new_len;
            return;
        }

        let mut capacity = self.capacity();
        while capacity <= new_len {
            capacity *= 2;
        }
        self.reserve(capacity);

        for i in self.len..new_len {
            let p = self.physical(i);
            self.buf[p] = fill();
        }
        self.len = new_len;
    }

    /// Amortized doubling: a push that takes the last free slot doubles the
    /// storage, so a free slot exists at the start of every operation.
    #[inline]
    fn grow_if_full(&mut self) {
        if self.len == self.capacity() {
            let capacity = self.capacity() * 2;
            self.reserve(capacity);
        }
    }
}

impl<T, A: Allocator> Deque<T, A> {
    /// Returns the number of slots in the storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocator backing the deque.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Retrieves the element at logical `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            Some(&self.buf[self.physical(index)])
        } else {
            None
        }
    }

    /// Retrieves the element at logical `index` mutably, or `None` if out of
    /// range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let p = self.physical(index);
            Some(&mut self.buf[p])
        } else {
            None
        }
    }

    /// Checked access to the element at logical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let deque: Deque<_> = vec![3, 4, 5].into();
    /// assert_eq!(deque.at(1), Ok(&4));
    /// assert_eq!(deque.at(3), Err(Error::IndexOutOfRange { index: 3, bound: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.get(index).ok_or(Error::out_of_range(index, len))
    }

    /// Checked mutable access to the element at logical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(index).ok_or(Error::out_of_range(index, len))
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.check_nonempty()?;
        Ok(&self.buf[self.head])
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.check_nonempty()?;
        Ok(&mut self.buf[self.head])
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        self.check_nonempty()?;
        Ok(&self.buf[self.physical(self.len - 1)])
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyQueue`] if the deque is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.check_nonempty()?;
        let p = self.physical(self.len - 1);
        Ok(&mut self.buf[p])
    }

    /// Returns `true` if the deque contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
        where T: PartialEq
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![1, 2, 3, 4, 5].into();
    /// let seen: Vec<_> = deque.iter().copied().collect();
    /// assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<Self> {
        Iter::new(self)
    }

    /// Returns a front-to-back iterator of mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Cursor at logical index 0.
    #[inline]
    pub fn begin(&self) -> Cursor<Self> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<Self> {
        Cursor::new(self, self.len)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::with_capacity(6);
    /// deque.push_back(0);
    /// deque.push_back(1);
    /// deque.push_front(10);
    /// assert_eq!(deque.as_slices(), (&[10][..], &[0, 1][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let end = self.head + self.len;
        let capacity = self.capacity();
        if end <= capacity {
            (&self.buf[self.head..end], &[])
        } else {
            let (left, right) = self.buf.split_at(self.head);
            (right, &left[..end - capacity])
        }
    }

    /// Returns a pair of mutable slices which contain, in order, the
    /// contents of the deque.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let end = self.head + self.len;
        let capacity = self.capacity();
        if end <= capacity {
            let head = self.head;
            (&mut self.buf[head..end], &mut [])
        } else {
            let (left, right) = self.buf.split_at_mut(self.head);
            (right, &mut left[..end - capacity])
        }
    }

    #[inline]
    fn check_nonempty(&self) -> Result<()> {
        if self.len == 0 {
            Err(Error::EmptyQueue)
        } else {
            Ok(())
        }
    }
}

impl<T, A: Allocator> CircularBuffer for Deque<T, A> {
    type Item = T;

    #[inline]
    fn array_len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn head(&self) -> usize {
        self.head
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn slot(&self, physical: usize) -> &T {
        &self.buf[physical]
    }

    #[inline]
    fn storage_id(&self) -> usize {
        self.buf.as_ptr() as usize
    }
}

impl<T, A: Allocator> CircularBufferMut for Deque<T, A> {
    #[inline]
    fn slot_mut(&mut self, physical: usize) -> &mut T {
        &mut self.buf[physical]
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.buf.swap(a, b);
    }

    #[inline]
    fn set_head(&mut self, head: usize) {
        debug_assert!(head < self.buf.len());
        self.head = head;
    }

    #[inline]
    fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.buf.len());
        self.len = len;
    }
}

#[cfg(test)]
mod tests;
