use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::mem;
use std::ops::{Index, IndexMut};

use super::Deque;
use crate::allocator::Allocator;
use crate::logic::CircularBuffer;

impl<T, A> Clone for Deque<T, A>
    where T: Clone + Default,
          A: Allocator + Clone
{
    /// The clone keeps the capacity and allocator of the source, but owns
    /// fresh storage with the front at slot 0.
    fn clone(&self) -> Deque<T, A> {
        let mut deque = Deque::with_capacity_in(self.capacity(), self.alloc.clone());
        deque.extend(self.iter().cloned());
        deque
    }

    fn clone_from(&mut self, source: &Self) {
        self.reserve(source.capacity());
        self.assign(source.iter().cloned());
    }
}

impl<T, A: Allocator> Drop for Deque<T, A> {
    fn drop(&mut self) {
        let storage = mem::take(&mut self.buf);
        self.alloc.deallocate(storage);
    }
}

impl<T: Default> Default for Deque<T> {
    #[inline]
    fn default() -> Deque<T> {
        Deque::new()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Deque<T, A> {
    fn eq(&self, other: &Deque<T, A>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other.as_slices();
        if sa.len() == oa.len() {
            sa == oa && sb == ob
        } else if sa.len() < oa.len() {
            // Always divisible in three sections, for example:
            // self:  [a b c|d e f]
            // other: [0 1 2 3|4 5]
            // front = 3, mid = 1,
            // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
            let front = sa.len();
            let mid = oa.len() - front;

            let (oa_front, oa_mid) = oa.split_at(front);
            let (sb_mid, sb_back) = sb.split_at(mid);
            sa == oa_front && sb_mid == oa_mid && sb_back == ob
        } else {
            let front = oa.len();
            let mid = sa.len() - front;

            let (sa_front, sa_mid) = sa.split_at(front);
            let (ob_mid, ob_back) = ob.split_at(mid);
            sa_front == oa && sa_mid == ob_mid && sb == ob_back
        }
    }
}

impl<T: Eq, A: Allocator> Eq for Deque<T, A> {}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for Deque<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (a, b) = self.as_slices();
        let (oa, ob) = other.split_at(a.len());
        a == oa && b == ob
    }
}

impl<'b, T: PartialEq, A: Allocator> PartialEq<&'b [T]> for Deque<T, A> {
    #[inline]
    fn eq(&self, other: &&'b [T]) -> bool {
        *self == **other
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<Vec<T>> for Deque<T, A> {
    #[inline]
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for Deque<T, A> {
    fn partial_cmp(&self, other: &Deque<T, A>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Deque<T, A> {
    #[inline]
    fn cmp(&self, other: &Deque<T, A>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Deque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

/// Unchecked positional access: `index` is mapped through the ring without
/// comparing it to `len()`, so an index past the back reads a stale slot.
/// Use [`Deque::at`] or [`Deque::get`] for checked access.
impl<T, A: Allocator> Index<usize> for Deque<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.buf[self.physical(index)]
    }
}

impl<T, A: Allocator> IndexMut<usize> for Deque<T, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let p = self.physical(index);
        &mut self.buf[p]
    }
}

/// Collects into a deque with twice as many slots as elements.
impl<T: Default> iter::FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Deque::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Default> From<Vec<T>> for Deque<T> {
    fn from(values: Vec<T>) -> Deque<T> {
        let mut deque = Deque::with_capacity(cmp::max(values.len() * 2, 1));
        deque.extend(values);
        deque
    }
}

impl<T: Default, const N: usize> From<[T; N]> for Deque<T> {
    fn from(values: [T; N]) -> Deque<T> {
        let mut deque = Deque::with_capacity(cmp::max(N * 2, 1));
        deque.extend(values);
        deque
    }
}

/// Extend the `Deque` with an iterator, growing as needed.
impl<T: Default, A: Allocator> Extend<T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: Copy + Default + 'a, A: Allocator> Extend<&'a T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &elt in iter {
            self.push_back(elt);
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Deque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Writes the elements between brackets, each followed by a space:
/// `[ 1 2 3 ]`.
impl<T: fmt::Display, A: Allocator> fmt::Display for Deque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[ ")?;
        for elt in self.iter() {
            write!(f, "{} ", elt)?;
        }
        f.write_str("]")
    }
}
