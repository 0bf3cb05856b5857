use std::fmt;

use crate::logic::CircularBuffer;

/// Front-to-back iterator over any ring.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, B: CircularBuffer + ?Sized + 'a> {
    ring: &'a B,
    front: usize,
    back: usize,
}

impl<'a, B: CircularBuffer + ?Sized> Iter<'a, B> {
    #[inline]
    pub(crate) fn new(ring: &'a B) -> Iter<'a, B> {
        Iter { ring, front: 0, back: ring.len() }
    }
}

impl<'a, B: CircularBuffer + ?Sized> Clone for Iter<'a, B> {
    fn clone(&self) -> Self {
        Iter { ring: self.ring, front: self.front, back: self.back }
    }
}

impl<'a, B: CircularBuffer + ?Sized> Iterator for Iter<'a, B> {
    type Item = &'a B::Item;

    #[inline]
    fn next(&mut self) -> Option<&'a B::Item> {
        if self.front == self.back {
            return None;
        }
        let ring = self.ring;
        let slot = ring.slot(ring.physical(self.front));
        self.front += 1;
        Some(slot)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, B: CircularBuffer + ?Sized> DoubleEndedIterator for Iter<'a, B> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a B::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let ring = self.ring;
        Some(ring.slot(ring.physical(self.back)))
    }
}

impl<'a, B: CircularBuffer + ?Sized> ExactSizeIterator for Iter<'a, B> {}

impl<'a, B> fmt::Debug for Iter<'a, B>
    where B: CircularBuffer + ?Sized,
          B::Item: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}
