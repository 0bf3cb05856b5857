//! Ring arithmetic shared by [`Deque`](crate::Deque) and
//! [`SpscQueue`](crate::SpscQueue).

pub mod copy;
pub mod insert;
pub mod remove;

use crate::utils::wrap_offset;

/// Read access to a circular buffer: `len()` live elements starting at the
/// physical slot `head()` of a ring holding `array_len()` slots.
///
/// The element at logical index `i` lives at physical slot
/// `(head() + i) % array_len()`.
pub trait CircularBuffer {
    /// Element type.
    type Item;

    /// Number of physical slots.
    fn array_len(&self) -> usize;

    /// Physical slot of the logical front.
    fn head(&self) -> usize;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// Returns the value held by physical slot `physical`.
    ///
    /// Panics if `physical >= array_len()`.
    fn slot(&self, physical: usize) -> &Self::Item;

    /// Identity of the current storage allocation. Changes whenever the
    /// buffer reallocates.
    fn storage_id(&self) -> usize;

    /// Maps a logical index to its physical slot.
    #[inline]
    fn physical(&self, index: usize) -> usize {
        wrap_offset(self.head(), index, self.array_len())
    }
}

pub(crate) trait CircularBufferMut: CircularBuffer {
    fn slot_mut(&mut self, physical: usize) -> &mut Self::Item;

    fn swap_slots(&mut self, a: usize, b: usize);

    fn set_head(&mut self, head: usize);

    fn set_len(&mut self, len: usize);

    /// Swaps the values at logical indices `a` and `b`. Either may lie past
    /// `len()`, in which case a stale slot takes part in the swap.
    #[inline]
    fn swap_logical(&mut self, a: usize, b: usize) {
        let pa = self.physical(a);
        let pb = self.physical(b);
        self.swap_slots(pa, pb);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Ring;
    use super::*;

    #[test]
    fn physical_mapping_wraps() {
        let ring = Ring::new(5, 3, &[1, 2, 3, 4]);
        assert_eq!(ring.physical(0), 3);
        assert_eq!(ring.physical(1), 4);
        assert_eq!(ring.physical(2), 0);
        assert_eq!(ring.physical(3), 1);
        assert_eq!(ring.slots, vec![3, 4, 0, 1, 2]);
        assert_eq!(ring.contents(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn swap_logical_crosses_the_seam() {
        let mut ring = Ring::new(4, 2, &[1, 2, 3]);
        ring.swap_logical(0, 2);
        assert_eq!(ring.contents(), vec![3, 2, 1]);
    }
}
