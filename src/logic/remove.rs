use crate::utils::wrap_add;

use super::copy::{shift_toward_back, shift_toward_front};
use super::CircularBufferMut;

pub struct Parameters {
    pub start: usize,
    pub end: usize,
    pub distance_to_front: usize,
    pub distance_to_back: usize,
}

impl Parameters {
    #[inline]
    pub fn new(start: usize, end: usize, len: usize) -> Parameters {
        debug_assert!(start <= end && end <= len);
        Parameters {
            start,
            end,
            distance_to_front: start,
            distance_to_back: len - end,
        }
    }

    #[inline]
    fn count(&self) -> usize {
        self.end - self.start
    }
}

/// Removes the logical range `[start, end)`, closing the gap from whichever
/// side holds fewer surviving elements.
///
/// The caller guarantees `start <= end <= len()`. Removed values are dropped
/// before the shift; the slots that leave the live window hold
/// `Default::default()`.
pub fn erase<B>(buffer: &mut B, start: usize, end: usize)
    where B: CircularBufferMut,
          B::Item: Default
{
    let len = buffer.len();
    let params = Parameters::new(start, end, len);
    if params.count() == 0 {
        return;
    }

    for i in start..end {
        let p = buffer.physical(i);
        *buffer.slot_mut(p) = B::Item::default();
    }

    if params.distance_to_front < params.distance_to_back {
        closer_to_front(buffer, &params);
    } else {
        closer_to_back(buffer, &params);
    }
    buffer.set_len(len - params.count());
}

#[inline]
fn closer_to_front<B: CircularBufferMut>(buffer: &mut B, params: &Parameters) {
    // remove closer to front:
    //
    //             F   R R       B
    //      [. . . o o x x o o o . . . . . .]
    //
    //                 F         B
    //      [. . . . . o o o o o . . . . . .]
    //                 M M

    let count = params.count();
    shift_toward_back(buffer, 0, params.start, count);
    let head = wrap_add(buffer.head(), count, buffer.array_len());
    buffer.set_head(head);
}

#[inline]
fn closer_to_back<B: CircularBufferMut>(buffer: &mut B, params: &Parameters) {
    // remove closer to back:
    //
    //             F       R R   B
    //      [. . . o o o o x x o . . . . . .]
    //
    //             F           B
    //      [. . . o o o o o . . . . . . . .]
    //                     M

    let len = params.end + params.distance_to_back;
    shift_toward_front(buffer, params.end, len, params.count());
}

#[cfg(test)]
mod tests {
    use super::super::testing::Ring;
    use super::*;

    #[test]
    fn erase_near_front_advances_front() {
        let mut ring = Ring::new(8, 6, &[1, 2, 3, 4, 5, 6]);
        erase(&mut ring, 1, 3);
        assert_eq!(ring.contents(), vec![1, 4, 5, 6]);
        assert_eq!(ring.head, 0);
    }

    #[test]
    fn erase_near_back_keeps_front() {
        let mut ring = Ring::new(8, 6, &[1, 2, 3, 4, 5, 6]);
        erase(&mut ring, 3, 5);
        assert_eq!(ring.contents(), vec![1, 2, 3, 6]);
        assert_eq!(ring.head, 6);
    }

    #[test]
    fn erased_slots_are_reset() {
        let mut ring = Ring::new(8, 6, &[1, 2, 3, 4, 5, 6]);
        erase(&mut ring, 3, 5);
        assert_eq!(ring.slots.iter().filter(|&&v| v != 0).count(), 4);

        let mut ring = Ring::new(8, 6, &[1, 2, 3, 4, 5, 6]);
        erase(&mut ring, 1, 3);
        assert_eq!(ring.contents(), vec![1, 4, 5, 6]);
        assert_eq!(ring.slots.iter().filter(|&&v| v != 0).count(), 4);
    }

    #[test]
    fn erase_everything_and_nothing() {
        let mut ring = Ring::new(4, 2, &[1, 2, 3]);
        erase(&mut ring, 1, 1);
        assert_eq!(ring.contents(), vec![1, 2, 3]);
        erase(&mut ring, 0, 3);
        assert!(ring.contents().is_empty());

        let mut empty = Ring::new(4, 0, &[]);
        erase(&mut empty, 0, 0);
        assert_eq!(empty.len, 0);
    }
}
