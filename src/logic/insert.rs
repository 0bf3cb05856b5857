use crate::utils::wrap_sub;

use super::copy::{shift_toward_back, shift_toward_front};
use super::CircularBufferMut;

pub struct Parameters {
    pub index: usize,
    pub distance_to_front: usize,
    pub distance_to_back: usize,
}

impl Parameters {
    #[inline]
    pub fn new(index: usize, len: usize) -> Parameters {
        debug_assert!(index <= len);
        Parameters {
            index,
            distance_to_front: index,
            distance_to_back: len - index,
        }
    }
}

/// Inserts `element` at logical `index`, moving whichever side of the
/// insertion point holds fewer elements.
///
/// The caller guarantees `index <= len()` and at least one free slot.
pub fn insert<B: CircularBufferMut>(buffer: &mut B, index: usize, element: B::Item) {
    let len = buffer.len();
    debug_assert!(len < buffer.array_len(), "insert into a full ring");

    let params = Parameters::new(index, len);
    if params.distance_to_front < params.distance_to_back {
        closer_to_front(buffer, &params);
    } else {
        closer_to_back(buffer, &params);
    }

    let p = buffer.physical(index);
    *buffer.slot_mut(p) = element;
    buffer.set_len(len + 1);
}

#[inline]
fn closer_to_front<B: CircularBufferMut>(buffer: &mut B, params: &Parameters) {
    // insert closer to front:
    //
    //             F   I         B
    //      [. . . o o A o o o o . . . . . .]
    //
    //           F               B
    //      [. . o o I A o o o o . . . . . .]
    //           M M
    //
    // at index zero this is a plain push_front: only F moves.

    let head = wrap_sub(buffer.head(), 1, buffer.array_len());
    buffer.set_head(head);
    shift_toward_front(buffer, 1, params.index + 1, 1);
}

#[inline]
fn closer_to_back<B: CircularBufferMut>(buffer: &mut B, params: &Parameters) {
    // insert closer to back:
    //
    //             F       I     B
    //      [. . . o o o o A o o . . . . . .]
    //
    //             F               B
    //      [. . . o o o o I A o o . . . . .]
    //                       M M M
    //
    // at index len this is a plain push_back: nothing moves.

    shift_toward_back(buffer, params.index, params.index + params.distance_to_back, 1);
}

#[cfg(test)]
mod tests {
    use super::super::testing::Ring;
    use super::*;

    #[test]
    fn insert_near_front_moves_front() {
        let mut ring = Ring::new(8, 0, &[1, 2, 3, 4, 5]);
        insert(&mut ring, 1, 9);
        assert_eq!(ring.contents(), vec![1, 9, 2, 3, 4, 5]);
        assert_eq!(ring.head, 7);
    }

    #[test]
    fn insert_near_back_keeps_front() {
        let mut ring = Ring::new(8, 6, &[1, 2, 3, 4, 5]);
        insert(&mut ring, 3, 9);
        assert_eq!(ring.contents(), vec![1, 2, 3, 9, 4, 5]);
        assert_eq!(ring.head, 6);
    }

    #[test]
    fn insert_at_ends() {
        let mut ring = Ring::new(4, 0, &[]);
        insert(&mut ring, 0, 1);
        insert(&mut ring, 1, 3);
        insert(&mut ring, 0, 0);
        assert_eq!(ring.contents(), vec![0, 1, 3]);
        assert_eq!(ring.head, 3);
    }

    #[test]
    fn insert_at_midpoint_of_even_length() {
        let mut ring = Ring::new(6, 4, &[1, 2, 3, 4]);
        insert(&mut ring, 2, 9);
        assert_eq!(ring.contents(), vec![1, 2, 9, 3, 4]);
    }
}
