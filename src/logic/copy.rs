use std::mem;

use super::CircularBufferMut;

/// Moves the logical block `[start, end)` to `[start + by, end + by)`.
///
/// Walks from the back so that every destination slot has already been
/// vacated. Slots the block leaves behind receive whatever the destinations
/// held, which must be vacated defaults.
#[inline]
pub fn shift_toward_back<B: CircularBufferMut>(buffer: &mut B, start: usize, end: usize, by: usize) {
    debug_assert!(start <= end);
    debug_assert!(end + by <= buffer.array_len());

    //          S       E
    // 1 [. . . A B C D . . .]
    // 2 [. . . . . A B C D .]
    //              D
    for i in (start..end).rev() {
        buffer.swap_logical(i + by, i);
    }
}

/// Moves the logical block `[start, end)` to `[start - by, end - by)`.
///
/// Walks from the front, mirroring [`shift_toward_back`].
#[inline]
pub fn shift_toward_front<B: CircularBufferMut>(buffer: &mut B, start: usize, end: usize, by: usize) {
    debug_assert!(start <= end);
    debug_assert!(by <= start);

    //              S       E
    // 1 [. . . . . A B C D .]
    // 2 [. . . A B C D . . .]
    //          D
    for i in start..end {
        buffer.swap_logical(i - by, i);
    }
}

/// Moves every live element, in logical order, into `dst[0..len]`.
///
/// `dst` is fresh storage at least `len()` slots long; `project` reaches the
/// element inside one of its slots. The source slots are left holding the
/// values `dst` held before.
pub fn relocate<B, U>(buffer: &mut B, dst: &mut [U], project: fn(&mut U) -> &mut B::Item)
    where B: CircularBufferMut
{
    let len = buffer.len();
    debug_assert!(len <= dst.len());

    for (i, target) in dst.iter_mut().take(len).enumerate() {
        let p = buffer.physical(i);
        mem::swap(project(target), buffer.slot_mut(p));
    }
}

/// Identity projection for storage that holds elements directly.
#[inline]
pub fn direct<T>(slot: &mut T) -> &mut T {
    slot
}
