#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(index < capacity);
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(index < capacity);
    debug_assert!(subtrahend <= capacity);
    (index + capacity - subtrahend) % capacity
}

/// Maps an arbitrary offset from `front` onto the ring, reducing it first so
/// that unchecked lookups far past the end cannot overflow.
#[inline]
pub fn wrap_offset(front: usize, offset: usize, capacity: usize) -> usize {
    wrap_add(front, offset % capacity, capacity)
}

/// Number of live entries between two counters that advance modulo
/// `2 * capacity`.
#[inline]
pub fn count(head: usize, tail: usize, capacity: usize) -> usize {
    let span = capacity * 2;
    debug_assert!(head < span);
    debug_assert!(tail < span);
    if tail >= head {
        tail - head
    } else {
        span + tail - head
    }
}
