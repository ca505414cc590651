// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Logical-to-physical mapping for the circular chunk buffer.
//!
//! A column's buffer is a ring of `capacity` chunks. The logical start of the column
//! (its origin) sits at ring bit position `cursor_bit`, and logical distance `d` from
//! the origin lives at ring position `cursor_bit + d`, wrapped.

use crate::constants::CHUNK_BITS;

/// Physical location of one bit in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSlot {
    /// Index of the chunk in the buffer.
    pub chunk: usize,
    /// Bit offset within that chunk (0..64).
    pub offset: u32,
}

/// Number of bits, counted from the origin, that can be written without wrapping
/// onto live data.
///
/// Bits of the cursor chunk below `cursor_bit` have already been passed, but the
/// chunk itself is still in use, so they cannot be reused until it is retired.
pub fn writable_span(capacity: usize, cursor_bit: u64) -> u64 {
    capacity as u64 * CHUNK_BITS - cursor_bit % CHUNK_BITS
}

/// Locate the bit `distance` past the origin.
///
/// The caller guarantees `distance < writable_span(capacity, cursor_bit)`.
pub fn locate(capacity: usize, cursor_bit: u64, distance: u64) -> RingSlot {
    debug_assert!(distance < writable_span(capacity, cursor_bit));
    let position = cursor_bit + distance;
    RingSlot {
        chunk: ((position / CHUNK_BITS) % capacity as u64) as usize,
        offset: (position % CHUNK_BITS) as u32,
    }
}

/// Number of chunks, counted from the cursor chunk, spanned up to and including the
/// bit `distance` past the origin.
pub fn chunks_spanned(cursor_bit: u64, distance: u64) -> usize {
    ((cursor_bit % CHUNK_BITS + distance) / CHUNK_BITS) as usize + 1
}
