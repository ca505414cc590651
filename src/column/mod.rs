// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Expansion columns: sliding, growable bit vectors.
//!
//! Column k of the expansion register marks the integers reachable with exactly k
//! power-of-three additions. Conceptually each column is an infinite bit vector; in
//! memory it is a ring of 64-bit chunks that slides forward one chunk at a time and
//! doubles in size whenever a write lands beyond its current reach.
//!
//! # Memory Model
//!
//! - Chunks behind the cursor are zeroed as the column advances and reused when the
//!   ring wraps around.
//! - Capacity only ever doubles. It never shrinks, and chunks are never freed one by one.
//!
//! # Examples
//!
//! ```
//! use two_three_search::column::ExpansionColumn;
//!
//! let mut column = ExpansionColumn::new(1, 0, 0b10);
//! column.or_bits_at(200, 1); // far beyond one chunk: the ring doubles until it fits
//! assert!(column.capacity() >= 4);
//! assert!(column.read_bit(1));
//! assert!(column.read_bit(200));
//! ```

pub mod ring;

pub use ring::{chunks_spanned, locate, writable_span, RingSlot};

use crate::bits::{shl_or_zero, shr_or_zero};
use crate::constants::CHUNK_BITS;

/// One column of the expansion register.
#[derive(Debug, Clone)]
pub struct ExpansionColumn {
    /// Ring of chunks; its length is the capacity.
    buffer: Vec<u64>,

    /// Smallest value still represented.
    origin: u64,

    /// Ring bit position of `origin`.
    cursor_bit: u64,

    /// Chunks, from the cursor chunk on, that may hold set bits.
    live_chunks: usize,
}

impl ExpansionColumn {
    /// Create a column of `capacity` zeroed chunks whose first chunk holds `first_chunk`.
    ///
    /// Bit j of `first_chunk` represents `origin + j`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, origin: u64, first_chunk: u64) -> Self {
        assert!(capacity > 0, "expansion column capacity must be at least one chunk");
        let mut buffer = vec![0u64; capacity];
        buffer[0] = first_chunk;
        Self {
            buffer,
            origin,
            cursor_bit: 0,
            live_chunks: 1,
        }
    }

    /// Capacity in chunks.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Smallest value still represented.
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Ring bit position of the origin.
    pub fn cursor_bit(&self) -> u64 {
        self.cursor_bit
    }

    /// Chunks from the cursor that may hold data.
    pub fn live_chunks(&self) -> usize {
        self.live_chunks
    }

    /// First value past the writable range (saturating).
    pub fn writable_end(&self) -> u64 {
        self.origin
            .saturating_add(writable_span(self.capacity(), self.cursor_bit))
    }

    /// Check whether `value` can be written without growing.
    pub fn is_writable(&self, value: u64) -> bool {
        value >= self.origin && value < self.writable_end()
    }

    /// The raw chunk at the cursor.
    pub fn peek_current_chunk(&self) -> u64 {
        self.buffer[(self.cursor_bit / CHUNK_BITS) as usize]
    }

    /// Retire the cursor chunk and slide forward by one chunk.
    ///
    /// The whole chunk is cleared, including bits that were already behind the
    /// origin, since it will next be seen when the ring wraps round to it.
    pub fn advance_by_one_chunk(&mut self) {
        let chunk = (self.cursor_bit / CHUNK_BITS) as usize;
        self.buffer[chunk] = 0;
        self.origin += CHUNK_BITS;
        self.cursor_bit = (self.cursor_bit + CHUNK_BITS) % (self.capacity() as u64 * CHUNK_BITS);
        self.live_chunks = self.live_chunks.saturating_sub(1);
    }

    /// Double the capacity until `value` is writable.
    ///
    /// Returns the number of doublings performed.
    ///
    /// # Panics
    ///
    /// Panics if `value` is below the origin: that bit has already been retired, and
    /// writing it means a propagation offset was computed wrongly.
    pub fn ensure_writable(&mut self, value: u64) -> usize {
        self.assert_not_retired(value);
        let mut doublings = 0;
        while !self.is_writable(value) {
            self.grow();
            doublings += 1;
        }
        doublings
    }

    /// OR `pattern` into the column so that bit j lands on `value + j`.
    ///
    /// Returns the number of capacity doublings needed to make room.
    ///
    /// # Panics
    ///
    /// Panics if `value` is below the origin.
    pub fn or_bits_at(&mut self, value: u64, pattern: u64) -> usize {
        self.assert_not_retired(value);
        if pattern == 0 {
            return 0;
        }
        let highest = value + u64::from(63 - pattern.leading_zeros());
        let doublings = self.ensure_writable(highest);

        let distance = value - self.origin;
        let slot = locate(self.capacity(), self.cursor_bit, distance);
        self.buffer[slot.chunk] |= shl_or_zero(pattern, slot.offset);

        // Bits shifted out of the first chunk spill into the next one. With a zero
        // offset the shift is by the full width, which must give nothing.
        let spill = shr_or_zero(pattern, CHUNK_BITS as u32 - slot.offset);
        if spill != 0 {
            let next = (slot.chunk + 1) % self.capacity();
            self.buffer[next] |= spill;
        }

        let spanned = chunks_spanned(self.cursor_bit, highest - self.origin);
        self.live_chunks = self.live_chunks.max(spanned);
        doublings
    }

    /// Read the bit for `value`. Values beyond the writable range read as 0.
    ///
    /// # Panics
    ///
    /// Panics if `value` is below the origin.
    pub fn read_bit(&self, value: u64) -> bool {
        self.assert_not_retired(value);
        if !self.is_writable(value) {
            return false;
        }
        let slot = locate(self.capacity(), self.cursor_bit, value - self.origin);
        (self.buffer[slot.chunk] >> slot.offset) & 1 == 1
    }

    /// Reallocate at twice the capacity, unwrapping the live chunks so the cursor
    /// chunk becomes chunk 0.
    fn grow(&mut self) {
        let capacity = self.capacity();
        let new_capacity = capacity
            .checked_mul(2)
            .unwrap_or_else(|| panic!("expansion column capacity overflow at {} chunks", capacity));
        let start = (self.cursor_bit / CHUNK_BITS) as usize;

        let mut buffer = vec![0u64; new_capacity];
        for (i, slot) in buffer.iter_mut().take(self.live_chunks).enumerate() {
            *slot = self.buffer[(start + i) % capacity];
        }

        self.buffer = buffer;
        self.cursor_bit %= CHUNK_BITS;
    }

    fn assert_not_retired(&self, value: u64) {
        if value < self.origin {
            panic!(
                "flag at value {} is not stored any more: it is below the column origin {}",
                value, self.origin
            );
        }
    }
}
