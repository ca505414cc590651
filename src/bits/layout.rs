// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Index layouts: how integers map to bit positions in a column.
//!
//! Two layouts are supported:
//! - [`DenseLayout`]: bit i represents the integer i.
//! - [`SkipThreesLayout`]: multiples of 3 are never reachable, so they are packed out.
//!   Bit i represents the i-th non-multiple of 3 (1, 2, 4, 5, 7, 8, ...).
//!
//! The engine is generic over the layout; every offset it writes at is derived here.
//!
//! # Examples
//!
//! ```
//! use two_three_search::bits::{IndexLayout, SkipThreesLayout};
//!
//! let layout = SkipThreesLayout;
//! // input:   1  2  4  5  7  8  10 11 13
//! // maps to: 0  1  2  3  4  5  6  7  8
//! assert_eq!(layout.index_of(10), 6);
//! assert_eq!(layout.value_of(6), 10);
//! ```

use crate::bits::chunk::{spread_bits, spread_bits_paired};
use crate::constants::{CHUNK_BITS, EVERY_THIRD_BIT};
use std::fmt::Debug;
use strum_macros::{Display, EnumIter, EnumString};

/// Runtime name of a layout, for configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutKind {
    /// One bit per integer.
    Dense,
    /// One bit per non-multiple of 3.
    SkipThrees,
}

/// Strategy mapping integers to bit indices, and the propagation offsets that follow.
///
/// Implementations must keep doubling and power-of-three propagation strictly
/// forward: for a window starting at `w > 0`, every doubling target is at least
/// `w + 64`, and power offsets are positive.
pub trait IndexLayout: Debug + Default + Copy + Send + 'static {
    /// The runtime name of this layout.
    fn kind(&self) -> LayoutKind;

    /// Bit index representing `value`.
    fn index_of(&self, value: u64) -> u64;

    /// Integer represented by bit `index`.
    fn value_of(&self, index: u64) -> u64;

    /// Index distance covered by adding `power` (a power of three, at least 3).
    fn power_offset(&self, power: u64) -> u64;

    /// Index at which the 128-bit output of [`IndexLayout::spread_doubled`] is written,
    /// for a chunk starting at `window_start`.
    fn doubling_target(&self, window_start: u64) -> u64;

    /// The doubled pattern of a chunk, low word first.
    fn spread_doubled(&self, chunk: u64) -> [u64; 2];

    /// Bits of the window starting at `window_start` that represent multiples of 3.
    fn excluded_mask(&self, window_start: u64) -> u64;

    /// Index of the starting integer, 1.
    fn seed_index(&self) -> u64 {
        self.index_of(1)
    }

    /// Close the first chunk under doubling.
    ///
    /// Only in the window starting at 0 can a doubling land back in the same chunk,
    /// so those bits are resolved here before the chunk is used.
    fn close_first_window(&self, chunk: u64) -> u64 {
        let mut chunk = chunk;
        for bit in 0..CHUNK_BITS {
            if (chunk >> bit) & 1 == 0 {
                continue;
            }
            let value = self.value_of(bit);
            if value == 0 {
                continue;
            }
            let doubled = self.index_of(2 * value);
            if doubled < CHUNK_BITS {
                chunk |= 1u64 << doubled;
            }
        }
        chunk
    }
}

/// Bit i represents the integer i. Index 0 (the integer 0) is never set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DenseLayout;

impl IndexLayout for DenseLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Dense
    }

    fn index_of(&self, value: u64) -> u64 {
        value
    }

    fn value_of(&self, index: u64) -> u64 {
        index
    }

    fn power_offset(&self, power: u64) -> u64 {
        power
    }

    fn doubling_target(&self, window_start: u64) -> u64 {
        window_start
            .checked_mul(2)
            .unwrap_or_else(|| panic!("doubling target overflow at window {}", window_start))
    }

    fn spread_doubled(&self, chunk: u64) -> [u64; 2] {
        spread_bits(chunk)
    }

    fn excluded_mask(&self, window_start: u64) -> u64 {
        // Shifting 1001001...1001001 right by (start % 3) lines the ON bits up
        // with the multiples of 3 in this window.
        EVERY_THIRD_BIT >> (window_start % 3)
    }
}

/// Bit i represents the i-th positive non-multiple of 3.
///
/// `index = n - n/3 - 1`, `n = i + i/2 + 1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipThreesLayout;

impl IndexLayout for SkipThreesLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::SkipThrees
    }

    fn index_of(&self, value: u64) -> u64 {
        debug_assert!(value % 3 != 0, "{} has no index in the skip-threes layout", value);
        value - value / 3 - 1
    }

    fn value_of(&self, index: u64) -> u64 {
        index + index / 2 + 1
    }

    fn power_offset(&self, power: u64) -> u64 {
        debug_assert!(power >= 3, "power offset for {} would not move forward", power);
        // 3^k non-multiples are followed by 3^(k-1) multiples in every run of 3^k integers
        power / 3 * 2
    }

    fn doubling_target(&self, window_start: u64) -> u64 {
        // Indices (2m, 2m+1) double to (4m+1, 4m+2): the paired spread shifted by one bit.
        window_start
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .unwrap_or_else(|| panic!("doubling target overflow at window {}", window_start))
    }

    fn spread_doubled(&self, chunk: u64) -> [u64; 2] {
        spread_bits_paired(chunk)
    }

    fn excluded_mask(&self, _window_start: u64) -> u64 {
        0
    }
}
