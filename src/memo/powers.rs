// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Power-of-three table and integer floor-log2.
//!
//! # Examples
//!
//! ```
//! use two_three_search::memo::{floor_log2, power_of_three};
//!
//! assert_eq!(power_of_three(4), 81);
//! assert_eq!(floor_log2(1024), 10);
//! assert_eq!(floor_log2(0), 0); // by convention
//! ```

use crate::constants::POWER_TABLE_LEN;

/// Multiplier whose top six bits are unique for every `2^k - 1`.
const DE_BRUIJN_64: u64 = 0x03f6_eaf2_cd27_1461;

/// Maps the top six bits of `smeared * DE_BRUIJN_64` back to the bit index.
const FLOOR_LOG2_LOOKUP: [u8; 64] = [
    0, 58, 1, 59, 47, 53, 2, 60, 39, 48, 27, 54, 33, 42, 3, 61, //
    51, 37, 40, 49, 18, 28, 20, 55, 30, 34, 11, 43, 14, 22, 4, 62, //
    57, 46, 52, 38, 26, 32, 41, 50, 36, 17, 19, 29, 10, 13, 21, 56, //
    45, 25, 31, 35, 16, 9, 12, 44, 24, 15, 8, 23, 7, 6, 5, 63,
];

/// Immutable table of 3^0 ..= 3^39.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreePowerTable {
    powers: [u64; POWER_TABLE_LEN],
}

/// The single shared instance, built at compile time.
pub static THREE_POWERS: ThreePowerTable = ThreePowerTable::new();

impl ThreePowerTable {
    /// Build the table. Evaluated at compile time for [`THREE_POWERS`].
    pub const fn new() -> Self {
        let mut powers = [0u64; POWER_TABLE_LEN];
        let mut value = 1u64;
        let mut k = 0;
        while k < POWER_TABLE_LEN {
            powers[k] = value;
            // The multiply after the last entry would overflow.
            if k + 1 < POWER_TABLE_LEN {
                value *= 3;
            }
            k += 1;
        }
        Self { powers }
    }

    /// Get 3^k.
    ///
    /// # Panics
    ///
    /// Panics if `k >= 40`: 3^40 overflows a u64, and a wrapped value would
    /// silently corrupt every offset derived from it.
    pub fn get(&self, k: usize) -> u64 {
        match self.powers.get(k) {
            Some(&power) => power,
            None => panic!("overflow in 3^n: exponent {} is beyond the table (max {})", k, POWER_TABLE_LEN - 1),
        }
    }

    /// Get 3^k, or None when it does not fit in a u64.
    pub fn checked_get(&self, k: usize) -> Option<u64> {
        self.powers.get(k).copied()
    }

    /// Number of entries (40).
    pub const fn len(&self) -> usize {
        POWER_TABLE_LEN
    }

    /// Always false; present for symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over 3^0, 3^1, ... in order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.powers.iter().copied()
    }
}

impl Default for ThreePowerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 3^k from the shared table.
///
/// # Panics
///
/// Panics if `k >= 40`.
pub fn power_of_three(k: usize) -> u64 {
    THREE_POWERS.get(k)
}

/// floor(log2(n)) for n >= 1; returns 0 for n == 0.
///
/// Smears the leading one bit downwards to get `2^(k+1) - 1`, then multiplies by a
/// De Bruijn constant so the top six bits index a lookup table.
pub const fn floor_log2(n: u64) -> u32 {
    let mut n = n;
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n |= n >> 32;
    FLOOR_LOG2_LOOKUP[(n.wrapping_mul(DE_BRUIJN_64) >> 58) as usize] as u32
}
