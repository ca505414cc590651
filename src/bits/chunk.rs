// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Word-level bit tricks on 64-bit chunks.
//!
//! Shifts by the full word width are undefined in many languages and wrap in some
//! hardware; here they are spelled out: shifting by 64 or more gives zero.
//!
//! # Examples
//!
//! ```
//! use two_three_search::bits::{shl_or_zero, spread_bits};
//!
//! assert_eq!(shl_or_zero(1, 64), 0);
//!
//! // bit p of the input lands on bit 2p of the 128-bit output
//! let [low, high] = spread_bits(0b11);
//! assert_eq!(low, 0b101);
//! assert_eq!(high, 0);
//! ```

use crate::constants::CHUNK_BITS;

/// `x << shift`, or 0 when `shift >= 64`.
#[inline]
pub fn shl_or_zero(x: u64, shift: u32) -> u64 {
    x.checked_shl(shift).unwrap_or(0)
}

/// `x >> shift`, or 0 when `shift >= 64`.
#[inline]
pub fn shr_or_zero(x: u64, shift: u32) -> u64 {
    x.checked_shr(shift).unwrap_or(0)
}

/// Spread the low 32 bits of `x` so bit p moves to bit 2p, except the last step.
///
/// Leaves the bits in adjacent pairs: bits (2m, 2m+1) land on (4m, 4m+1).
#[inline]
fn spread_half_paired(x: u64) -> u64 {
    let mut x = x & 0x0000_0000_FFFF_FFFF;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    (x | (x << 2)) & 0x3333_3333_3333_3333
}

/// Perfect shuffle of a chunk with zeros: bit p of `x` moves to bit 2p of the
/// 128-bit result `[low, high]`.
///
/// This is the chunk form of "n reachable implies 2n reachable" when one bit
/// represents one integer.
#[inline]
pub fn spread_bits(x: u64) -> [u64; 2] {
    let [low, high] = spread_bits_paired(x);
    let finish = |y: u64| (y | (y << 1)) & 0x5555_5555_5555_5555;
    [finish(low), finish(high)]
}

/// Like [`spread_bits`] but stops one step short, so the bits stay in pairs:
/// bit pair (2m, 2m+1) of `x` lands on bits (4m, 4m+1) of the 128-bit result.
///
/// This is the doubling pattern when multiples of 3 are packed out of the index space.
#[inline]
pub fn spread_bits_paired(x: u64) -> [u64; 2] {
    [spread_half_paired(x), spread_half_paired(x >> 32)]
}

/// Iterate over the positions of the set bits of a chunk, lowest first.
pub fn set_bits(chunk: u64) -> impl Iterator<Item = u32> {
    SetBits { bits: chunk }
}

struct SetBits {
    bits: u64,
}

impl Iterator for SetBits {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let position = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(position)
    }
}

/// Render a chunk least significant bit first, `#` for on and `-` for off.
///
/// Reading left to right then follows increasing integer values.
pub fn format_chunk(chunk: u64) -> String {
    (0..CHUNK_BITS)
        .map(|bit| if (chunk >> bit) & 1 == 1 { '#' } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(positions: &[u32]) -> u64 {
        positions.iter().fold(0, |acc, &p| acc | (1u64 << p))
    }

    #[test]
    fn test_shift_helpers_full_width() {
        assert_eq!(shl_or_zero(u64::MAX, 64), 0);
        assert_eq!(shr_or_zero(u64::MAX, 64), 0);
        assert_eq!(shl_or_zero(u64::MAX, 200), 0);
        assert_eq!(shl_or_zero(0b1011, 0), 0b1011);
        assert_eq!(shr_or_zero(1 << 63, 63), 1);
    }

    #[test]
    fn test_spread_bits_doubles_positions() {
        let input = bits_of(&[0, 1, 5, 10, 63]);
        let [low, high] = spread_bits(input);
        assert_eq!(low, bits_of(&[0, 2, 10, 20]));
        assert_eq!(high, bits_of(&[62])); // 126 - 64
    }

    #[test]
    fn test_spread_bits_every_position() {
        for p in 0..64u32 {
            let [low, high] = spread_bits(1u64 << p);
            let target = 2 * p;
            if target < 64 {
                assert_eq!((low, high), (1u64 << target, 0), "bit {}", p);
            } else {
                assert_eq!((low, high), (0, 1u64 << (target - 64)), "bit {}", p);
            }
        }
    }

    #[test]
    fn test_spread_bits_paired() {
        // 11111111 -> 11001100 11001100 (read from the low end)
        let [low, high] = spread_bits_paired(0xFF);
        assert_eq!(low, 0x3333);
        assert_eq!(high, 0);

        let [low, high] = spread_bits_paired(1 << 33);
        assert_eq!(low, 0);
        assert_eq!(high, 1 << 1);
    }

    #[test]
    fn test_set_bits() {
        let positions: Vec<u32> = set_bits(bits_of(&[3, 0, 63, 17])).collect();
        assert_eq!(positions, vec![0, 3, 17, 63]);
        assert_eq!(set_bits(0).count(), 0);
    }

    #[test]
    fn test_format_chunk() {
        let text = format_chunk(0b101);
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("#-#-"));
        assert!(text[3..].chars().all(|c| c == '-'));
    }
}
