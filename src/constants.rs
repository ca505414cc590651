// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants and tuning values for the search.
//!
//! The default index layout can be chosen at compile time via cargo features.
//!
//! # Example
//!
//! ```bash
//! # Default: dense layout (one bit per integer)
//! cargo build
//!
//! # Pack only the non-multiples of 3
//! cargo build --features layout_skip_threes
//! ```

use crate::bits::LayoutKind;

/// Width of one chunk (buffer word) in bits.
pub const CHUNK_BITS: u64 = 64;

/// Number of entries in the power-of-three table: 3^0 ..= 3^39.
///
/// 3^40 does not fit in a u64.
pub const POWER_TABLE_LEN: usize = 40;

/// Bits at positions 0, 3, 6, ..., 63: `1001001...1001001`.
pub const EVERY_THIRD_BIT: u64 = 0x9249_2492_4924_9249;

/// Largest accepted search limit.
///
/// Doubling targets are computed from window positions, so positions must stay
/// well clear of the top of the u64 range.
pub const MAX_LIMIT: u64 = 1 << 62;

/// Capacity, in chunks, of a newly created column.
///
/// Columns double from here on demand, so this only needs to be a sensible first guess.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// How often, in milliseconds, the progress line is refreshed by default.
pub const DEFAULT_PROGRESS_MS: u64 = 500;

/// Largest bound accepted by the reference search, which keeps one word per integer.
pub const MAX_REFERENCE_LIMIT: u64 = 1 << 27;

/// Windows between progress snapshot publications.
///
/// A power of two so the check is a mask rather than a division.
pub const PROGRESS_PUBLISH_MASK: u64 = 0xFF;

/// Index layout used when none is given on the command line.
#[cfg(not(feature = "layout_skip_threes"))]
pub const DEFAULT_LAYOUT: LayoutKind = LayoutKind::Dense;

#[cfg(feature = "layout_skip_threes")]
pub const DEFAULT_LAYOUT: LayoutKind = LayoutKind::SkipThrees;
