// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-level building blocks for the expansion register.
//!
//! This module contains:
//! - chunk: shift helpers, perfect-shuffle spreading, set-bit iteration
//! - layout: index layouts mapping integers to bit positions

pub mod chunk;
pub mod layout;

pub use chunk::{format_chunk, set_bits, shl_or_zero, shr_or_zero, spread_bits, spread_bits_paired};
pub use layout::{DenseLayout, IndexLayout, LayoutKind, SkipThreesLayout};
