// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 1: MEMO data (immutable, precomputed).
//!
//! Lookup tables that never change during search:
//! - Powers of three, 3^0 ..= 3^39
//! - The De Bruijn table behind `floor_log2`
//!
//! Everything here is a `const` or `static`, so it can be shared freely
//! without synchronisation.

pub mod powers;

pub use powers::{floor_log2, power_of_three, ThreePowerTable, THREE_POWERS};
