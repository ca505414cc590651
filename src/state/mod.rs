// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 2: DYNAMIC state (mutable, owned by the engine).
//!
//! The expansion columns themselves live in [`crate::column`]; this module holds
//! the bookkeeping that rides along with them:
//! - Statistics counters

pub mod statistics;

pub use statistics::{Counters, Statistics};
