// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Streaming search for integers unreachable under doubling and powers of three.
//!
//! Start at 1. At each step either double the current value, or, having added
//! k powers of three so far, add 3^(k+1). Multiples of 3 are never reached, since both
//! operations preserve the value mod 3. A *non-trivial zero* is any other integer
//! that is never reached. There are none up to 20.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! - Powers of three, 3^0 ..= 3^39
//! - The index layouts, which are zero-sized strategies
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! - The expansion register: one sliding, growable bit column per addition count
//! - Statistics counters
//! - The progress snapshot shared with the reporter thread
//!
//! # Search Algorithm
//!
//! [`ReachabilityEngine`] sweeps the integers in 64-bit windows. Each column in turn
//! merges its chunk into the window's aggregate and propagates forward, by doubling
//! into itself and by the next power of three into its neighbour. Bits left clear in
//! the aggregate are the zeros. See [`engine`] for details.
//!
//! [`reference::non_trivial_zeros`] answers the same question for a bounded range by
//! direct search, and is used to cross-check the engine.

pub mod bits;
pub mod column;
pub mod config;
pub mod constants;
pub mod engine;
pub mod memo;
pub mod progress;
pub mod reference;
pub mod state;

// Re-export commonly used types
pub use bits::{DenseLayout, IndexLayout, LayoutKind, SkipThreesLayout};
pub use config::{ConfigError, SearchConfig};
pub use engine::{FoundZero, ReachabilityEngine, SearchObserver, ZeroCollector, ZeroPrinter};
