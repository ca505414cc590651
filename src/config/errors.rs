// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for search configuration.
//!
//! These are the only recoverable errors in the crate. Everything the engine detects
//! once running is an invariant violation and panics.

use crate::bits::LayoutKind;
use thiserror::Error;

/// A search configuration that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The search bound must be at least 1.
    #[error("search limit must be at least 1")]
    ZeroLimit,

    /// Columns need at least one chunk.
    #[error("initial column capacity must be at least one chunk")]
    ZeroCapacity,

    /// The bound is too close to the top of the u64 range for doubling to be safe.
    #[error("search limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: u64, max: u64 },

    /// The configuration asks for a different layout from the engine being built.
    #[error("configured layout {configured} does not match the {engine} engine")]
    LayoutMismatch { configured: LayoutKind, engine: LayoutKind },
}
