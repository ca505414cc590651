// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search configuration.
//!
//! A [`SearchConfig`] is a plain value object: build it, `validate()` it, then hand it
//! to the engine. Defaults come from [`crate::constants`].
//!
//! # Examples
//!
//! ```
//! use two_three_search::bits::LayoutKind;
//! use two_three_search::config::SearchConfig;
//!
//! let config = SearchConfig::bounded(1000).with_layout(LayoutKind::SkipThrees);
//! assert!(config.validate().is_ok());
//! assert!(SearchConfig::bounded(0).validate().is_err());
//! ```

pub mod errors;

pub use errors::ConfigError;

use crate::bits::LayoutKind;
use crate::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LAYOUT, MAX_LIMIT};
use std::time::Duration;

/// Everything needed to start a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// How integers map to bits in each column.
    pub layout: LayoutKind,

    /// Capacity, in chunks, of each newly created column.
    pub initial_capacity: usize,

    /// Largest integer to examine. `None` runs until stopped.
    pub limit: Option<u64>,

    /// Refresh interval of the progress line. `None` disables it.
    pub progress_interval: Option<Duration>,

    /// Whether reported zeros carry the time since the search started.
    pub timestamps: bool,
}

impl SearchConfig {
    /// An unbounded search with default settings.
    pub fn new() -> Self {
        Self {
            layout: DEFAULT_LAYOUT,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            limit: None,
            progress_interval: None,
            timestamps: false,
        }
    }

    /// A search of the integers `1..=limit`.
    pub fn bounded(limit: u64) -> Self {
        Self::new().with_limit(Some(limit))
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_progress_interval(mut self, interval: Option<Duration>) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Check the configuration can be run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        match self.limit {
            Some(0) => Err(ConfigError::ZeroLimit),
            Some(limit) if limit > MAX_LIMIT => Err(ConfigError::LimitTooLarge {
                limit,
                max: MAX_LIMIT,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.layout, DEFAULT_LAYOUT);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.limit, None);
        assert!(!config.timestamps);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(SearchConfig::bounded(0).validate(), Err(ConfigError::ZeroLimit));
    }

    #[test]
    fn test_zero_capacity() {
        let config = SearchConfig::bounded(10).with_initial_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_limit_too_large() {
        let config = SearchConfig::bounded(u64::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::LimitTooLarge { limit: u64::MAX, max: MAX_LIMIT })
        );
        assert!(SearchConfig::bounded(MAX_LIMIT).validate().is_ok());
    }

    #[test]
    fn test_every_layout_is_configurable() {
        use strum::IntoEnumIterator;
        for layout in LayoutKind::iter() {
            let config = SearchConfig::bounded(64).with_layout(layout);
            assert!(config.validate().is_ok());
            assert_eq!(layout.to_string().parse::<LayoutKind>().unwrap(), layout);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::ZeroLimit.to_string(), "search limit must be at least 1");
        assert_eq!(
            ConfigError::LimitTooLarge { limit: 5, max: 4 }.to_string(),
            "search limit 5 exceeds the maximum of 4"
        );
    }
}
