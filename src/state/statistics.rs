// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are owned by the engine and incremented as windows are processed.

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};
use tracing::info;

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// 64-bit windows finalised.
    WindowsProcessed,
    /// Non-trivial zeros reported.
    ZerosFound,
    /// Columns created (including column 0).
    ColumnsCreated,
    /// Capacity doublings across all columns.
    ColumnGrowths,
    /// Column bits seen on positions pre-seeded as multiples of 3.
    ExcludedPositionHits,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    /// Add `amount` to the specified counter.
    pub fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Emit every counter on one `info` line.
    pub fn log_summary(&self) {
        let summary = Counters::iter()
            .map(|counter| format!("{}={}", <&'static str>::from(counter), self.get(counter)))
            .collect::<Vec<_>>()
            .join(", ");
        info!("search statistics: {}", summary);
    }
}
