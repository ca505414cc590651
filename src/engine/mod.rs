// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Streaming reachability engine.
//!
//! Starting from 1, an integer may be doubled, or, after k additions so far, have
//! 3^(k+1) added. The engine finds the non-multiples of 3 that can never be reached.
//!
//! # Architecture
//!
//! The engine keeps an expansion register: column k marks the integers reachable
//! with exactly k additions. It sweeps the integers in 64-bit windows. In each window
//! every column whose cursor sits at the window:
//!
//! 1. contributes its chunk to the window's aggregate,
//! 2. doubles into itself, at least one window ahead,
//! 3. adds the next power of three into the column to its right, creating it if needed,
//! 4. slides forward one chunk.
//!
//! Columns are processed lowest first, so writes into column k+1 from this window land
//! before column k+1 is read. Once every column has been seen, each clear bit of the
//! aggregate is a non-trivial zero.
//!
//! The one write that does not land ahead is doubling out of the window at 0, which is
//! closed inside the window before use.
//!
//! # Example
//!
//! ```
//! use two_three_search::bits::SkipThreesLayout;
//! use two_three_search::engine::{ReachabilityEngine, ZeroCollector};
//!
//! let mut engine = ReachabilityEngine::new(SkipThreesLayout, 8).with_limit(20);
//! let mut zeros = ZeroCollector::new();
//! engine.run(&mut zeros).unwrap();
//! assert!(zeros.zeros().is_empty());
//! ```

pub mod observer;

pub use observer::{
    FoundZero, RegisterPrinter, RegisterView, SearchObserver, WindowSummary, ZeroCollector,
    ZeroPrinter,
};

use crate::bits::{set_bits, IndexLayout};
use crate::column::ExpansionColumn;
use crate::config::{ConfigError, SearchConfig};
use crate::constants::{CHUNK_BITS, PROGRESS_PUBLISH_MASK};
use crate::memo::power_of_three;
use crate::progress::ProgressSnapshot;
use crate::state::{Counters, Statistics};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

/// The streaming search over one index layout.
#[derive(Debug)]
pub struct ReachabilityEngine<L: IndexLayout> {
    layout: L,

    /// Column k holds the integers reachable with exactly k additions.
    columns: Vec<ExpansionColumn>,

    /// Bit index of the first position of the next window.
    window: u64,

    /// Capacity, in chunks, given to each new column.
    initial_capacity: usize,

    /// Last bit index examined, when bounded.
    horizon: Option<u64>,

    stats: Statistics,
    started: Instant,
    progress: Option<Arc<ProgressSnapshot>>,
}

impl<L: IndexLayout> ReachabilityEngine<L> {
    /// An unbounded engine seeded with the single integer 1 in column 0.
    ///
    /// # Panics
    ///
    /// Panics if `initial_capacity` is 0.
    pub fn new(layout: L, initial_capacity: usize) -> Self {
        let seed = ExpansionColumn::new(initial_capacity, 0, 1u64 << layout.seed_index());
        let mut stats = Statistics::new();
        stats.increment(Counters::ColumnsCreated);
        Self {
            layout,
            columns: vec![seed],
            window: 0,
            initial_capacity,
            horizon: None,
            stats,
            started: Instant::now(),
            progress: None,
        }
    }

    /// Build an engine from a validated configuration.
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = L::default();
        if layout.kind() != config.layout {
            return Err(ConfigError::LayoutMismatch {
                configured: config.layout,
                engine: layout.kind(),
            });
        }
        let engine = Self::new(layout, config.initial_capacity);
        Ok(match config.limit {
            Some(limit) => engine.with_limit(limit),
            None => engine,
        })
    }

    /// Examine only the integers `1..=limit`.
    ///
    /// Propagation past the limit is dropped, so column memory stays proportional to it.
    pub fn with_limit(mut self, limit: u64) -> Self {
        assert!(limit > 0, "search limit must be at least 1");
        // Multiples of 3 have no index in every layout, and are never zeros anyway
        let last = if limit % 3 == 0 { limit - 1 } else { limit };
        self.horizon = Some(self.layout.index_of(last));
        self
    }

    /// Publish progress into `snapshot` as the search runs.
    pub fn with_progress(mut self, snapshot: Arc<ProgressSnapshot>) -> Self {
        self.progress = Some(snapshot);
        self
    }

    pub fn layout(&self) -> L {
        self.layout
    }

    pub fn columns(&self) -> &[ExpansionColumn] {
        &self.columns
    }

    /// Bit index of the first position of the next window.
    pub fn window(&self) -> u64 {
        self.window
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Whether the window containing the limit has been processed.
    pub fn is_finished(&self) -> bool {
        self.horizon.is_some_and(|horizon| self.window > horizon)
    }

    /// Run until the limit, or forever when unbounded.
    pub fn run(&mut self, observer: &mut dyn SearchObserver) -> io::Result<()> {
        info!(
            "search started: layout {}, limit {:?}, observer {}",
            self.layout.kind(),
            self.horizon.map(|index| self.layout.value_of(index)),
            observer.name()
        );
        while self.step_window(observer)?.is_some() {}
        self.finish();
        Ok(())
    }

    /// Process at most `windows` windows. Returns how many were processed.
    pub fn run_windows(&mut self, windows: u64, observer: &mut dyn SearchObserver) -> io::Result<u64> {
        let mut processed = 0;
        while processed < windows && self.step_window(observer)?.is_some() {
            processed += 1;
        }
        self.finish();
        Ok(processed)
    }

    /// Process the next window and report its zeros.
    ///
    /// Returns `None`, without doing anything, once the limit has been passed.
    ///
    /// # Panics
    ///
    /// Panics if a column has fallen behind the window: its unread bits would be lost.
    pub fn step_window(&mut self, observer: &mut dyn SearchObserver) -> io::Result<Option<WindowSummary>> {
        if self.is_finished() {
            return Ok(None);
        }
        let base = self.window;
        let excluded = self.layout.excluded_mask(base);
        let mut aggregate = excluded;

        let mut i = 0;
        while i < self.columns.len() {
            let origin = self.columns[i].origin();
            if origin > base {
                i += 1;
                continue;
            }
            assert!(
                origin == base,
                "column {} lags behind the window: origin {} < {}, missed some chunks",
                i,
                origin,
                base
            );

            let mut chunk = self.columns[i].peek_current_chunk();
            if chunk != 0 {
                if base == 0 {
                    chunk = self.layout.close_first_window(chunk);
                }
                self.stats
                    .add(Counters::ExcludedPositionHits, u64::from((chunk & excluded).count_ones()));
                aggregate |= chunk;
                self.propagate_doubling(i, base, chunk);
                self.propagate_power(i, base, chunk);
            }
            observer.on_column_chunk(base, i, chunk)?;
            self.columns[i].advance_by_one_chunk();
            i += 1;
        }

        let zeros = self.report_zeros(base, aggregate, observer)?;
        let summary = WindowSummary {
            start_index: base,
            aggregate,
            zeros,
            columns: self.columns.len(),
        };
        trace!("window {}: aggregate {:#018x}, {} zeros", base, aggregate, zeros);
        observer.on_window_end(summary)?;

        self.window += CHUNK_BITS;
        self.stats.increment(Counters::WindowsProcessed);
        if self.stats.get(Counters::WindowsProcessed) & PROGRESS_PUBLISH_MASK == 0 {
            self.publish_progress();
        }
        Ok(Some(summary))
    }

    fn report_zeros(&mut self, base: u64, aggregate: u64, observer: &mut dyn SearchObserver) -> io::Result<u32> {
        let candidates = self.clip(base, !aggregate);
        for bit in set_bits(candidates) {
            let value = self.layout.value_of(base + u64::from(bit));
            debug_assert!(value % 3 != 0, "multiple of 3 reported as a zero: {}", value);
            self.stats.increment(Counters::ZerosFound);
            observer.on_zero(FoundZero {
                value,
                elapsed: self.started.elapsed(),
            })?;
        }
        Ok(candidates.count_ones())
    }

    /// Double column `i`'s chunk back into column `i`.
    fn propagate_doubling(&mut self, i: usize, base: u64, chunk: u64) {
        let target = self.layout.doubling_target(base);
        let [low, high] = self.layout.spread_doubled(chunk);
        self.write(i, target, low);
        if let Some(next) = target.checked_add(CHUNK_BITS) {
            self.write(i, next, high);
        }
    }

    /// Add 3^(i+1) to column `i`'s chunk and merge it into column `i + 1`.
    fn propagate_power(&mut self, i: usize, base: u64, chunk: u64) {
        let offset = self.layout.power_offset(power_of_three(i + 1));
        let target = base + offset;
        if self.clip(target, chunk) == 0 {
            return;
        }
        if i + 1 == self.columns.len() {
            let origin = target - target % CHUNK_BITS;
            debug!("creating column {} at index {}", i + 1, origin);
            self.columns
                .push(ExpansionColumn::new(self.initial_capacity, origin, 0));
            self.stats.increment(Counters::ColumnsCreated);
        }
        self.write(i + 1, target, chunk);
    }

    /// OR `pattern` into `column` at `index`, dropping bits past the horizon.
    fn write(&mut self, column: usize, index: u64, pattern: u64) {
        let pattern = self.clip(index, pattern);
        if pattern == 0 {
            return;
        }
        let doublings = self.columns[column].or_bits_at(index, pattern);
        if doublings > 0 {
            self.stats.add(Counters::ColumnGrowths, doublings as u64);
            debug!(
                "column {} grew to {} chunks",
                column,
                self.columns[column].capacity()
            );
        }
    }

    /// Clear the bits of a pattern at `index` that fall past the horizon.
    fn clip(&self, index: u64, pattern: u64) -> u64 {
        match self.horizon {
            None => pattern,
            Some(horizon) if index > horizon => 0,
            Some(horizon) => match horizon - index {
                keep if keep >= CHUNK_BITS - 1 => pattern,
                keep => pattern & ((1u64 << (keep + 1)) - 1),
            },
        }
    }

    fn publish_progress(&self) {
        if let Some(progress) = &self.progress {
            let last = self.layout.value_of(self.window.saturating_sub(1));
            progress.publish(last, self.stats.get(Counters::ZerosFound));
        }
    }

    fn finish(&self) {
        self.publish_progress();
        self.stats.log_summary();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{DenseLayout, LayoutKind, SkipThreesLayout};

    fn zeros_up_to<L: IndexLayout>(layout: L, limit: u64) -> Vec<u64> {
        let mut engine = ReachabilityEngine::new(layout, 2).with_limit(limit);
        let mut collector = ZeroCollector::new();
        engine.run(&mut collector).unwrap();
        collector.into_zeros()
    }

    #[test]
    fn test_no_zeros_up_to_twenty() {
        assert!(zeros_up_to(DenseLayout, 20).is_empty());
        assert!(zeros_up_to(SkipThreesLayout, 20).is_empty());
    }

    #[test]
    fn test_column_zero_holds_powers_of_two() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 1).with_limit(64 * 8);
        let mut printer = RegisterPrinter::new(Vec::new(), DenseLayout, RegisterView::Column(0));
        engine.run(&mut printer).unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        for (window, line) in text.lines().enumerate() {
            let cells = line.split_whitespace().nth(1).unwrap();
            for (bit, cell) in cells.chars().enumerate() {
                let value = (window * 64 + bit) as u64;
                assert_eq!(cell == '#', value.is_power_of_two(), "value {}", value);
            }
        }
    }

    #[test]
    fn test_windows_are_counted() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 4).with_limit(1000);
        engine.run(&mut ZeroCollector::new()).unwrap();
        // Windows 0..=960 cover 1000
        assert_eq!(engine.statistics().get(Counters::WindowsProcessed), 16);
        assert!(engine.is_finished());
        assert!(engine.step_window(&mut ZeroCollector::new()).unwrap().is_none());
    }

    #[test]
    fn test_excluded_positions_never_hit() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 4).with_limit(5000);
        engine.run(&mut ZeroCollector::new()).unwrap();
        assert_eq!(engine.statistics().get(Counters::ExcludedPositionHits), 0);
    }

    #[test]
    fn test_horizon_stops_column_creation() {
        // 1 + 3 = 4 is the first value in column 1; 4 + 9 = 13 the first in column 2
        let mut engine = ReachabilityEngine::new(DenseLayout, 4).with_limit(12);
        engine.run(&mut ZeroCollector::new()).unwrap();
        assert_eq!(engine.columns().len(), 2);
        assert_eq!(engine.statistics().get(Counters::ColumnsCreated), 2);
    }

    #[test]
    fn test_small_capacity_grows() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 1).with_limit(4096);
        engine.run(&mut ZeroCollector::new()).unwrap();
        assert!(engine.statistics().get(Counters::ColumnGrowths) > 0);
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig::bounded(100).with_layout(LayoutKind::SkipThrees);
        let engine = ReachabilityEngine::<SkipThreesLayout>::from_config(&config).unwrap();
        assert_eq!(engine.layout().kind(), LayoutKind::SkipThrees);
        assert!(!engine.is_finished());

        let err = ReachabilityEngine::<DenseLayout>::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::LayoutMismatch {
                configured: LayoutKind::SkipThrees,
                engine: LayoutKind::Dense,
            }
        );
        assert!(ReachabilityEngine::<DenseLayout>::from_config(&SearchConfig::bounded(0)).is_err());
    }

    #[test]
    fn test_run_windows() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 4);
        let processed = engine.run_windows(10, &mut ZeroCollector::new()).unwrap();
        assert_eq!(processed, 10);
        assert_eq!(engine.window(), 640);
        assert!(!engine.is_finished());
    }

    #[test]
    #[should_panic(expected = "lags behind")]
    fn test_lagging_column_is_fatal() {
        let mut engine = ReachabilityEngine::new(DenseLayout, 4);
        engine.run_windows(3, &mut ZeroCollector::new()).unwrap();
        // A column still at 0 when the window is at 192 has missed three chunks
        engine.columns.push(ExpansionColumn::new(4, 0, 0));
        let _ = engine.step_window(&mut ZeroCollector::new());
    }
}
