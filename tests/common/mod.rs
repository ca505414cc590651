// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::io;

use two_three_search::bits::{set_bits, IndexLayout};
use two_three_search::engine::{FoundZero, ReachabilityEngine, SearchObserver, ZeroCollector};

/// The non-trivial zeros up to 200000, from the direct search.
pub const KNOWN_ZEROS: [u64; 8] = [113, 226, 985, 1970, 3211, 6422, 27875, 55750];

/// Run a bounded streaming search and collect its zeros.
pub fn stream_zeros<L: IndexLayout>(layout: L, limit: u64, initial_capacity: usize) -> Vec<u64> {
    let mut engine = ReachabilityEngine::new(layout, initial_capacity).with_limit(limit);
    let mut collector = ZeroCollector::new();
    engine.run(&mut collector).unwrap();
    collector.into_zeros()
}

/// Records the integers in every column as the register streams past.
#[derive(Debug)]
pub struct ColumnRecorder<L: IndexLayout> {
    layout: L,
    pub columns: Vec<BTreeSet<u64>>,
}

impl<L: IndexLayout> ColumnRecorder<L> {
    pub fn new(layout: L) -> Self {
        Self {
            layout,
            columns: Vec::new(),
        }
    }

    pub fn contains(&self, column: usize, value: u64) -> bool {
        self.columns
            .get(column)
            .is_some_and(|values| values.contains(&value))
    }
}

impl<L: IndexLayout> SearchObserver for ColumnRecorder<L> {
    fn on_zero(&mut self, _zero: FoundZero) -> io::Result<()> {
        Ok(())
    }

    fn on_column_chunk(&mut self, start_index: u64, column: usize, chunk: u64) -> io::Result<()> {
        if self.columns.len() <= column {
            self.columns.resize_with(column + 1, BTreeSet::new);
        }
        for bit in set_bits(chunk) {
            let value = self.layout.value_of(start_index + u64::from(bit));
            self.columns[column].insert(value);
        }
        Ok(())
    }
}
