// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Observer trait for reporting what the engine finds.
//!
//! The engine itself never prints. Each window it hands its observer the chunk of every
//! active column, then each zero it found, then a summary of the window. Observers
//! decide what, if anything, to write.
//!
//! # Example
//!
//! ```
//! use two_three_search::bits::DenseLayout;
//! use two_three_search::engine::{ReachabilityEngine, ZeroCollector};
//!
//! let mut engine = ReachabilityEngine::new(DenseLayout, 4).with_limit(100);
//! let mut zeros = ZeroCollector::new();
//! engine.run(&mut zeros).unwrap();
//! assert!(zeros.zeros().iter().all(|n| n % 3 != 0));
//! ```

use crate::bits::{format_chunk, IndexLayout};
use crate::constants::CHUNK_BITS;
use std::io::{self, Write};
use std::time::Duration;

/// A non-trivial zero: a non-multiple of 3 that no sequence of operations reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundZero {
    /// The unreachable integer.
    pub value: u64,
    /// Time since the engine was created.
    pub elapsed: Duration,
}

/// What one window looked like once all columns were merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSummary {
    /// Bit index of the first position in the window.
    pub start_index: u64,
    /// OR of every column chunk in the window, with excluded positions set.
    pub aggregate: u64,
    /// Number of zeros reported for this window.
    pub zeros: u32,
    /// Number of columns in the register when the window closed.
    pub columns: usize,
}

/// Receives the engine's output as it streams.
///
/// All methods but [`SearchObserver::on_zero`] default to doing nothing.
pub trait SearchObserver {
    /// Called once per non-trivial zero, in increasing order.
    fn on_zero(&mut self, zero: FoundZero) -> io::Result<()>;

    /// Called for every column whose cursor is at the window, lowest column first,
    /// with the chunk as merged into the aggregate.
    fn on_column_chunk(&mut self, _start_index: u64, _column: usize, _chunk: u64) -> io::Result<()> {
        Ok(())
    }

    /// Called after every zero of the window has been reported.
    fn on_window_end(&mut self, _summary: WindowSummary) -> io::Result<()> {
        Ok(())
    }

    /// Observer name, for log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Keeps every zero in memory.
#[derive(Debug, Default, Clone)]
pub struct ZeroCollector {
    zeros: Vec<u64>,
}

impl ZeroCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zeros(&self) -> &[u64] {
        &self.zeros
    }

    pub fn into_zeros(self) -> Vec<u64> {
        self.zeros
    }
}

impl SearchObserver for ZeroCollector {
    fn on_zero(&mut self, zero: FoundZero) -> io::Result<()> {
        self.zeros.push(zero.value);
        Ok(())
    }
}

/// Writes one `found zero: N` line per zero, with an optional ` @ 1.234s` suffix.
#[derive(Debug)]
pub struct ZeroPrinter<W: Write> {
    out: W,
    timestamps: bool,
}

impl<W: Write> ZeroPrinter<W> {
    pub fn new(out: W, timestamps: bool) -> Self {
        Self { out, timestamps }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchObserver for ZeroPrinter<W> {
    fn on_zero(&mut self, zero: FoundZero) -> io::Result<()> {
        if self.timestamps {
            writeln!(self.out, "found zero: {} @ {:.3}s", zero.value, zero.elapsed.as_secs_f64())
        } else {
            writeln!(self.out, "found zero: {}", zero.value)
        }
    }

    fn on_window_end(&mut self, summary: WindowSummary) -> io::Result<()> {
        // Zeros are rare: flush as they come so a long run shows them promptly
        if summary.zeros > 0 {
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Which part of the register a [`RegisterPrinter`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterView {
    /// One row per bit position, one character per column, highest column first.
    Rows,
    /// One row per window for a single column, least significant bit first.
    Column(usize),
}

/// Dumps the expansion register as it streams past.
#[derive(Debug)]
pub struct RegisterPrinter<W: Write, L: IndexLayout> {
    out: W,
    layout: L,
    view: RegisterView,
    chunks: Vec<u64>,
}

impl<W: Write, L: IndexLayout> RegisterPrinter<W, L> {
    pub fn new(out: W, layout: L, view: RegisterView) -> Self {
        Self {
            out,
            layout,
            view,
            chunks: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_rows(&mut self, summary: &WindowSummary) -> io::Result<()> {
        for bit in 0..CHUNK_BITS {
            let value = self.layout.value_of(summary.start_index + bit);
            let cells: String = (0..summary.columns)
                .rev()
                .map(|column| {
                    let chunk = self.chunks.get(column).copied().unwrap_or(0);
                    if (chunk >> bit) & 1 == 1 {
                        '#'
                    } else {
                        '-'
                    }
                })
                .collect();
            let marker = if (summary.aggregate >> bit) & 1 == 0 {
                "  zero"
            } else {
                ""
            };
            writeln!(self.out, "{:>12} {}{}", value, cells, marker)?;
        }
        Ok(())
    }
}

impl<W: Write, L: IndexLayout> SearchObserver for RegisterPrinter<W, L> {
    fn on_zero(&mut self, _zero: FoundZero) -> io::Result<()> {
        Ok(())
    }

    fn on_column_chunk(&mut self, _start_index: u64, column: usize, chunk: u64) -> io::Result<()> {
        if self.chunks.len() <= column {
            self.chunks.resize(column + 1, 0);
        }
        self.chunks[column] = chunk;
        Ok(())
    }

    fn on_window_end(&mut self, summary: WindowSummary) -> io::Result<()> {
        match self.view {
            RegisterView::Rows => self.write_rows(&summary)?,
            RegisterView::Column(column) => {
                let chunk = self.chunks.get(column).copied().unwrap_or(0);
                let first = self.layout.value_of(summary.start_index);
                writeln!(self.out, "{:>12} {}", first, format_chunk(chunk))?;
            }
        }
        self.chunks.iter_mut().for_each(|chunk| *chunk = 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::DenseLayout;

    fn summary(start_index: u64, aggregate: u64, columns: usize) -> WindowSummary {
        WindowSummary {
            start_index,
            aggregate,
            zeros: 0,
            columns,
        }
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = ZeroCollector::new();
        for value in [5u64, 7, 11] {
            collector
                .on_zero(FoundZero { value, elapsed: Duration::ZERO })
                .unwrap();
        }
        assert_eq!(collector.into_zeros(), vec![5, 7, 11]);
    }

    #[test]
    fn test_zero_printer_lines() {
        let mut printer = ZeroPrinter::new(Vec::new(), false);
        printer
            .on_zero(FoundZero { value: 1042, elapsed: Duration::from_millis(1500) })
            .unwrap();
        assert_eq!(String::from_utf8(printer.into_inner()).unwrap(), "found zero: 1042\n");

        let mut printer = ZeroPrinter::new(Vec::new(), true);
        printer
            .on_zero(FoundZero { value: 1042, elapsed: Duration::from_millis(1500) })
            .unwrap();
        assert_eq!(
            String::from_utf8(printer.into_inner()).unwrap(),
            "found zero: 1042 @ 1.500s\n"
        );
    }

    #[test]
    fn test_register_column_view() {
        let mut printer = RegisterPrinter::new(Vec::new(), DenseLayout, RegisterView::Column(1));
        printer.on_column_chunk(64, 0, u64::MAX).unwrap();
        printer.on_column_chunk(64, 1, 0b101).unwrap();
        printer.on_window_end(summary(64, u64::MAX, 2)).unwrap();
        // Column 1 did not show up in the next window, so it prints empty
        printer.on_window_end(summary(128, u64::MAX, 2)).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{:>12} #-#{}", 64, "-".repeat(61)));
        assert_eq!(lines[1], format!("{:>12} {}", 128, "-".repeat(64)));
    }

    #[test]
    fn test_register_rows_view() {
        let mut printer = RegisterPrinter::new(Vec::new(), DenseLayout, RegisterView::Rows);
        printer.on_column_chunk(0, 0, 0b0110).unwrap();
        printer.on_column_chunk(0, 1, 0b0100).unwrap();
        printer.on_window_end(summary(0, 0b0111, 2)).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 64);
        assert_eq!(lines[0], format!("{:>12} --", 0));
        assert_eq!(lines[1], format!("{:>12} -#", 1));
        assert_eq!(lines[2], format!("{:>12} ##", 2));
        assert_eq!(lines[3], format!("{:>12} --  zero", 3));
    }
}
