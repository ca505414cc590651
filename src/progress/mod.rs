// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Progress line for long searches.
//!
//! The engine publishes its position into a [`ProgressSnapshot`] every few hundred
//! windows. A [`ProgressReporter`] thread wakes on a fixed interval and rewrites a
//! single `at: N (Z zeros, 0.4s ago)` line on stderr, where the age shows how long the
//! engine has been inside its current stretch of windows. The reporter never touches
//! engine state, and a stale reading is harmless.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Latest position published by the engine.
#[derive(Debug)]
pub struct ProgressSnapshot {
    started: Instant,
    position: AtomicU64,
    zeros: AtomicU64,
    updated_millis: AtomicU64,
}

impl ProgressSnapshot {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            position: AtomicU64::new(0),
            zeros: AtomicU64::new(0),
            updated_millis: AtomicU64::new(0),
        }
    }

    /// Record that every integer up to `position` has been examined.
    pub fn publish(&self, position: u64, zeros: u64) {
        self.position.store(position, Ordering::Relaxed);
        self.zeros.store(zeros, Ordering::Relaxed);
        let millis = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.updated_millis.store(millis, Ordering::Relaxed);
    }

    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    pub fn zeros(&self) -> u64 {
        self.zeros.load(Ordering::Relaxed)
    }

    /// Time between creating the snapshot and the last publication.
    pub fn last_update(&self) -> Duration {
        Duration::from_millis(self.updated_millis.load(Ordering::Relaxed))
    }

    /// Time since the last publication.
    pub fn age(&self) -> Duration {
        self.started.elapsed().saturating_sub(self.last_update())
    }

    /// The progress line for the current state.
    pub fn line(&self) -> String {
        format_progress(self.position(), self.zeros(), self.age())
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of one progress line, without the leading carriage return.
pub fn format_progress(position: u64, zeros: u64, age: Duration) -> String {
    format!("at: {} ({} zeros, {:.1}s ago)", position, zeros, age.as_secs_f64())
}

/// Background thread that redraws the progress line.
///
/// The stop channel doubles as the timer: `recv_timeout` returning `Timeout` means it
/// is time to redraw.
#[derive(Debug)]
pub struct ProgressReporter {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start redrawing the line from `snapshot` every `interval`.
    pub fn spawn(snapshot: Arc<ProgressSnapshot>, interval: Duration) -> Self {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let stderr = io::stderr();
            loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let line = snapshot.line();
                        let mut out = stderr.lock();
                        // A broken stderr is not worth stopping the search for
                        let _ = write!(out, "\r{}", line).and_then(|_| out.flush());
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            let line = snapshot.line();
            let _ = writeln!(stderr.lock(), "\r{}", line);
        });
        debug!("progress reporter started, interval {:?}", interval);
        Self { stop, handle }
    }

    /// Print the final line and wait for the thread to exit.
    pub fn stop(self) {
        // The thread exits on disconnect too, so a failed send is fine
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            warn!("progress reporter thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress() {
        assert_eq!(
            format_progress(1_000_000, 3, Duration::from_millis(1300)),
            "at: 1000000 (3 zeros, 1.3s ago)"
        );
    }

    #[test]
    fn test_snapshot_publish() {
        let snapshot = ProgressSnapshot::new();
        assert_eq!(snapshot.position(), 0);
        snapshot.publish(4096, 2);
        assert_eq!(snapshot.position(), 4096);
        assert_eq!(snapshot.zeros(), 2);
        assert!(snapshot.last_update() <= snapshot.started.elapsed());
        assert!(snapshot.line().starts_with("at: 4096 (2 zeros, "));
    }

    #[test]
    fn test_age_counts_from_last_publication() {
        let snapshot = ProgressSnapshot::new();
        thread::sleep(Duration::from_millis(200));
        assert!(snapshot.age() >= Duration::from_millis(200));
        snapshot.publish(64, 0);
        assert!(snapshot.age() < Duration::from_millis(200));
        assert!(snapshot.last_update() >= Duration::from_millis(200));
    }

    #[test]
    fn test_reporter_stops_promptly() {
        let snapshot = Arc::new(ProgressSnapshot::new());
        let reporter = ProgressReporter::spawn(Arc::clone(&snapshot), Duration::from_secs(3600));
        let start = Instant::now();
        reporter.stop();
        assert!(start.elapsed() < Duration::from_secs(60));
    }
}
