// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command line front end for the non-trivial zero search.

use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use two_three_search::bits::{DenseLayout, IndexLayout, LayoutKind, SkipThreesLayout};
use two_three_search::config::SearchConfig;
use two_three_search::constants::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_LAYOUT, DEFAULT_PROGRESS_MS, MAX_REFERENCE_LIMIT,
};
use two_three_search::engine::{
    ReachabilityEngine, RegisterPrinter, RegisterView, ZeroCollector, ZeroPrinter,
};
use two_three_search::progress::{ProgressReporter, ProgressSnapshot};
use two_three_search::reference;

#[derive(Parser)]
#[command(name = "two-three")]
#[command(about = "Find integers unreachable from 1 by doubling and adding successive powers of 3", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream non-trivial zeros to stdout
    Search {
        /// Largest integer to examine; runs until stopped when omitted
        limit: Option<u64>,

        /// Index layout: dense or skip-threes
        #[arg(long, default_value_t = DEFAULT_LAYOUT)]
        layout: LayoutKind,

        /// Chunks allocated for each new column
        #[arg(long, default_value_t = DEFAULT_INITIAL_CAPACITY)]
        initial_capacity: usize,

        /// Append the time since start to every zero
        #[arg(long)]
        timestamps: bool,

        /// Progress line refresh interval in milliseconds; 0 disables it
        #[arg(long, default_value_t = DEFAULT_PROGRESS_MS)]
        progress_ms: u64,
    },

    /// Check the streaming search against a direct search up to LIMIT
    Verify {
        limit: u64,

        /// Index layout: dense or skip-threes
        #[arg(long, default_value_t = DEFAULT_LAYOUT)]
        layout: LayoutKind,
    },

    /// Print the expansion register for the first WINDOWS windows of 64 positions
    Dump {
        windows: u64,

        /// Show only this column, one row per window
        #[arg(long)]
        column: Option<usize>,

        /// Index layout: dense or skip-threes
        #[arg(long, default_value_t = DEFAULT_LAYOUT)]
        layout: LayoutKind,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Search {
            limit,
            layout,
            initial_capacity,
            timestamps,
            progress_ms,
        } => {
            let progress = (progress_ms > 0).then(|| Duration::from_millis(progress_ms));
            let config = SearchConfig::new()
                .with_layout(layout)
                .with_limit(limit)
                .with_initial_capacity(initial_capacity)
                .with_timestamps(timestamps)
                .with_progress_interval(progress);
            match layout {
                LayoutKind::Dense => cmd_search::<DenseLayout>(&config)?,
                LayoutKind::SkipThrees => cmd_search::<SkipThreesLayout>(&config)?,
            }
        }
        Commands::Verify { limit, layout } => match layout {
            LayoutKind::Dense => cmd_verify(DenseLayout, limit)?,
            LayoutKind::SkipThrees => cmd_verify(SkipThreesLayout, limit)?,
        },
        Commands::Dump {
            windows,
            column,
            layout,
        } => match layout {
            LayoutKind::Dense => cmd_dump(DenseLayout, windows, column)?,
            LayoutKind::SkipThrees => cmd_dump(SkipThreesLayout, windows, column)?,
        },
    }

    Ok(())
}

fn cmd_search<L: IndexLayout>(config: &SearchConfig) -> Result<()> {
    let mut engine = ReachabilityEngine::<L>::from_config(config).context("invalid search configuration")?;

    let snapshot = config.progress_interval.map(|_| Arc::new(ProgressSnapshot::new()));
    if let Some(snapshot) = &snapshot {
        engine = engine.with_progress(Arc::clone(snapshot));
    }
    let reporter = snapshot
        .zip(config.progress_interval)
        .map(|(snapshot, interval)| ProgressReporter::spawn(snapshot, interval));

    let stdout = io::stdout();
    let mut printer = ZeroPrinter::new(BufWriter::new(stdout.lock()), config.timestamps);
    let result = engine.run(&mut printer).and_then(|_| printer.into_inner().flush());

    if let Some(reporter) = reporter {
        reporter.stop();
    }
    match result {
        // Piping into `head` closes stdout early; that is a normal way to stop
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write zeros"),
    }
}

fn cmd_verify<L: IndexLayout>(layout: L, limit: u64) -> Result<()> {
    if limit > MAX_REFERENCE_LIMIT {
        bail!(
            "verify limit {} exceeds the reference search maximum of {}",
            limit,
            MAX_REFERENCE_LIMIT
        );
    }
    let config = SearchConfig::bounded(limit).with_layout(layout.kind());
    let mut engine = ReachabilityEngine::<L>::from_config(&config).context("invalid search configuration")?;
    let mut collector = ZeroCollector::new();
    engine.run(&mut collector)?;
    let streamed = collector.into_zeros();

    info!("running reference search up to {}", limit);
    let expected = reference::non_trivial_zeros(limit);

    if let Some((got, want)) = streamed.iter().zip(&expected).find(|(got, want)| got != want) {
        bail!("streaming search reported {} where the reference search found {}", got, want);
    }
    if streamed.len() != expected.len() {
        bail!(
            "streaming search found {} zeros, the reference search {}",
            streamed.len(),
            expected.len()
        );
    }

    println!("verified up to {} ({} layout): {} zeros", limit, layout.kind(), expected.len());
    for zero in &expected {
        println!("{}", zero);
    }
    Ok(())
}

fn cmd_dump<L: IndexLayout>(layout: L, windows: u64, column: Option<usize>) -> Result<()> {
    if windows == 0 {
        bail!("nothing to dump: WINDOWS must be at least 1");
    }
    let view = column.map_or(RegisterView::Rows, RegisterView::Column);
    let mut engine = ReachabilityEngine::new(layout, DEFAULT_INITIAL_CAPACITY);
    let stdout = io::stdout();
    let mut printer = RegisterPrinter::new(BufWriter::new(stdout.lock()), layout, view);
    let result = engine
        .run_windows(windows, &mut printer)
        .and_then(|_| printer.into_inner().flush());
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write register dump"),
    }
}
