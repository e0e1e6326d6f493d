use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use sample_blindfold::prelude::*;

#[derive(Parser)]
#[command(name = "sample_blindfold")]
#[command(about = "Blind sample files under randomized names with a reversible rename log", long_about = None)]
struct Cli {
    /// Source folders whose files will be blinded (not searched recursively)
    #[arg(required = true)]
    folders: Vec<PathBuf>,

    /// Destination folder for the renamed copies and the rename log
    #[arg(short, long)]
    destination: PathBuf,

    /// Number indices in shuffled batches of sorted files instead of one global shuffle
    #[arg(long)]
    batched: bool,

    /// Batch size for batched numbering (implies --batched, default: 50)
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Filename ordering applied before batching
    #[arg(long, value_enum)]
    sort_mode: Option<SortMode>,

    /// Word placed between the date stamp and the index
    #[arg(long)]
    label: Option<String>,

    /// Date used for the YYMMDD stamp, as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Seed for the shuffle, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write into an existing destination folder instead of refusing
    #[arg(long)]
    allow_existing: bool,

    /// JSON preset with run settings; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append the diagnostic log to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Forwards events to tracing without tearing the progress bar
struct CliSink {
    progress: ProgressBar,
    inner: TracingSink,
}

impl DiagnosticSink for CliSink {
    fn record(&self, event: &DiagnosticEvent) {
        self.progress.suspend(|| self.inner.record(event));
        match event {
            DiagnosticEvent::FilesCollected { total } => self.progress.set_length(*total as u64),
            DiagnosticEvent::FileCopied { .. } => self.progress.inc(1),
            _ => {}
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), &cli.log_level)?;
    let config = build_config(&cli)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Sample Blindfold");
    println!("Blinding files from {} folder(s) into {}", cli.folders.len(), cli.destination.display());
    println!();

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let sink = Arc::new(CliSink {
        progress: progress.clone(),
        inner: TracingSink,
    });
    let engine = BlindingEngine::new(config, rng).with_sink(sink);
    let request = RunRequest::new(cli.folders.clone(), cli.destination.clone());

    let outcome = engine.spawn(request).await.context("Blinding task did not complete")?;

    match outcome {
        Ok(RunOutcome::Completed(report)) => {
            progress.finish_with_message("Blinding complete!");
            println!();
            println!("==================================================");
            println!("BLINDING COMPLETE");
            println!("==================================================");
            println!("Files copied: {}", report.files_copied);
            println!("Bytes copied: {}", report.bytes_copied);
            println!("Destination: {}", report.destination.display());
            println!("Rename log saved to: {}", report.log_path.display());
            Ok(())
        }
        Ok(RunOutcome::NoFiles) => {
            progress.finish_and_clear();
            println!("No files found in the selected folders. Nothing was copied.");
            Ok(())
        }
        Err(err) => {
            progress.abandon();
            if err.leaves_partial_output() {
                eprintln!(
                    "⚠️  {} holds copied files from an unfinished run; without the rename log they cannot be unblinded.",
                    cli.destination.display()
                );
            }
            Err(err).context("Blinding run failed")
        }
    }
}

/// Merge the optional JSON preset with command-line overrides
fn build_config(cli: &Cli) -> Result<BlindConfig> {
    let mut config = match &cli.config {
        Some(path) => BlindConfig::load(path)?,
        None => BlindConfig::default(),
    };

    if cli.batched || cli.batch_size.is_some() {
        config.naming = NamingPolicy::Batched {
            batch_size: cli.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        };
    }
    if let Some(sort_mode) = cli.sort_mode {
        config.sort_mode = sort_mode;
    }
    if let Some(label) = &cli.label {
        config.label = label.clone();
    }
    if let Some(date) = cli.date {
        config.run_date = Some(date);
    }
    if cli.allow_existing {
        config.destination_policy = DestinationPolicy::AllowExisting;
    }

    config.validate()?;
    Ok(config)
}

/// Install the tracing subscriber for the diagnostic log
fn init_logging(log_file: Option<&Path>, level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}
