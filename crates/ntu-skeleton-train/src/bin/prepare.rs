//! `prepare` binary: build an NTU RGB+D skeleton dataset and optionally
//! export it as NPY arrays.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin prepare -- --root data/ntu --seq-len 10 --out out/train
//! cargo run --bin prepare -- --config dataset.json --eval --out out/eval
//! ```

use clap::Parser;
use ntu_skeleton_train::config::DatasetConfig;
use ntu_skeleton_train::dataset::{NtuRgbdDataset, SkeletonDataset};
use ntu_skeleton_train::error::{TrainError, TrainResult};
use ntu_skeleton_train::export::export_npy;
use ntu_skeleton_train::split::SplitScheme;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for the dataset preparation binary.
#[derive(Parser, Debug)]
#[command(
    name = "prepare",
    version,
    about = "Build windowed or padded NTU RGB+D skeleton datasets",
    long_about = None
)]
struct Args {
    /// Path to a JSON dataset configuration.
    ///
    /// If not provided, the default `DatasetConfig` is used.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the dataset root directory.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Override the window length.
    #[arg(long)]
    seq_len: Option<usize>,

    /// Override the target offset.
    #[arg(long)]
    stride: Option<usize>,

    /// Build the padded eval collection instead of training windows.
    #[arg(long, default_value_t = false)]
    eval: bool,

    /// Override the split scheme (`cross_subject` or `cross_setup`).
    #[arg(long)]
    split: Option<SplitScheme>,

    /// Override the eval padding length.
    #[arg(long)]
    max_len: Option<usize>,

    /// Write the arrays as NPY files into this directory.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    info!("NTU RGB+D dataset preparation v{}", ntu_skeleton_train::VERSION);

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> TrainResult<()> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            DatasetConfig::from_json(path)?
        }
        None => {
            info!("No configuration file provided, using defaults");
            DatasetConfig::default()
        }
    };

    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(seq_len) = args.seq_len {
        config.seq_len = seq_len;
    }
    if let Some(stride) = args.stride {
        config.stride = stride;
    }
    if args.eval {
        config.is_train = false;
    }
    if let Some(split) = args.split {
        config.split = split;
    }
    if let Some(max_len) = args.max_len {
        config.max_len = max_len;
    }
    config.validate()?;

    info!("  root     : {}", config.root.display());
    info!("  mode     : {}", if config.is_train { "train" } else { "eval" });
    info!("  split    : {}", config.split);
    info!("  seq_len  : {}", config.seq_len);
    info!("  stride   : {}", config.stride);
    info!("  max_len  : {}", config.max_len);
    info!("  labels   : {:?}", config.labels);

    let dataset = NtuRgbdDataset::new(config)?;
    if dataset.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let shape = dataset.inputs().shape().to_vec();
    info!("{}: {} items, array shape {:?}", dataset.name(), dataset.len(), shape);

    if let Some(dir) = args.out {
        for path in export_npy(&dataset, &dir)? {
            info!("  wrote {}", path.display());
        }
    }
    Ok(())
}
