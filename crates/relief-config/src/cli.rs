//! Command-line argument parsing for the relief host.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::error::ConfigError;
use crate::pipeline::parse_pipeline;

/// Relief command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural heightmap generator")]
pub struct CliArgs {
    /// Quads along the row axis.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Quads along the column axis.
    #[arg(long)]
    pub cols: Option<usize>,

    /// Seed for all stochastic operations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated operations, e.g. `diamond_square,smooth:3`.
    #[arg(long)]
    pub ops: Option<String>,

    /// Frames rendered per waves step.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Write a PNG of the final grid to this path.
    #[arg(long)]
    pub output: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Fails only if `--ops` cannot be parsed; the config is unchanged then.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        let pipeline = args.ops.as_deref().map(parse_pipeline).transpose()?;

        if let Some(rows) = args.rows {
            self.terrain.rows = rows;
        }
        if let Some(cols) = args.cols {
            self.terrain.cols = cols;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(pipeline) = pipeline {
            self.pipeline = pipeline;
        }
        if let Some(frames) = args.frames {
            self.waves.frames = frames;
        }
        if let Some(ref path) = args.output {
            self.output.image_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        Ok(())
    }
}
