//! Configuration system for the relief terrain host.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, validation, and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;
mod pipeline;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, ConfigOrigin, DebugConfig, MAX_RESOLUTION, OutputConfig, RangeConfig,
    RangesConfig, TerrainConfig, WavesConfig,
};
pub use error::ConfigError;
pub use pipeline::{OperationConfig, PipelineStep};
