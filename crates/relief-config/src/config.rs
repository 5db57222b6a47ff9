//! Configuration structs with sensible defaults and RON persistence.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pipeline::{OperationConfig, PipelineStep};

/// Largest quad count accepted per grid axis.
pub const MAX_RESOLUTION: usize = 1025;

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid and seeding settings.
    pub terrain: TerrainConfig,
    /// Wave synthesis settings.
    pub waves: WavesConfig,
    /// Sampling ranges per operation.
    pub ranges: RangesConfig,
    /// Operations to run, in order.
    pub pipeline: Vec<PipelineStep>,
    /// Debug image output.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Quads along the row (m) axis.
    pub rows: usize,
    /// Quads along the column (n) axis.
    pub cols: usize,
    /// Seed for every stochastic operation.
    pub seed: u64,
}

/// Wave synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WavesConfig {
    /// Base frequencies `(x, z)`.
    pub frequency: (f64, f64),
    /// Base amplitudes `(x, z)`.
    pub amplitude: (f64, f64),
    /// Advance the x phase between frames.
    pub move_x: bool,
    /// Advance the z phase between frames.
    pub move_z: bool,
    /// Phase advance per frame.
    pub dt: f64,
    /// Number of frames rendered per `Waves` step.
    pub frames: u32,
}

/// A closed `[min, max]` interval as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

impl RangeConfig {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Sampling ranges for each stochastic operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RangesConfig {
    pub random: RangeConfig,
    pub fault: RangeConfig,
    pub particle: RangeConfig,
    pub diamond_square: RangeConfig,
}

/// Debug image output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write a PNG of the final grid. Nothing is written when unset.
    pub image_path: Option<String>,
    /// Render grayscale instead of elevation colour bands.
    pub grayscale: bool,
    /// Water line for colour bands, in height units.
    pub sea_level: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log grid statistics after every pipeline step.
    pub log_step_stats: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            rows: 128,
            cols: 128,
            seed: 0,
        }
    }
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            frequency: (0.156, 0.346),
            amplitude: (2.602, 4.065),
            move_x: false,
            move_z: false,
            dt: 0.016,
            frames: 1,
        }
    }
}

impl Default for RangesConfig {
    fn default() -> Self {
        Self {
            random: RangeConfig::new(-5.0, 5.0),
            fault: RangeConfig::new(-2.0, 2.0),
            particle: RangeConfig::new(0.5, 1.0),
            diamond_square: RangeConfig::new(-30.0, 40.0),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_step_stats: true,
        }
    }
}

// --- Validation ---

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn check_resolution(field: &str, quads: usize) -> Result<(), ConfigError> {
    if quads == 0 || quads > MAX_RESOLUTION {
        return Err(invalid(
            field,
            format!("{quads} is outside 1..={MAX_RESOLUTION}"),
        ));
    }
    Ok(())
}

fn check_range(field: &str, range: &RangeConfig) -> Result<(), ConfigError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(invalid(field, "bounds must be finite"));
    }
    if range.min > range.max {
        return Err(invalid(
            field,
            format!("min {} is greater than max {}", range.min, range.max),
        ));
    }
    if !(range.max - range.min).is_finite() {
        return Err(invalid(field, "span max - min overflows"));
    }
    Ok(())
}

impl Config {
    /// Check every value against its permitted domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_resolution("terrain.rows", self.terrain.rows)?;
        check_resolution("terrain.cols", self.terrain.cols)?;
        check_range("ranges.random", &self.ranges.random)?;
        check_range("ranges.fault", &self.ranges.fault)?;
        check_range("ranges.particle", &self.ranges.particle)?;
        check_range("ranges.diamond_square", &self.ranges.diamond_square)?;

        let waves = [
            self.waves.frequency.0,
            self.waves.frequency.1,
            self.waves.amplitude.0,
            self.waves.amplitude.1,
            self.waves.dt,
        ];
        if waves.iter().any(|v| !v.is_finite()) {
            return Err(invalid("waves", "coefficients must be finite"));
        }
        if !self.output.sea_level.is_finite() {
            return Err(invalid("output.sea_level", "must be finite"));
        }
        Ok(())
    }

    /// The default pipeline when none is configured.
    pub fn effective_pipeline(&self) -> Vec<PipelineStep> {
        if self.pipeline.is_empty() {
            vec![PipelineStep::once(OperationConfig::ExampleTerrain)]
        } else {
            self.pipeline.clone()
        }
    }
}

// --- Load / Save / Reload ---

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Where [`Config::load_or_create`] got its config from.
///
/// Loading usually happens before logging is set up, so the caller reports
/// this once its subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; the defaults were written here.
    Created(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            Self::Created(path) => write!(f, "Wrote default config to {}", path.display()),
        }
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist.
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            return Ok((config, ConfigOrigin::Created(path)));
        }
        let config = read_config(&path)?;
        Ok((config, ConfigOrigin::Loaded(path)))
    }

    /// Write the config to `config_dir` as pretty-printed RON.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        let path = config_dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, serialized).map_err(|source| ConfigError::Write { path, source })
    }

    /// Re-read the file, returning `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk; reloaded");
        Ok(Some(fresh))
    }
}
