//! Pipeline execution for the headless host.
//!
//! A [`TerrainSession`] owns the grid, the generator and the wave phase state,
//! and applies configured operations in order.

use std::path::PathBuf;

use relief_config::{Config, ConfigError, OperationConfig, RangeConfig, RangesConfig};
use relief_terrain::debug_viz::{ImageEncodeError, render_grayscale_debug, render_height_debug};
use relief_terrain::seed::{derive_operation_seed, hash_grid};
use relief_terrain::{
    DiamondSquareOutcome, HeightGrid, Range, TerrainError, TerrainGenerator, WaveParameters,
    build_wave_height_map,
};
use tracing::{info, warn};

/// Resolution the example-terrain preset resizes to.
pub const EXAMPLE_RESOLUTION: usize = 128;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("terrain error: {0}")]
    Terrain(#[from] TerrainError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode debug image: {0}")]
    Image(#[from] ImageEncodeError),
    #[error("failed to write debug image {path}: {source}")]
    WriteImage {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Validated sampling ranges for every stochastic operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranges {
    pub random: Range,
    pub fault: Range,
    pub particle: Range,
    pub diamond_square: Range,
}

impl Ranges {
    pub fn from_config(config: &RangesConfig) -> Result<Self, TerrainError> {
        let range = |r: &RangeConfig| Range::new(r.min, r.max);
        Ok(Self {
            random: range(&config.random)?,
            fault: range(&config.fault)?,
            particle: range(&config.particle)?,
            diamond_square: range(&config.diamond_square)?,
        })
    }
}

/// Grid statistics recorded after one pipeline step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub op: OperationConfig,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub hash: u64,
}

/// Grid, generator and wave state for one run.
pub struct TerrainSession {
    config: Config,
    grid: HeightGrid,
    generator: TerrainGenerator,
    ranges: Ranges,
    waves: WaveParameters,
}

impl TerrainSession {
    /// Build a flat grid and a generator seeded from `config.terrain.seed`.
    pub fn new(config: Config) -> Result<Self, RunError> {
        config.validate()?;
        let ranges = Ranges::from_config(&config.ranges)?;
        let grid = HeightGrid::new(config.terrain.rows, config.terrain.cols)?;
        let generator =
            TerrainGenerator::new(derive_operation_seed(config.terrain.seed, "generator"), &grid);
        let waves = WaveParameters {
            frequency_x: config.waves.frequency.0,
            frequency_z: config.waves.frequency.1,
            amplitude_x: config.waves.amplitude.0,
            amplitude_z: config.waves.amplitude.1,
            move_x: config.waves.move_x,
            move_z: config.waves.move_z,
            ..WaveParameters::default()
        };
        info!(
            "Terrain session {}x{} (seed {})",
            grid.rows(),
            grid.cols(),
            config.terrain.seed
        );
        Ok(Self {
            config,
            grid,
            generator,
            ranges,
            waves,
        })
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    /// Run the configured pipeline, honouring repeat counts.
    ///
    /// Returns one report per executed operation.
    pub fn run(&mut self) -> Result<Vec<StepReport>, RunError> {
        let mut reports = Vec::new();
        for step in self.config.effective_pipeline() {
            for _ in 0..step.repeat {
                reports.push(self.run_op(step.op)?);
            }
        }
        Ok(reports)
    }

    /// Apply a single operation and report the resulting grid statistics.
    pub fn run_op(&mut self, op: OperationConfig) -> Result<StepReport, RunError> {
        match op {
            OperationConfig::Flatten => self.grid.flatten(),
            OperationConfig::Waves => self.animate_waves(),
            OperationConfig::Random => self
                .generator
                .build_random_height_map(&mut self.grid, &self.ranges.random),
            OperationConfig::Fault => {
                self.generator.fault(&mut self.grid, &self.ranges.fault);
            }
            OperationConfig::Smooth => self.generator.smooth(&mut self.grid),
            OperationConfig::ParticleDeposition => {
                self.generator
                    .particle_deposition(&mut self.grid, &self.ranges.particle)?;
            }
            OperationConfig::AntiParticleDeposition => {
                self.generator
                    .anti_particle_deposition(&mut self.grid, &self.ranges.particle)?;
            }
            OperationConfig::DiamondSquare => {
                let range = self.ranges.diamond_square;
                self.diamond_square(&range);
            }
            OperationConfig::ExampleTerrain => self.example_terrain()?,
        }

        let report = self.report(op);
        if self.config.debug.log_step_stats {
            info!(
                "{}: min {:.3} max {:.3} mean {:.3} hash {:016x}",
                report.op.name(),
                report.min,
                report.max,
                report.mean,
                report.hash
            );
        }
        Ok(report)
    }

    /// Render the grid and write it to the configured image path.
    ///
    /// Returns the written path, or `None` when no path is configured.
    pub fn write_image(&self) -> Result<Option<PathBuf>, RunError> {
        let Some(path) = self.config.output.image_path.as_ref().map(PathBuf::from) else {
            return Ok(None);
        };
        let image = if self.config.output.grayscale {
            render_grayscale_debug(&self.grid)
        } else {
            render_height_debug(&self.grid, self.config.output.sea_level)
        };
        let bytes = image.encode_png()?;
        std::fs::write(&path, bytes).map_err(|source| RunError::WriteImage {
            path: path.clone(),
            source,
        })?;
        info!("Wrote debug image to {}", path.display());
        Ok(Some(path))
    }

    /// Rebuild the waves from phase zero, then advance `frames` times.
    fn animate_waves(&mut self) {
        let dt = self.config.waves.dt;
        self.waves = self.waves.reset_offsets();
        for _ in 0..self.config.waves.frames {
            self.waves = build_wave_height_map(&mut self.grid, &self.waves, dt);
        }
    }

    fn diamond_square(&mut self, range: &Range) {
        if let DiamondSquareOutcome::Rejected(reason) =
            self.generator.diamond_square(&mut self.grid, range)
        {
            warn!("Diamond-square left the grid unchanged: {reason}");
        }
    }

    fn example_terrain(&mut self) -> Result<(), TerrainError> {
        if self.grid.resize(EXAMPLE_RESOLUTION, EXAMPLE_RESOLUTION)? {
            self.generator.reposition_emitter(&self.grid);
        }
        let range = Range::new(-30.0, 40.0)?;
        self.diamond_square(&range);
        self.generator.smooth(&mut self.grid);
        Ok(())
    }

    fn report(&self, op: OperationConfig) -> StepReport {
        let (min, max) = self.grid.min_max();
        StepReport {
            op,
            min,
            max,
            mean: self.grid.mean(),
            hash: hash_grid(&self.grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_config::PipelineStep;

    fn config(rows: usize, cols: usize, ops: &[OperationConfig]) -> Config {
        let mut config = Config::default();
        config.terrain.rows = rows;
        config.terrain.cols = cols;
        config.terrain.seed = 11;
        config.debug.log_step_stats = false;
        config.pipeline = ops.iter().copied().map(PipelineStep::once).collect();
        config
    }

    #[test]
    fn test_empty_pipeline_runs_example_terrain() {
        let mut session = TerrainSession::new(config(16, 16, &[])).unwrap();
        let reports = session.run().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].op, OperationConfig::ExampleTerrain);
        assert_eq!(session.grid().rows(), EXAMPLE_RESOLUTION);
        assert_eq!(session.grid().cols(), EXAMPLE_RESOLUTION);
        assert!(reports[0].max > reports[0].min);
    }

    #[test]
    fn test_repeat_counts_honoured() {
        let mut cfg = config(8, 8, &[OperationConfig::Random]);
        cfg.pipeline.push(PipelineStep {
            op: OperationConfig::Smooth,
            repeat: 3,
        });
        let mut session = TerrainSession::new(cfg).unwrap();
        let reports = session.run().unwrap();
        let ops: Vec<_> = reports.iter().map(|r| r.op).collect();
        assert_eq!(
            ops,
            vec![
                OperationConfig::Random,
                OperationConfig::Smooth,
                OperationConfig::Smooth,
                OperationConfig::Smooth,
            ]
        );
    }

    #[test]
    fn test_same_seed_same_hashes() {
        let ops = [
            OperationConfig::DiamondSquare,
            OperationConfig::Fault,
            OperationConfig::ParticleDeposition,
            OperationConfig::Smooth,
        ];
        let a = TerrainSession::new(config(32, 32, &ops)).unwrap().run().unwrap();
        let b = TerrainSession::new(config(32, 32, &ops)).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_waves_thread_offsets_across_frames() {
        let mut cfg = config(8, 8, &[OperationConfig::Waves]);
        cfg.waves.move_x = true;
        cfg.waves.dt = 0.5;
        cfg.waves.frames = 4;
        let mut session = TerrainSession::new(cfg).unwrap();
        session.run().unwrap();
        assert_eq!(session.waves.offset_x, 2.0);
        assert_eq!(session.waves.offset_z, 0.0);
    }

    #[test]
    fn test_each_waves_step_restarts_phase() {
        let mut cfg = config(8, 8, &[]);
        cfg.pipeline = vec![PipelineStep {
            op: OperationConfig::Waves,
            repeat: 2,
        }];
        cfg.waves.move_z = true;
        cfg.waves.dt = 0.25;
        cfg.waves.frames = 3;
        let mut session = TerrainSession::new(cfg).unwrap();
        let reports = session.run().unwrap();

        assert_eq!(session.waves.offset_z, 0.75);
        assert_eq!(reports[0].hash, reports[1].hash);
    }

    #[test]
    fn test_rejected_diamond_square_is_not_an_error() {
        let mut session =
            TerrainSession::new(config(6, 6, &[OperationConfig::DiamondSquare])).unwrap();
        let reports = session.run().unwrap();
        assert_eq!(reports[0].min, 0.0);
        assert_eq!(reports[0].max, 0.0);
    }

    #[test]
    fn test_flatten_after_random() {
        let mut session = TerrainSession::new(config(
            8,
            8,
            &[OperationConfig::Random, OperationConfig::Flatten],
        ))
        .unwrap();
        let reports = session.run().unwrap();
        assert!(reports[0].max > reports[0].min);
        assert_eq!((reports[1].min, reports[1].max), (0.0, 0.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = config(8, 8, &[]);
        cfg.ranges.fault = RangeConfig::new(3.0, -3.0);
        assert!(matches!(
            TerrainSession::new(cfg),
            Err(RunError::Config(ConfigError::Invalid { .. }))
        ));
    }

    #[test]
    fn test_write_image_to_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("terrain.png");
        let mut cfg = config(8, 8, &[OperationConfig::Random]);
        cfg.output.image_path = Some(path.to_string_lossy().into_owned());
        let mut session = TerrainSession::new(cfg).unwrap();
        session.run().unwrap();

        let written = session.write_image().unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_no_image_path_writes_nothing() {
        let session = TerrainSession::new(config(4, 4, &[])).unwrap();
        assert!(session.write_image().unwrap().is_none());
    }
}
