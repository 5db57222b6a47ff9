//! Ordered terrain operations run by the host.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single terrain operation the host can trigger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OperationConfig {
    /// Reset every height to zero.
    Flatten,
    /// Rebuild from sine/cosine waves, animated over `waves.frames` frames.
    Waves,
    /// Fill with uniform samples from `ranges.random`.
    Random,
    /// One fault line with an offset from `ranges.fault`.
    Fault,
    /// One 3x3 box-blur pass.
    Smooth,
    /// Drop one particle with a height from `ranges.particle`.
    ParticleDeposition,
    /// Drop one anti-particle with a height from `ranges.particle`.
    AntiParticleDeposition,
    /// Diamond-square with offsets from `ranges.diamond_square`.
    DiamondSquare,
    /// Resize to 128x128, diamond-square with [-30, 40], then smooth once.
    ExampleTerrain,
}

impl OperationConfig {
    /// Snake-case name used on the command line and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flatten => "flatten",
            Self::Waves => "waves",
            Self::Random => "random",
            Self::Fault => "fault",
            Self::Smooth => "smooth",
            Self::ParticleDeposition => "particle_deposition",
            Self::AntiParticleDeposition => "anti_particle_deposition",
            Self::DiamondSquare => "diamond_square",
            Self::ExampleTerrain => "example_terrain",
        }
    }

    const ALL: [Self; 9] = [
        Self::Flatten,
        Self::Waves,
        Self::Random,
        Self::Fault,
        Self::Smooth,
        Self::ParticleDeposition,
        Self::AntiParticleDeposition,
        Self::DiamondSquare,
        Self::ExampleTerrain,
    ];
}

impl FromStr for OperationConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownOperation(s.trim().to_string()))
    }
}

fn default_repeat() -> u32 {
    1
}

/// An operation plus how many times to run it back to back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineStep {
    pub op: OperationConfig,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl PipelineStep {
    pub fn once(op: OperationConfig) -> Self {
        Self { op, repeat: 1 }
    }
}

impl FromStr for PipelineStep {
    type Err = ConfigError;

    /// Parses `name` or `name:count`, e.g. `fault:50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, repeat) = match s.split_once(':') {
            Some((name, count)) => {
                let repeat = count.trim().parse().map_err(|_| ConfigError::Invalid {
                    field: "pipeline".to_string(),
                    reason: format!("bad repeat count in `{s}`"),
                })?;
                (name, repeat)
            }
            None => (s, 1),
        };
        Ok(Self {
            op: name.parse()?,
            repeat,
        })
    }
}

/// Parse a comma-separated pipeline such as `diamond_square,smooth:3`.
pub(crate) fn parse_pipeline(list: &str) -> Result<Vec<PipelineStep>, ConfigError> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_roundtrip() {
        for op in OperationConfig::ALL {
            assert_eq!(op.name().parse::<OperationConfig>().unwrap(), op);
        }
    }

    #[test]
    fn test_operation_parse_is_lenient_about_case_and_dashes() {
        assert_eq!(
            "Diamond-Square".parse::<OperationConfig>().unwrap(),
            OperationConfig::DiamondSquare
        );
    }

    #[test]
    fn test_unknown_operation() {
        let err = "erode".parse::<OperationConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOperation(name) if name == "erode"));
    }

    #[test]
    fn test_parse_pipeline_with_repeats() {
        let steps = parse_pipeline("random, smooth:3,fault:50,").unwrap();
        assert_eq!(
            steps,
            vec![
                PipelineStep::once(OperationConfig::Random),
                PipelineStep {
                    op: OperationConfig::Smooth,
                    repeat: 3
                },
                PipelineStep {
                    op: OperationConfig::Fault,
                    repeat: 50
                },
            ]
        );
    }

    #[test]
    fn test_parse_pipeline_bad_count() {
        assert!(matches!(
            parse_pipeline("smooth:lots"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_step_repeat_defaults_to_one() {
        let step: PipelineStep = ron::from_str("(op: Fault)").unwrap();
        assert_eq!(step, PipelineStep::once(OperationConfig::Fault));
    }
}
