//! Procedural heightmap generation: wave synthesis, random fill, faults,
//! smoothing, particle deposition, and diamond-square displacement over a
//! regular height grid.

mod diamond_square;
mod emitter;
mod error;
mod generator;
mod grid;
mod range;
mod source;
mod waves;

pub mod debug_viz;
pub mod seed;

pub use diamond_square::{DiamondSquareOutcome, ResolutionRejection, check_resolution};
pub use emitter::{Emitter, EmitterBehaviour, Particle};
pub use error::TerrainError;
pub use generator::{Deposit, FaultLine, TerrainGenerator};
pub use grid::HeightGrid;
pub use range::{Range, RangeSampler};
pub use source::HeightSource;
pub use waves::{TERRAIN_SIZE, WaveParameters, build_wave_height_map};
