//! Stochastic heightmap operations driven by an explicit RNG handle.
//!
//! [`TerrainGenerator`] owns the random source and the particle emitter. The
//! grid itself stays with the caller and is lent to each operation, which runs
//! to completion before returning.

use glam::{DQuat, DVec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::diamond_square::{self, DiamondSquareOutcome};
use crate::emitter::Emitter;
use crate::error::TerrainError;
use crate::grid::HeightGrid;
use crate::range::{Range, RangeSampler};
use crate::seed::terrain_rng;

/// A fault line applied by [`TerrainGenerator::fault`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaultLine {
    /// Grid point the line passes through (`x` = m, `z` = n).
    pub origin: DVec3,
    /// Unit direction of the line in the horizontal plane.
    pub direction: DVec3,
    /// Height added on the raised side and subtracted on the other.
    pub offset: f64,
}

impl FaultLine {
    /// Returns `true` if vertex `(m, n)` lies on the raised side.
    pub fn raises(&self, m: usize, n: usize) -> bool {
        let to_vertex = DVec3::new(m as f64, 0.0, n as f64) - self.origin;
        self.direction.cross(to_vertex).y > 0.0
    }
}

/// A cell modified by (anti-)particle deposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deposit {
    pub m: usize,
    pub n: usize,
    /// Signed height change applied to the cell.
    pub delta: f64,
}

/// Which extremum deposition targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Extremum {
    Lowest,
    Highest,
}

/// Runs heightmap operations with a seedable random source.
pub struct TerrainGenerator<R: Rng = ChaCha8Rng> {
    rng: R,
    emitter: Emitter,
}

impl TerrainGenerator<ChaCha8Rng> {
    /// Generator seeded with `seed`, emitter placed randomly on `grid`.
    pub fn new(seed: u64, grid: &HeightGrid) -> Self {
        Self::from_rng(terrain_rng(seed), grid)
    }
}

impl<R: Rng> TerrainGenerator<R> {
    /// Generator driven by an existing RNG, emitter placed randomly on `grid`.
    pub fn from_rng(mut rng: R, grid: &HeightGrid) -> Self {
        let emitter = Emitter::random_within(grid, &mut rng);
        Self { rng, emitter }
    }

    /// Generator with an explicit emitter.
    pub fn with_emitter(rng: R, emitter: Emitter) -> Self {
        Self { rng, emitter }
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Place the emitter at a new random position on `grid`.
    ///
    /// Call after resizing the grid; the emitter otherwise keeps its old
    /// position, which may fall outside a smaller grid.
    pub fn reposition_emitter(&mut self, grid: &HeightGrid) {
        self.emitter = Emitter::random_within(grid, &mut self.rng);
    }

    /// Fill every vertex with an independent sample from `range`.
    pub fn build_random_height_map(&mut self, grid: &mut HeightGrid, range: &Range) {
        for m in 0..=grid.rows() {
            for n in 0..=grid.cols() {
                grid.set(m, n, RangeSampler::sample(range, &mut self.rng));
            }
        }
        tracing::debug!(
            "Built random height map {}x{} in [{}, {}]",
            grid.rows(),
            grid.cols(),
            range.min(),
            range.max()
        );
    }

    /// Raise one side of a random line and lower the other.
    ///
    /// The line passes through a random vertex with a direction obtained by
    /// rotating the `+n` axis by a uniform angle about the vertical. A single
    /// offset from `offset_range` is applied to every vertex.
    pub fn fault(&mut self, grid: &mut HeightGrid, offset_range: &Range) -> FaultLine {
        let origin = DVec3::new(
            self.rng.random_range(0..=grid.rows()) as f64,
            0.0,
            self.rng.random_range(0..=grid.cols()) as f64,
        );
        let angle = self.rng.random_range(0.0..std::f64::consts::TAU);
        let direction = DQuat::from_rotation_y(angle) * DVec3::Z;
        let line = FaultLine {
            origin,
            direction,
            offset: RangeSampler::sample(offset_range, &mut self.rng),
        };

        for m in 0..=grid.rows() {
            for n in 0..=grid.cols() {
                let delta = if line.raises(m, n) {
                    line.offset
                } else {
                    -line.offset
                };
                grid.add(m, n, delta);
            }
        }
        tracing::debug!(
            "Applied fault through ({}, {}) at {:.1} deg, offset {:.3}",
            origin.x,
            origin.z,
            angle.to_degrees(),
            line.offset
        );
        line
    }

    /// One 3x3 box-blur pass.
    ///
    /// Each vertex becomes the mean of itself and its in-bounds neighbours,
    /// read from the unmodified grid.
    pub fn smooth(&self, grid: &mut HeightGrid) {
        let mut smoothed = Vec::with_capacity(grid.vertex_count());
        for m in 0..=grid.rows() {
            for n in 0..=grid.cols() {
                smoothed.push(neighbours_average(grid, m, n));
            }
        }
        grid.replace_samples(smoothed);
    }

    /// Drop a particle and add its height to the lowest cell around it.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmitterOutOfBounds`] if the emitter's 3x3
    /// neighbourhood misses the grid entirely.
    pub fn particle_deposition(
        &mut self,
        grid: &mut HeightGrid,
        height_range: &Range,
    ) -> Result<Deposit, TerrainError> {
        self.deposit(grid, height_range, Extremum::Lowest)
    }

    /// Drop a particle and subtract its height from the highest cell around it.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmitterOutOfBounds`] if the emitter's 3x3
    /// neighbourhood misses the grid entirely.
    pub fn anti_particle_deposition(
        &mut self,
        grid: &mut HeightGrid,
        height_range: &Range,
    ) -> Result<Deposit, TerrainError> {
        self.deposit(grid, height_range, Extremum::Highest)
    }

    /// Apply diamond-square midpoint displacement.
    ///
    /// Both quad counts must be powers of two other than 2; otherwise the
    /// grid is left untouched and the rejection reason is returned.
    pub fn diamond_square(
        &mut self,
        grid: &mut HeightGrid,
        offset_range: &Range,
    ) -> DiamondSquareOutcome {
        diamond_square::displace(grid, offset_range, &mut self.rng)
    }

    fn deposit(
        &mut self,
        grid: &mut HeightGrid,
        height_range: &Range,
        target: Extremum,
    ) -> Result<Deposit, TerrainError> {
        let particle = self.emitter.drop_particle(height_range, &mut self.rng);
        let x = particle.position.x as i64;
        let z = particle.position.z as i64;

        // Rows outer, columns inner; strict comparison keeps the first extremum.
        let mut best: Option<(usize, usize, f64)> = None;
        for m in x - 1..=x + 1 {
            for n in z - 1..=z + 1 {
                if !grid.in_bounds(m, n) {
                    continue;
                }
                let (m, n) = (m as usize, n as usize);
                let h = grid.height(m, n);
                let better = match best {
                    None => true,
                    Some((_, _, current)) => match target {
                        Extremum::Lowest => h < current,
                        Extremum::Highest => h > current,
                    },
                };
                if better {
                    best = Some((m, n, h));
                }
            }
        }

        let Some((m, n, _)) = best else {
            tracing::warn!("Deposition skipped: emitter at ({x}, {z}) is off the grid");
            return Err(TerrainError::EmitterOutOfBounds { m: x, n: z });
        };
        let delta = match target {
            Extremum::Lowest => particle.height,
            Extremum::Highest => -particle.height,
        };
        grid.add(m, n, delta);
        Ok(Deposit { m, n, delta })
    }
}

/// Mean of vertex `(m, n)` and its in-bounds 3x3 neighbours.
fn neighbours_average(grid: &HeightGrid, m: usize, n: usize) -> f64 {
    let (mi, ni) = (m as i64, n as i64);
    let mut total = 0.0;
    let mut count = 0u32;
    for nm in mi - 1..=mi + 1 {
        for nn in ni - 1..=ni + 1 {
            if grid.in_bounds(nm, nn) {
                total += grid.height(nm as usize, nn as usize);
                count += 1;
            }
        }
    }
    total / f64::from(count)
}
