//! Particle emitter used by (anti-)particle deposition.

use glam::DVec3;
use rand::Rng;

use crate::grid::HeightGrid;
use crate::range::{Range, RangeSampler};

/// Spawn-position policy of an [`Emitter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitterBehaviour {
    /// Every particle spawns at the emitter's own position.
    #[default]
    Default,
}

/// A particle ready to be deposited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Grid-space position; `x` is the row axis (m), `z` the column axis (n).
    /// `y` is unused.
    pub position: DVec3,
    /// Magnitude added to or removed from the terrain.
    pub height: f64,
}

/// A stochastic particle source pinned to a grid position.
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    position: DVec3,
    behaviour: EmitterBehaviour,
}

impl Emitter {
    /// Emitter at a fixed grid-space position.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            behaviour: EmitterBehaviour::Default,
        }
    }

    /// Emitter placed uniformly at random within `[0, rows] x [0, cols]`.
    pub fn random_within<R: Rng + ?Sized>(grid: &HeightGrid, rng: &mut R) -> Self {
        let x = rng.random_range(0.0..=grid.rows() as f64);
        let z = rng.random_range(0.0..=grid.cols() as f64);
        Self::at(DVec3::new(x, 0.0, z))
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn behaviour(&self) -> EmitterBehaviour {
        self.behaviour
    }

    /// Emit a particle with a magnitude drawn from `height_range`.
    pub fn drop_particle<R: Rng + ?Sized>(&self, height_range: &Range, rng: &mut R) -> Particle {
        let position = match self.behaviour {
            EmitterBehaviour::Default => self.position,
        };
        Particle {
            position,
            height: RangeSampler::sample(height_range, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_emitter_within_grid() {
        let grid = HeightGrid::new(16, 9).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let emitter = Emitter::random_within(&grid, &mut rng);
            let p = emitter.position();
            assert!((0.0..=16.0).contains(&p.x), "x={} out of grid", p.x);
            assert!((0.0..=9.0).contains(&p.z), "z={} out of grid", p.z);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_particles_spawn_at_emitter() {
        let emitter = Emitter::at(DVec3::new(3.0, 0.0, 4.0));
        let range = Range::new(1.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let particle = emitter.drop_particle(&range, &mut rng);
            assert_eq!(particle.position, emitter.position());
            assert!(range.contains(particle.height));
        }
        assert_eq!(emitter.behaviour(), EmitterBehaviour::Default);
    }
}
