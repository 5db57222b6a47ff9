//! Deterministic seeded generation utilities.
//!
//! Provides the explicit RNG handle used by every stochastic operation,
//! per-operation seed derivation, deterministic trig via `libm`, and a
//! content hash for verifying that a seed reproduces a grid bit-for-bit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grid::HeightGrid;

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Build the RNG handle for a terrain session.
pub fn terrain_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derive an independent seed for a named operation stream.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the session seed with
/// a label, so hosts can give e.g. `"fault"` and `"particles"` their own
/// reproducible sequences.
pub fn derive_operation_seed(seed: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Hash the resolution and every sample's bit pattern.
///
/// Two grids hash equal only if they are bit-for-bit identical (modulo
/// hash collisions), which is stricter than `==` on `f64` for `-0.0`/NaN.
pub fn hash_grid(grid: &HeightGrid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.rows().hash(&mut hasher);
    grid.cols().hash(&mut hasher);
    for h in grid.samples() {
        h.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_terrain_rng_deterministic() {
        let mut rng_a = terrain_rng(42);
        let mut rng_b = terrain_rng(42);
        for _ in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "ChaCha8Rng sequences must match for same seed"
            );
        }
    }

    #[test]
    fn test_derive_operation_seed_deterministic() {
        assert_eq!(
            derive_operation_seed(999, "fault"),
            derive_operation_seed(999, "fault")
        );
    }

    #[test]
    fn test_derive_operation_seed_separates_labels() {
        assert_ne!(
            derive_operation_seed(42, "fault"),
            derive_operation_seed(42, "particles"),
            "Different labels should produce different seeds"
        );
        assert_ne!(
            derive_operation_seed(0, "fault"),
            derive_operation_seed(1, "fault"),
            "Different session seeds should produce different seeds"
        );
    }

    #[test]
    fn test_deterministic_math_functions() {
        let x = 1.234_567_890_123_4;
        assert_eq!(det_sin(x), det_sin(x));
        assert_eq!(det_cos(x), det_cos(x));
        assert!((det_sin(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-15);
        assert!((det_cos(0.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_hash_grid_tracks_content() {
        let mut a = HeightGrid::new(4, 4).unwrap();
        let b = a.clone();
        assert_eq!(hash_grid(&a), hash_grid(&b));

        a.set(2, 3, 1.0);
        assert_ne!(hash_grid(&a), hash_grid(&b));
    }

    #[test]
    fn test_hash_grid_tracks_resolution() {
        let a = HeightGrid::new(2, 8).unwrap();
        let b = HeightGrid::new(8, 2).unwrap();
        assert_ne!(hash_grid(&a), hash_grid(&b));
    }
}
