//! Diamond-square midpoint displacement.
//!
//! Alternates a square step (chunk centres from their four corners) with a
//! diamond step (edge midpoints from their in-bounds cardinal neighbours),
//! halving the chunk size and the offset range after every level.

use rand::Rng;

use crate::grid::HeightGrid;
use crate::range::{Range, RangeSampler};

/// Why a grid resolution cannot be displaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionRejection {
    /// An axis quad count is not a power of two.
    #[error("{rows}x{cols} quads: every axis must be a power of two")]
    NotPowerOfTwo { rows: usize, cols: usize },
    /// An axis has exactly two quads, which the algorithm excludes.
    #[error("{rows}x{cols} quads: an axis of exactly two quads is not supported")]
    TwoQuadAxis { rows: usize, cols: usize },
}

/// Result of a diamond-square request.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiamondSquareOutcome {
    /// The grid was displaced through `levels` square/diamond refinements.
    Applied { levels: u32 },
    /// The grid was left untouched.
    Rejected(ResolutionRejection),
}

impl DiamondSquareOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Check that both axes are powers of two other than 2.
pub fn check_resolution(rows: usize, cols: usize) -> Result<(), ResolutionRejection> {
    for quads in [rows, cols] {
        if !quads.is_power_of_two() {
            return Err(ResolutionRejection::NotPowerOfTwo { rows, cols });
        }
        if quads == 2 {
            return Err(ResolutionRejection::TwoQuadAxis { rows, cols });
        }
    }
    Ok(())
}

/// Run diamond-square over the whole grid.
///
/// The coarsest lattice uses a chunk size of `min(rows, cols)`; on a square
/// grid this seeds exactly the four corners, on a rectangular one every
/// lattice point along the longer axis. Values are not clamped afterwards.
pub(crate) fn displace<R: Rng + ?Sized>(
    grid: &mut HeightGrid,
    offset_range: &Range,
    rng: &mut R,
) -> DiamondSquareOutcome {
    let rows = grid.rows();
    let cols = grid.cols();
    if let Err(rejection) = check_resolution(rows, cols) {
        tracing::warn!("Diamond-square skipped: {rejection}");
        return DiamondSquareOutcome::Rejected(rejection);
    }

    let mut chunk = rows.min(cols);
    for m in (0..=rows).step_by(chunk) {
        for n in (0..=cols).step_by(chunk) {
            grid.set(m, n, RangeSampler::sample(offset_range, rng));
        }
    }

    let mut current = *offset_range;
    let mut levels = 0;
    while chunk > 1 {
        let half = chunk / 2;
        square_step(grid, chunk, half, &current, rng);
        diamond_step(grid, chunk, half, &current, rng);
        chunk = half;
        current = current.halved();
        levels += 1;
    }

    tracing::debug!(
        "Diamond-square applied to {}x{} grid over {} levels",
        rows,
        cols,
        levels
    );
    DiamondSquareOutcome::Applied { levels }
}

/// Set every chunk centre to its corner average plus a random offset.
fn square_step<R: Rng + ?Sized>(
    grid: &mut HeightGrid,
    chunk: usize,
    half: usize,
    range: &Range,
    rng: &mut R,
) {
    for m in (0..grid.rows()).step_by(chunk) {
        for n in (0..grid.cols()).step_by(chunk) {
            let corners = grid.height(m, n)
                + grid.height(m, n + chunk)
                + grid.height(m + chunk, n)
                + grid.height(m + chunk, n + chunk);
            let offset = RangeSampler::sample(range, rng);
            grid.set(m + half, n + half, corners / 4.0 + offset);
        }
    }
}

/// Set every diamond centre to the average of its in-bounds cardinal
/// neighbours plus a random offset.
fn diamond_step<R: Rng + ?Sized>(
    grid: &mut HeightGrid,
    chunk: usize,
    half: usize,
    range: &Range,
    rng: &mut R,
) {
    let h = half as i64;
    for m in (0..=grid.rows()).step_by(half) {
        // Diamond centres alternate between odd and even half-steps per row.
        let n_start = if (m / half) % 2 == 0 { half } else { 0 };
        for n in (n_start..=grid.cols()).step_by(chunk) {
            let (mi, ni) = (m as i64, n as i64);
            let mut sum = 0.0;
            let mut count = 0u32;
            for (nm, nn) in [(mi - h, ni), (mi, ni - h), (mi, ni + h), (mi + h, ni)] {
                if grid.in_bounds(nm, nn) {
                    sum += grid.height(nm as usize, nn as usize);
                    count += 1;
                }
            }
            let offset = RangeSampler::sample(range, rng);
            grid.set(m, n, sum / f64::from(count) + offset);
        }
    }
}
