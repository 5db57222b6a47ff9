//! Row-major height grid with `(rows + 1) x (cols + 1)` vertices.
//!
//! `rows` and `cols` count quads; every axis has one more vertex than quads.
//! The sample at row `m`, column `n` lives at `n + m * (cols + 1)`.

use crate::error::TerrainError;
use crate::source::HeightSource;

/// Owned array of height samples for a regular terrain grid.
///
/// The length invariant `samples.len() == (rows + 1) * (cols + 1)` holds at
/// all times. Resizing discards old data and flattens the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    rows: usize,
    cols: usize,
    samples: Vec<f64>,
}

/// Number of vertices needed for a `rows x cols` quad grid.
///
/// Fails unless the sample buffer fits in a single allocation, whose size is
/// capped at `isize::MAX` bytes.
fn vertex_count_for(rows: usize, cols: usize) -> Result<usize, TerrainError> {
    if rows == 0 || cols == 0 {
        return Err(TerrainError::ZeroResolution { rows, cols });
    }
    rows.checked_add(1)
        .zip(cols.checked_add(1))
        .and_then(|(r, c)| r.checked_mul(c))
        .filter(|&count| {
            count
                .checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(TerrainError::ResolutionTooLarge { rows, cols })
}

impl HeightGrid {
    /// Creates a flat grid of `rows x cols` quads.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ZeroResolution`] if either axis is zero and
    /// [`TerrainError::ResolutionTooLarge`] if the vertex count overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, TerrainError> {
        let count = vertex_count_for(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            samples: vec![0.0; count],
        })
    }

    /// Change the resolution, reallocating and flattening the samples.
    ///
    /// Returns `Ok(false)` without touching the grid when the resolution is
    /// unchanged, `Ok(true)` after a reallocation. On error the grid keeps
    /// its previous resolution and contents.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<bool, TerrainError> {
        if rows == self.rows && cols == self.cols {
            return Ok(false);
        }
        let count = vertex_count_for(rows, cols)?;
        tracing::debug!(
            "Resizing height grid {}x{} -> {}x{}",
            self.rows,
            self.cols,
            rows,
            cols
        );
        self.rows = rows;
        self.cols = cols;
        self.samples = vec![0.0; count];
        Ok(true)
    }

    /// Sets every sample to `0.0`.
    pub fn flatten(&mut self) {
        self.samples.fill(0.0);
    }

    /// Number of quads along the row (m) axis.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of quads along the column (n) axis.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of vertices, `(rows + 1) * (cols + 1)`.
    pub fn vertex_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if `(m, n)` addresses a vertex of this grid.
    ///
    /// Takes signed coordinates so neighbour offsets like `m - 1` can be
    /// tested before converting to indices.
    pub fn in_bounds(&self, m: i64, n: i64) -> bool {
        m >= 0 && n >= 0 && m as u64 <= self.rows as u64 && n as u64 <= self.cols as u64
    }

    /// Flat index of vertex `(m, n)`.
    #[inline]
    pub fn index(&self, m: usize, n: usize) -> usize {
        debug_assert!(
            m <= self.rows && n <= self.cols,
            "vertex ({m}, {n}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        n + m * (self.cols + 1)
    }

    /// Height at vertex `(m, n)`.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is outside the grid. Callers check
    /// [`in_bounds`](Self::in_bounds) first or iterate within the grid.
    #[inline]
    pub fn height(&self, m: usize, n: usize) -> f64 {
        self.samples[self.index(m, n)]
    }

    /// Checked read; `None` when `(m, n)` is outside the grid.
    pub fn get(&self, m: usize, n: usize) -> Option<f64> {
        if m <= self.rows && n <= self.cols {
            Some(self.samples[self.index(m, n)])
        } else {
            None
        }
    }

    /// Overwrites the height at vertex `(m, n)`.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is outside the grid.
    #[inline]
    pub fn set(&mut self, m: usize, n: usize, value: f64) {
        let idx = self.index(m, n);
        self.samples[idx] = value;
    }

    /// Adds `delta` to the height at vertex `(m, n)`.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is outside the grid.
    #[inline]
    pub fn add(&mut self, m: usize, n: usize, delta: f64) {
        let idx = self.index(m, n);
        self.samples[idx] += delta;
    }

    /// Row-major view of all samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Swap in a freshly computed sample buffer of identical length.
    pub(crate) fn replace_samples(&mut self, samples: Vec<f64>) {
        debug_assert_eq!(samples.len(), self.samples.len());
        self.samples = samples;
    }

    /// Lowest and highest sample.
    pub fn min_max(&self) -> (f64, f64) {
        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }
}

impl HeightSource for HeightGrid {
    fn resolution(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn height(&self, m: usize, n: usize) -> f64 {
        HeightGrid::height(self, m, n)
    }

    fn height_bounds(&self) -> (f64, f64) {
        self.min_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_vertex_per_corner() {
        let grid = HeightGrid::new(4, 7).unwrap();
        assert_eq!(grid.vertex_count(), 5 * 8);
        assert!(grid.samples().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert_eq!(
            HeightGrid::new(0, 4).unwrap_err(),
            TerrainError::ZeroResolution { rows: 0, cols: 4 }
        );
        assert!(HeightGrid::new(4, 0).is_err());
    }

    #[test]
    fn test_overflowing_resolution_rejected() {
        assert!(matches!(
            HeightGrid::new(usize::MAX, 2),
            Err(TerrainError::ResolutionTooLarge { .. })
        ));
    }

    #[test]
    fn test_unallocatable_resolution_rejected() {
        // The vertex count fits in usize but its byte size does not fit in isize.
        let quads = 1usize << (usize::BITS / 2 - 1);
        assert_eq!(
            HeightGrid::new(quads, quads).unwrap_err(),
            TerrainError::ResolutionTooLarge {
                rows: quads,
                cols: quads
            }
        );

        let mut grid = HeightGrid::new(2, 2).unwrap();
        assert!(grid.resize(quads, quads).is_err());
        assert_eq!(grid.rows(), 2);
    }

    #[test]
    fn test_row_major_index() {
        let grid = HeightGrid::new(3, 5).unwrap();
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(0, 5), 5);
        assert_eq!(grid.index(1, 0), 6);
        assert_eq!(grid.index(3, 5), 23);
    }

    #[test]
    fn test_flatten_zeroes_everything() {
        let mut grid = HeightGrid::new(6, 3).unwrap();
        for m in 0..=6 {
            for n in 0..=3 {
                grid.set(m, n, (m * 10 + n) as f64);
            }
        }
        grid.flatten();
        assert!(grid.samples().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_resize_reallocates_and_flattens() {
        let mut grid = HeightGrid::new(4, 4).unwrap();
        grid.set(2, 2, 9.0);
        assert!(grid.resize(8, 3).unwrap());
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.vertex_count(), 9 * 4);
        assert!(grid.samples().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_resize_same_dimensions_is_noop() {
        let mut grid = HeightGrid::new(4, 4).unwrap();
        grid.set(1, 3, -2.5);
        let before = grid.clone();
        assert!(!grid.resize(4, 4).unwrap());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_failed_resize_keeps_grid() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        grid.set(1, 1, 3.0);
        let before = grid.clone();
        assert!(grid.resize(0, 2).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_in_bounds_is_inclusive() {
        let grid = HeightGrid::new(2, 3).unwrap();
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(2, 3));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(3, 0));
        assert!(!grid.in_bounds(0, 4));
    }

    #[test]
    fn test_checked_get() {
        let mut grid = HeightGrid::new(1, 1).unwrap();
        grid.set(1, 1, 4.0);
        assert_eq!(grid.get(1, 1), Some(4.0));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_statistics() {
        let mut grid = HeightGrid::new(1, 1).unwrap();
        grid.set(0, 0, -2.0);
        grid.set(1, 1, 6.0);
        assert_eq!(grid.min_max(), (-2.0, 6.0));
        assert_eq!(grid.mean(), 1.0);
    }
}
