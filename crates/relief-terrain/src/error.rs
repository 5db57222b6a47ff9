//! Terrain engine error types.

/// Errors reported by grid construction, range validation, and deposition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A grid axis was zero quads wide.
    #[error("resolution must be at least 1x1 quads, got {rows}x{cols}")]
    ZeroResolution { rows: usize, cols: usize },

    /// The sample buffer for `(rows + 1) * (cols + 1)` vertices exceeds the
    /// largest possible allocation.
    #[error("resolution {rows}x{cols} is too large to allocate")]
    ResolutionTooLarge { rows: usize, cols: usize },

    /// A range was built with `min > max`.
    #[error("range is inverted: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },

    /// A range bound was NaN or infinite.
    #[error("range bounds must be finite, got [{min}, {max}]")]
    NonFiniteRange { min: f64, max: f64 },

    /// `max - min` overflows, so the range cannot be sampled uniformly.
    #[error("range span overflows: [{min}, {max}]")]
    RangeSpanOverflow { min: f64, max: f64 },

    /// No cell of the emitter's 3x3 neighbourhood lies inside the grid.
    #[error("emitter at ({m}, {n}) has no in-bounds neighbour")]
    EmitterOutOfBounds { m: i64, n: i64 },
}
