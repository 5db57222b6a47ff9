//! Closed real intervals and uniform sampling from them.

use rand::Rng;

use crate::error::TerrainError;

/// A closed interval `[min, max]` used for sampling heights and offsets.
///
/// Construction rejects inverted and non-finite bounds, so every `Range`
/// in circulation can be sampled without further checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NonFiniteRange`] if either bound is NaN or
    /// infinite, [`TerrainError::InvertedRange`] if `min > max`, and
    /// [`TerrainError::RangeSpanOverflow`] if `max - min` is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, TerrainError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(TerrainError::NonFiniteRange { min, max });
        }
        if min > max {
            return Err(TerrainError::InvertedRange { min, max });
        }
        // Uniform sampling scales by the span, which must itself be finite.
        if !(max - min).is_finite() {
            return Err(TerrainError::RangeSpanOverflow { min, max });
        }
        Ok(Self { min, max })
    }

    /// A degenerate range that always samples `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NonFiniteRange`] if `value` is not finite.
    pub fn constant(value: f64) -> Result<Self, TerrainError> {
        Self::new(value, value)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` if `value` lies in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both bounds halved. Used for per-level roughness decay.
    pub fn halved(&self) -> Self {
        Self {
            min: self.min * 0.5,
            max: self.max * 0.5,
        }
    }
}

/// Draws uniform reals from a [`Range`].
pub struct RangeSampler;

impl RangeSampler {
    /// Sample uniformly from the closed interval `[range.min, range.max]`.
    ///
    /// A degenerate range returns its single value exactly.
    pub fn sample<R: Rng + ?Sized>(range: &Range, rng: &mut R) -> f64 {
        if range.min == range.max {
            return range.min;
        }
        rng.random_range(range.min..=range.max)
    }
}
