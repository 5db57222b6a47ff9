//! Three-octave sine/cosine wave synthesis.
//!
//! Rows carry a cosine series and columns a sine series. Each octave doubles
//! the frequency and halves the amplitude of the previous one, giving a
//! smooth, bounded field whose look is independent of the grid resolution.

use crate::grid::HeightGrid;
use crate::seed::{det_cos, det_sin};

/// World-space edge length the wave frequencies are normalised against.
pub const TERRAIN_SIZE: f64 = 100.0;

/// Octave multipliers as `(frequency, amplitude)` pairs.
const OCTAVES: [(f64, f64); 3] = [(1.0, 1.0), (2.0, 0.5), (4.0, 0.25)];

/// Coefficients and phase state for wave synthesis.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveParameters {
    /// Base frequency of the sine series along columns (n).
    pub frequency_x: f64,
    /// Base frequency of the cosine series along rows (m).
    pub frequency_z: f64,
    /// Base amplitude of the sine series.
    pub amplitude_x: f64,
    /// Base amplitude of the cosine series.
    pub amplitude_z: f64,
    /// Phase added to every sine term. Accumulates `dt` when `move_x` is set.
    pub offset_x: f64,
    /// Phase added to every cosine term. Accumulates `dt` when `move_z` is set.
    pub offset_z: f64,
    pub move_x: bool,
    pub move_z: bool,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            frequency_x: 0.156,
            frequency_z: 0.346,
            amplitude_x: 2.602,
            amplitude_z: 4.065,
            offset_x: 0.0,
            offset_z: 0.0,
            move_x: false,
            move_z: false,
        }
    }
}

impl WaveParameters {
    /// Parameters with both phases reset to zero.
    pub fn reset_offsets(&self) -> Self {
        Self {
            offset_x: 0.0,
            offset_z: 0.0,
            ..self.clone()
        }
    }

    /// Height of the wave field at vertex `(m, n)` for the given scales.
    fn height_at(&self, m: usize, n: usize, scale_m: f64, scale_n: f64) -> f64 {
        let n = n as f64;
        let m = m as f64;
        OCTAVES
            .iter()
            .map(|&(freq, amp)| {
                det_sin(n * self.frequency_x * freq * scale_n + self.offset_x)
                    * self.amplitude_x
                    * amp
                    + det_cos(m * self.frequency_z * freq * scale_m + self.offset_z)
                        * self.amplitude_z
                        * amp
            })
            .sum()
    }
}

/// Overwrite `grid` with the wave field described by `params`.
///
/// Returns the parameters for the next call: offsets on the axes whose move
/// flag is set are advanced by `dt`. With `dt == 0.0` the result equals
/// `params` and repeated calls produce identical grids.
pub fn build_wave_height_map(
    grid: &mut HeightGrid,
    params: &WaveParameters,
    dt: f64,
) -> WaveParameters {
    let rows = grid.rows();
    let cols = grid.cols();
    let scale_m = TERRAIN_SIZE / rows as f64;
    let scale_n = TERRAIN_SIZE / cols as f64;

    for m in 0..=rows {
        for n in 0..=cols {
            grid.set(m, n, params.height_at(m, n, scale_m, scale_n));
        }
    }

    let mut next = params.clone();
    if params.move_x {
        next.offset_x += dt;
    }
    if params.move_z {
        next.offset_z += dt;
    }
    tracing::debug!(
        "Built wave height map {}x{} (offset {:.3}, {:.3})",
        rows,
        cols,
        params.offset_x,
        params.offset_z
    );
    next
}
