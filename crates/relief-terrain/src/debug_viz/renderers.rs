//! Heightmap debug renderers.

use super::image::DebugImage;
use crate::source::HeightSource;

/// Normalize `h` into `[0, 1]` against `(lo, hi)`; flat sources map to 0.5.
fn normalize(h: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span > 0.0 {
        ((h - lo) / span).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Render one pixel per vertex with elevation colour bands.
///
/// Columns (n) run along the image x axis and rows (m) along y. Heights are
/// normalized against the source's own min/max, and `sea_level` (in height
/// units) sets the water line.
pub fn render_height_debug<S: HeightSource + ?Sized>(source: &S, sea_level: f64) -> DebugImage {
    let (rows, cols) = source.resolution();
    let (lo, hi) = source.height_bounds();
    let sea_level_normalized = normalize(sea_level, lo, hi);
    let mut image = DebugImage::new(cols as u32 + 1, rows as u32 + 1);

    for m in 0..=rows {
        for n in 0..=cols {
            let normalized = normalize(source.height(m, n), lo, hi);
            let (r, g, b) = height_to_color(normalized, sea_level_normalized);
            image.put(n as u32, m as u32, [r, g, b, 255]);
        }
    }

    image
}

/// Render one pixel per vertex as grayscale, black = lowest, white = highest.
pub fn render_grayscale_debug<S: HeightSource + ?Sized>(source: &S) -> DebugImage {
    let (rows, cols) = source.resolution();
    let (lo, hi) = source.height_bounds();
    let mut image = DebugImage::new(cols as u32 + 1, rows as u32 + 1);

    for m in 0..=rows {
        for n in 0..=cols {
            let v = (normalize(source.height(m, n), lo, hi) * 255.0).round() as u8;
            image.put(n as u32, m as u32, [v, v, v, 255]);
        }
    }

    image
}

/// Water colour at the shoreline and at the lowest vertex.
const SHALLOW_WATER: [f64; 3] = [40.0, 110.0, 210.0];
const DEEP_WATER: [f64; 3] = [10.0, 30.0, 100.0];

/// Land gradient over the height fraction between sea level and the peak.
const LAND_STOPS: [(f64, [f64; 3]); 4] = [
    (0.0, [90.0, 160.0, 70.0]),
    (0.5, [120.0, 110.0, 70.0]),
    (0.85, [160.0, 155.0, 150.0]),
    (1.0, [250.0, 250.0, 250.0]),
];

fn lerp_rgb(a: [f64; 3], b: [f64; 3], t: f64) -> (u8, u8, u8) {
    let channel = |i: usize| (a[i] + (b[i] - a[i]) * t).round() as u8;
    (channel(0), channel(1), channel(2))
}

/// Map a normalized height `[0, 1]` to an RGB color.
///
/// Below `sea_level_normalized` the water darkens with depth. Above it the
/// land ramps from lowland green through rock to snow, scaled to the span
/// between the water line and the highest vertex, so the bands follow the
/// sea level instead of fixed elevations.
pub fn height_to_color(normalized: f64, sea_level_normalized: f64) -> (u8, u8, u8) {
    let sea = sea_level_normalized.clamp(0.0, 1.0);
    let h = normalized.clamp(0.0, 1.0);

    if h < sea {
        let depth = (sea - h) / sea;
        return lerp_rgb(SHALLOW_WATER, DEEP_WATER, depth);
    }

    let t = if sea < 1.0 { (h - sea) / (1.0 - sea) } else { 1.0 };
    for pair in LAND_STOPS.windows(2) {
        let ((lo, from), (hi, to)) = (pair[0], pair[1]);
        if t <= hi {
            return lerp_rgb(from, to, (t - lo) / (hi - lo));
        }
    }
    // NaN input matches no stop.
    let peak = LAND_STOPS[LAND_STOPS.len() - 1].1;
    lerp_rgb(peak, peak, 0.0)
}
