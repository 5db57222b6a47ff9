//! Read-only access to height samples for mesh builders and visualizers.

/// Anything that can produce height samples on a `(rows + 1) x (cols + 1)`
/// vertex lattice.
///
/// Consumers (mesh construction, debug rendering) depend on this trait
/// rather than on a concrete grid type.
pub trait HeightSource {
    /// Quad counts `(rows, cols)`. Vertex counts are one more per axis.
    fn resolution(&self) -> (usize, usize);

    /// Height at vertex `(m, n)` with `m <= rows` and `n <= cols`.
    fn height(&self, m: usize, n: usize) -> f64;

    /// Lowest and highest height over the whole lattice.
    fn height_bounds(&self) -> (f64, f64) {
        let (rows, cols) = self.resolution();
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for m in 0..=rows {
            for n in 0..=cols {
                let h = self.height(m, n);
                lo = lo.min(h);
                hi = hi.max(h);
            }
        }
        (lo, hi)
    }
}
