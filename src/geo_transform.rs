use crate::errors;
use crate::errors::RasterError;

/// An affine transform.
///
/// A six-element array storing the coefficients of an [affine transform]
/// used in mapping coordinates between pixel/line `(P, L)` (raster) space,
/// and `(Xp,Yp)` (georeferenced) space.
///
/// # Interpretation
///
/// A `GeoTransform`'s components have the following meanings:
///
///   * `GeoTransform[0]`: x-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[1]`: W-E pixel resolution (pixel width).
///   * `GeoTransform[2]`: row rotation (skew x).
///   * `GeoTransform[3]`: y-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[4]`: column rotation (skew y).
///   * `GeoTransform[5]`: N-S pixel resolution (pixel height).
///
/// The components are the ones written into a raster WKB header, see
/// [`crate::raster::Raster::geo_transform`]. That header carries a
/// positive N-S resolution, so applying it walks rows upward from the
/// upper-left origin.
///
/// # Example
///
/// ```
/// # fn main() -> pgraster::errors::Result<()> {
/// use pgraster::{GeoTransform, GeoTransformEx};
/// let transform: GeoTransform = [100.0, 2.0, 0.0, 50.0, 0.0, -2.0];
/// let (x, y) = transform.apply(1.0, 1.0);
/// assert_eq!((x, y), (102.0, 48.0));
/// let (p, l) = transform.invert()?.apply(x, y);
/// assert_eq!((p, l), (1.0, 1.0));
/// # Ok(())
/// # }
/// ```
///
/// [affine transform]: https://en.wikipedia.org/wiki/Affine_transformation
pub type GeoTransform = [f64; 6];

/// Extension methods on [`GeoTransform`]
pub trait GeoTransformEx {
    /// Apply GeoTransform to x/y coordinate.
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64);

    /// Invert a [`GeoTransform`].
    fn invert(&self) -> errors::Result<GeoTransform>;
}

impl GeoTransformEx for GeoTransform {
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        let geo_x = self[0] + pixel * self[1] + line * self[2];
        let geo_y = self[3] + pixel * self[4] + line * self[5];
        (geo_x, geo_y)
    }

    fn invert(&self) -> errors::Result<GeoTransform> {
        let det = self[1] * self[5] - self[2] * self[4];
        if det == 0.0 || !det.is_finite() {
            return Err(RasterError::BadArgument(
                "Geo transform is uninvertible".to_string(),
            ));
        }
        let inv_det = 1.0 / det;
        let a = self[5] * inv_det;
        let b = -self[2] * inv_det;
        let d = -self[4] * inv_det;
        let e = self[1] * inv_det;
        Ok([
            -(a * self[0] + b * self[3]),
            a,
            b,
            -(d * self[0] + e * self[3]),
            d,
            e,
        ])
    }
}
