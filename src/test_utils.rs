use crate::raster::{Band, Raster};

/// Hex WKB of [`single_band_raster`] with SRID 4326.
pub const SINGLE_BAND_WKB: &str =
    "010000010000000000000014c000000000000014400000000000000000000000000000244000000000000000000000000000000000e61000000200020045f1d80000010002000300";

/// Band block appended by the second band of [`two_band_raster`].
pub const SECOND_BAND_BLOCK: &str = "430000fffefd";

/// Compare floats within a tolerance suited to affine arithmetic.
pub fn assert_almost_eq(a: f64, b: f64) {
    let diff: f64 = b - a;
    assert!(diff.abs() < 1e-9, "{a} != {b}");
}

/// The `[0, 1, 2, 3]` band with a `-9999` sentinel.
pub fn signed_band() -> Band {
    Band::new(vec![0, 1, 2, 3], Some(-9999)).unwrap()
}

/// A 2x2 raster over `(0, 0, -10, 10)` holding `bands`.
pub fn raster_2x2(bands: Vec<Band>) -> Raster {
    Raster::new((0.0, 0.0, -10.0, 10.0), (2, 2), bands).unwrap()
}

pub fn single_band_raster() -> Raster {
    raster_2x2(vec![signed_band()]).with_srid(4326)
}

pub fn two_band_raster() -> Raster {
    let second = Band::new(vec![0, -1, -2, -3], Some(0)).unwrap();
    raster_2x2(vec![signed_band(), second]).with_srid(4326)
}
