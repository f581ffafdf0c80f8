use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::trace;

use crate::errors::*;
use crate::geo_transform::GeoTransform;
use crate::raster::{Band, PixelType, Value};

/// Byte order marker for little-endian (NDR) WKB.
const WKB_NDR: u8 = 1;
/// Raster WKB format version.
const WKB_VERSION: u16 = 0;

/// Georeferenced extent of a raster, stored exactly as supplied.
///
/// The corners are not normalised: a `max_x` smaller than `min_x` yields a
/// negative X scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from((min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> Self {
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}

impl From<geo_types::Rect<f64>> for BoundingBox {
    fn from(rect: geo_types::Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        BoundingBox::new(min.x, min.y, max.x, max.y)
    }
}

/// A georeferenced grid of one or more bands.
///
/// The upper-left corner is the origin, so the Y origin is taken from
/// `max_y`.
///
/// # Example
///
/// ```
/// # fn main() -> pgraster::errors::Result<()> {
/// use pgraster::raster::{Band, Raster};
///
/// let band = Band::new(vec![0, 1, 2, 3], Some(-9999))?;
/// let raster = Raster::new((0.0, 0.0, -10.0, 10.0), (2, 2), vec![band])?.with_srid(4326);
/// assert!(raster.to_wkb_hex()?.starts_with("0100000100"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    bands: Vec<Band>,
    srid: Option<i32>,
    width: u16,
    height: u16,
    skew_x: f64,
    skew_y: f64,
    upper_left_x: f64,
    upper_left_y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Raster {
    /// Create a raster covering `bbox` with `size` (`(width, height)`) pixels.
    ///
    /// # Errors
    /// Fails if either dimension is zero, `bands` is empty or holds more
    /// than `u16::MAX` bands, or a band does not hold exactly
    /// `width * height` values.
    pub fn new(
        bbox: impl Into<BoundingBox>,
        size: (u16, u16),
        bands: Vec<Band>,
    ) -> Result<Self> {
        let bbox = bbox.into();
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(RasterError::BadArgument(format!(
                "raster size must be positive, got {width}x{height}"
            )));
        }
        if bands.is_empty() {
            return Err(RasterError::BadArgument(
                "raster needs at least one band".to_string(),
            ));
        }
        if bands.len() > u16::MAX as usize {
            return Err(RasterError::BadArgument(format!(
                "too many bands: {}",
                bands.len()
            )));
        }
        let expected = width as usize * height as usize;
        if let Some((band, actual)) = bands
            .iter()
            .map(Band::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(RasterError::DimensionMismatch {
                band,
                expected,
                actual,
            });
        }

        Ok(Raster {
            bands,
            srid: None,
            width,
            height,
            skew_x: 0.0,
            skew_y: 0.0,
            upper_left_x: bbox.min_x,
            upper_left_y: bbox.max_y,
            scale_x: (bbox.max_x - bbox.min_x) / width as f64,
            scale_y: (bbox.max_y - bbox.min_y) / height as f64,
        })
    }

    /// Set the spatial reference identifier.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Set the rotation terms.
    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    pub fn skew(&self) -> (f64, f64) {
        (self.skew_x, self.skew_y)
    }

    pub fn upper_left(&self) -> (f64, f64) {
        (self.upper_left_x, self.upper_left_y)
    }

    /// Affine terms as written in the WKB header, in GDAL coefficient order.
    ///
    /// The Y scale is `(max_y - min_y) / height` and the Y origin is
    /// `max_y`, so for a box with `max_y > min_y` increasing line numbers
    /// move *up* from the top edge: line `height` maps to
    /// `2 * max_y - min_y`, not to `min_y`. This is how a reader of the
    /// encoded header will georeference the rows.
    pub fn geo_transform(&self) -> GeoTransform {
        [
            self.upper_left_x,
            self.scale_x,
            self.skew_x,
            self.upper_left_y,
            self.skew_y,
            self.scale_y,
        ]
    }

    /// Encode the raster as PostGIS raster WKB (little-endian).
    pub fn to_wkb(&self) -> Result<Vec<u8>> {
        let mut wkb = Vec::with_capacity(self.wkb_size());
        self.write_header(&mut wkb)?;
        for band in &self.bands {
            write_band(&mut wkb, band)?;
        }
        trace!(
            bands = self.bands.len(),
            bytes = wkb.len(),
            "encoded raster wkb"
        );
        Ok(wkb)
    }

    /// Encode the raster as lowercase hex WKB, the textual form accepted by
    /// PostGIS for `raster` input.
    pub fn to_wkb_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_wkb()?))
    }

    fn wkb_size(&self) -> usize {
        let header = 1 + 2 + 2 + 6 * 8 + 4 + 2 + 2;
        header
            + self
                .bands
                .iter()
                .map(|b| 1 + (b.len() + 1) * b.pixel_type().byte_width())
                .sum::<usize>()
    }

    fn write_header<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u8(WKB_NDR)?;
        w.write_u16::<LittleEndian>(WKB_VERSION)?;
        w.write_u16::<LittleEndian>(self.bands.len() as u16)?;
        w.write_f64::<LittleEndian>(self.scale_x)?;
        w.write_f64::<LittleEndian>(self.scale_y)?;
        w.write_f64::<LittleEndian>(self.upper_left_x)?;
        w.write_f64::<LittleEndian>(self.upper_left_y)?;
        w.write_f64::<LittleEndian>(self.skew_x)?;
        w.write_f64::<LittleEndian>(self.skew_y)?;
        w.write_i32::<LittleEndian>(self.srid.unwrap_or(0))?;
        w.write_u16::<LittleEndian>(self.width)?;
        w.write_u16::<LittleEndian>(self.height)?;
        Ok(())
    }
}

fn write_band<W: Write>(w: &mut W, band: &Band) -> Result<()> {
    let pixel_type = band.pixel_type();
    w.write_u8(band.metadata_byte())?;
    // the sentinel slot is always present, zero when the band has none
    write_value(w, pixel_type, band.nodata().unwrap_or_default())?;
    for value in band.values() {
        write_value(w, pixel_type, *value)?;
    }
    Ok(())
}

/// Write `value` as `pixel_type`. The band guarantees the value fits.
fn write_value<W: Write>(w: &mut W, pixel_type: PixelType, value: Value) -> Result<()> {
    match pixel_type {
        PixelType::I8 => w.write_i8(value.as_i64() as i8)?,
        PixelType::U8 => w.write_u8(value.as_i64() as u8)?,
        PixelType::I16 => w.write_i16::<LittleEndian>(value.as_i64() as i16)?,
        PixelType::U16 => w.write_u16::<LittleEndian>(value.as_i64() as u16)?,
        PixelType::I32 => w.write_i32::<LittleEndian>(value.as_i64() as i32)?,
        PixelType::U32 => w.write_u32::<LittleEndian>(value.as_i64() as u32)?,
        PixelType::F32 => w.write_f32::<LittleEndian>(value.as_f64() as f32)?,
        PixelType::F64 => w.write_f64::<LittleEndian>(value.as_f64())?,
    }
    Ok(())
}
