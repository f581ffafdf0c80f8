use bitflags::bitflags;

use crate::errors::*;
use crate::raster::{PixelType, Value};

bitflags! {
    /// Flag bits of the band metadata byte.
    ///
    /// The low nibble of the byte carries the [`PixelType`] code, bit 4 is
    /// reserved.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct BandFlags: u8 {
        /// Every pixel of the band is no-data.
        const IS_NODATA = 0x20;
        /// The band carries a no-data sentinel.
        const HAS_NODATA = 0x40;
        /// Pixel data lives outside the database.
        const IS_OFFLINE = 0x80;
    }
}

/// One layer of raster data.
///
/// The pixel type is resolved once, at construction, and shared by the
/// values and the no-data sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    values: Vec<Value>,
    nodata: Option<Value>,
    pixel_type: PixelType,
}

impl Band {
    /// Construct a band, inferring the narrowest [`PixelType`] able to hold
    /// `values` and `nodata`.
    pub fn new<T: Into<Value>>(values: Vec<T>, nodata: Option<T>) -> Result<Self> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let nodata = nodata.map(Into::into);
        let pixel_type = PixelType::select(&values, nodata)?;
        Ok(Band {
            values,
            nodata,
            pixel_type,
        })
    }

    /// Construct a band stored as `pixel_type`.
    ///
    /// Fails if a value or the sentinel falls outside the range of
    /// `pixel_type`, or is fractional for an integer type.
    pub fn with_pixel_type<T: Into<Value>>(
        values: Vec<T>,
        nodata: Option<T>,
        pixel_type: PixelType,
    ) -> Result<Self> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let nodata = nodata.map(Into::into);
        for value in nodata.iter().chain(&values) {
            if pixel_type.covers(value) {
                continue;
            }
            let v = value.as_f64();
            return Err(if v.is_finite() && pixel_type.contains(v) {
                RasterError::NotRepresentable {
                    value: v,
                    pixel_type,
                }
            } else {
                RasterError::ValueBounds {
                    min: v,
                    max: v,
                    pixel_type: Some(pixel_type),
                }
            });
        }
        Ok(Band {
            values,
            nodata,
            pixel_type,
        })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn nodata(&self) -> Option<Value> {
        self.nodata
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn flags(&self) -> BandFlags {
        let mut flags = BandFlags::empty();
        flags.set(BandFlags::HAS_NODATA, self.nodata.is_some());
        flags
    }

    /// The band metadata byte: pixel type code in bits 0-3, flags above.
    pub fn metadata_byte(&self) -> u8 {
        self.pixel_type.code() | self.flags().bits()
    }
}
