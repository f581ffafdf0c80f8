use crate::errors::{RasterError, Result};
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Storage kind of every value in a band, as understood by PostGIS.
///
/// The discriminant is the pixel type code written into the band
/// metadata byte of a raster WKB.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PixelType {
    /// 8-bit signed integer (`8BSI`)
    I8 = 3,
    /// 8-bit unsigned integer (`8BUI`)
    U8 = 4,
    /// 16-bit signed integer (`16BSI`)
    I16 = 5,
    /// 16-bit unsigned integer (`16BUI`)
    U16 = 6,
    /// 32-bit signed integer (`32BSI`)
    I32 = 7,
    /// 32-bit unsigned integer (`32BUI`)
    U32 = 8,
    /// 32-bit float (`32BF`)
    F32 = 10,
    /// 64-bit float (`64BF`)
    F64 = 11,
}

const UNSIGNED_ORDER: &[PixelType] = &[
    PixelType::U8,
    PixelType::U16,
    PixelType::U32,
    PixelType::F32,
    PixelType::F64,
];

const SIGNED_ORDER: &[PixelType] = &[
    PixelType::I8,
    PixelType::I16,
    PixelType::I32,
    PixelType::F32,
    PixelType::F64,
];

const FLOAT_ORDER: &[PixelType] = &[PixelType::F32, PixelType::F64];

impl PixelType {
    /// Every pixel type supported by the raster WKB format, in code order.
    pub const ALL: [PixelType; 8] = [
        PixelType::I8,
        PixelType::U8,
        PixelType::I16,
        PixelType::U16,
        PixelType::I32,
        PixelType::U32,
        PixelType::F32,
        PixelType::F64,
    ];

    /// Pixel type code used in the band metadata byte.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// PostGIS name of the pixel type, e.g. `16BSI`.
    pub fn name(&self) -> &'static str {
        match self {
            PixelType::I8 => "8BSI",
            PixelType::U8 => "8BUI",
            PixelType::I16 => "16BSI",
            PixelType::U16 => "16BUI",
            PixelType::I32 => "32BSI",
            PixelType::U32 => "32BUI",
            PixelType::F32 => "32BF",
            PixelType::F64 => "64BF",
        }
    }

    /// Get the type size in **bytes**.
    pub fn byte_width(&self) -> usize {
        match self {
            PixelType::I8 | PixelType::U8 => 1,
            PixelType::I16 | PixelType::U16 => 2,
            PixelType::I32 | PixelType::U32 | PixelType::F32 => 4,
            PixelType::F64 => 8,
        }
    }

    /// Smallest value the type can hold.
    pub fn min(&self) -> f64 {
        match self {
            PixelType::I8 => i8::MIN as f64,
            PixelType::U8 | PixelType::U16 | PixelType::U32 => 0.0,
            PixelType::I16 => i16::MIN as f64,
            PixelType::I32 => i32::MIN as f64,
            PixelType::F32 => f32::MIN as f64,
            PixelType::F64 => f64::MIN,
        }
    }

    /// Largest value the type can hold.
    pub fn max(&self) -> f64 {
        match self {
            PixelType::I8 => i8::MAX as f64,
            PixelType::U8 => u8::MAX as f64,
            PixelType::I16 => i16::MAX as f64,
            PixelType::U16 => u16::MAX as f64,
            PixelType::I32 => i32::MAX as f64,
            PixelType::U32 => u32::MAX as f64,
            PixelType::F32 => f32::MAX as f64,
            PixelType::F64 => f64::MAX,
        }
    }

    /// Returns `true` if data type is floating point (non-integral)
    pub fn is_floating(&self) -> bool {
        matches!(self, PixelType::F32 | PixelType::F64)
    }

    /// Returns `true` if data type supports negative values.
    pub fn is_signed(&self) -> bool {
        !matches!(self, PixelType::U8 | PixelType::U16 | PixelType::U32)
    }

    pub(crate) fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.min() && magnitude <= self.max()
    }

    /// Returns `true` if `value` lies within the range of this type and, for
    /// integer types, has no fractional part. Float types round to their
    /// precision.
    pub fn covers(&self, value: &Value) -> bool {
        let magnitude = value.as_f64();
        magnitude.is_finite()
            && self.contains(magnitude)
            && (self.is_floating() || value.is_integral())
    }

    /// Find the narrowest pixel type able to hold every value of a band
    /// together with its no-data sentinel.
    ///
    /// Integral values (including integral floats such as `2.0`) select an
    /// integer type when one is wide enough, searching unsigned types for
    /// non-negative data and signed types otherwise. Non-integral values,
    /// or ranges beyond the 32-bit integer types, select a float type.
    ///
    /// # Errors
    /// [`RasterError::ValueBounds`] if a value is non-finite or lies beyond
    /// the range of [`PixelType::F64`].
    pub fn select(values: &[Value], nodata: Option<Value>) -> Result<PixelType> {
        let mut needs_float = false;
        let mut min = 0.0_f64;
        let mut max = 0.0_f64;

        for value in nodata.iter().chain(values) {
            let magnitude = value.as_f64();
            if !magnitude.is_finite() {
                return Err(RasterError::ValueBounds {
                    min: magnitude.min(min),
                    max: magnitude.max(max),
                    pixel_type: None,
                });
            }
            if !value.is_integral() {
                needs_float = true;
            }
            min = min.min(magnitude);
            max = max.max(magnitude);
        }

        if min >= 0.0 && max > PixelType::U32.max() {
            needs_float = true;
        } else if min < 0.0 && max > PixelType::I32.max() {
            needs_float = true;
        } else if min < PixelType::I32.min() {
            needs_float = true;
        }

        let candidates = if needs_float {
            FLOAT_ORDER
        } else if min < 0.0 {
            SIGNED_ORDER
        } else {
            UNSIGNED_ORDER
        };

        let selected = candidates
            .iter()
            .copied()
            .find(|t| t.contains(min) && t.contains(max))
            .ok_or(RasterError::ValueBounds {
                min,
                max,
                pixel_type: None,
            })?;
        debug!(%selected, min, max, needs_float, "selected pixel type");
        Ok(selected)
    }
}

impl Display for PixelType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for PixelType {
    type Error = RasterError;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        PixelType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| RasterError::BadArgument(format!("unknown pixel type code {code}")))
    }
}

/// A single raster cell or no-data sentinel.
///
/// Integers are kept apart from floats so that wide integer values are
/// written exactly; a `Float` holding an integral value is treated like an
/// integer when choosing a [`PixelType`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }

    /// Returns `true` if the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        match *self {
            Value::Int(_) => true,
            Value::Float(v) => v.is_finite() && v.fract() == 0.0,
        }
    }

    /// Integer view of the value. Only meaningful when [`Value::is_integral`].
    pub(crate) fn as_i64(&self) -> i64 {
        match *self {
            Value::Int(v) => v,
            Value::Float(v) => v as i64,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Into<Value> + Copy>(data: &[T]) -> Vec<Value> {
        data.iter().map(|&v| v.into()).collect()
    }

    #[test]
    fn test_codes() {
        let codes: Vec<u8> = PixelType::ALL.iter().map(PixelType::code).collect();
        assert_eq!(codes, vec![3, 4, 5, 6, 7, 8, 10, 11]);
        assert_eq!(PixelType::try_from(10).unwrap(), PixelType::F32);
        assert!(PixelType::try_from(9).is_err());
    }

    #[test]
    fn test_widths_and_names() {
        assert_eq!(PixelType::U8.byte_width(), 1);
        assert_eq!(PixelType::I16.byte_width(), 2);
        assert_eq!(PixelType::F32.byte_width(), 4);
        assert_eq!(PixelType::F64.byte_width(), 8);
        assert_eq!(PixelType::U32.to_string(), "32BUI");
        assert!(PixelType::I8.is_signed());
        assert!(!PixelType::U16.is_signed());
        assert!(PixelType::F64.is_floating());
    }

    #[test]
    fn test_select_float_values() {
        let pt = PixelType::select(&values(&[0.1, 0.2]), None).unwrap();
        assert_eq!(pt, PixelType::F32);
        assert_eq!(pt.code(), 10);
    }

    #[test]
    fn test_select_float_nodata() {
        let pt = PixelType::select(&values(&[1, 2]), Some(1.1.into())).unwrap();
        assert_eq!(pt, PixelType::F32);
    }

    #[test]
    fn test_select_float_values_integer_nodata() {
        let pt = PixelType::select(&values(&[0.1, 0.2]), Some(1.into())).unwrap();
        assert_eq!(pt, PixelType::F32);
    }

    #[test]
    fn test_select_unsigned() {
        let pt = PixelType::select(&values(&[1, 2]), Some(1.into())).unwrap();
        assert_eq!(pt, PixelType::U8);
        let pt = PixelType::select(&values(&[0, 256]), None).unwrap();
        assert_eq!(pt, PixelType::U16);
        let pt = PixelType::select(&values(&[70_000]), None).unwrap();
        assert_eq!(pt, PixelType::U32);
    }

    #[test]
    fn test_select_integral_float_is_integer() {
        let pt = PixelType::select(&values(&[2.0, 3.0]), None).unwrap();
        assert_eq!(pt, PixelType::U8);
    }

    #[test]
    fn test_select_signed() {
        let pt = PixelType::select(&values(&[0, -1, -2, -3]), Some(0.into())).unwrap();
        assert_eq!(pt, PixelType::I8);
        let pt = PixelType::select(&values(&[0, 1, 2, 3]), Some((-9999).into())).unwrap();
        assert_eq!(pt, PixelType::I16);
        let pt = PixelType::select(&values(&[-40_000]), None).unwrap();
        assert_eq!(pt, PixelType::I32);
    }

    #[test]
    fn test_select_positive_outside_u32() {
        let pt = PixelType::select(&values(&[1_i64, 1 << 32]), Some(1.into())).unwrap();
        assert_eq!(pt, PixelType::F32);
    }

    #[test]
    fn test_select_negative_and_positive_outside_i32() {
        let pt = PixelType::select(&values(&[-1_i64, 1 << 31]), Some(1.into())).unwrap();
        assert_eq!(pt, PixelType::F32);
    }

    #[test]
    fn test_select_negative_outside_i32() {
        let pt = PixelType::select(&values(&[0_i64, -(1 << 32)]), Some(1.into())).unwrap();
        assert_eq!(pt, PixelType::F32);
    }

    #[test]
    fn test_select_wider_than_f32() {
        let pt = PixelType::select(&values(&[0.0, 1e300]), None).unwrap();
        assert_eq!(pt, PixelType::F64);
    }

    #[test]
    fn test_select_bounds_error() {
        let err = PixelType::select(&values(&[0.0, f64::INFINITY]), None).unwrap_err();
        assert!(matches!(err, RasterError::ValueBounds { pixel_type: None, .. }));
        let err = PixelType::select(&[], Some(f64::NAN.into())).unwrap_err();
        assert!(matches!(err, RasterError::ValueBounds { .. }));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(PixelType::select(&[], None).unwrap(), PixelType::U8);
    }

    #[test]
    fn test_select_f32_upper_bound() {
        let at_max = f32::MAX as f64;
        let pt = PixelType::select(&values(&[0.0, at_max]), None).unwrap();
        assert_eq!(pt, PixelType::F32);
        let pt = PixelType::select(&values(&[-at_max]), None).unwrap();
        assert_eq!(pt, PixelType::F32);

        let above_max = f64::from_bits(at_max.to_bits() + 1);
        let pt = PixelType::select(&values(&[0.0, above_max]), None).unwrap();
        assert_eq!(pt, PixelType::F64);
        let pt = PixelType::select(&values(&[-above_max]), None).unwrap();
        assert_eq!(pt, PixelType::F64);
    }

    #[test]
    fn test_covers() {
        assert!(PixelType::U8.covers(&Value::Int(255)));
        assert!(!PixelType::U8.covers(&Value::Int(256)));
        assert!(!PixelType::U8.covers(&Value::Int(-1)));
        assert!(PixelType::I8.covers(&Value::Float(-128.0)));
        assert!(!PixelType::I16.covers(&Value::Float(1.5)));
        assert!(PixelType::F32.covers(&Value::Float(1.5)));
        assert!(!PixelType::F64.covers(&Value::Float(f64::NAN)));
    }
}
