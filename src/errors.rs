use thiserror::Error;

use crate::raster::PixelType;

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Value range [{min}, {max}] is out of bounds for {}", target(.pixel_type))]
    ValueBounds {
        min: f64,
        max: f64,
        pixel_type: Option<PixelType>,
    },
    #[error("Fractional value {value} cannot be stored as integer pixel type {pixel_type}")]
    NotRepresentable { value: f64, pixel_type: PixelType },
    #[error("Band {band} has {actual} values, expected {expected}")]
    DimensionMismatch {
        band: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Bad argument: '{0}'")]
    BadArgument(String),
    #[error("Missing option '{0}'")]
    MissingOption(String),
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidOption { key: String, value: String },
}

fn target(pixel_type: &Option<PixelType>) -> String {
    match pixel_type {
        Some(pixel_type) => format!("pixel type {pixel_type}"),
        None => "every pixel type".to_string(),
    }
}
