//! PostGIS raster encoding

mod band;
mod types;
mod wkb;

pub use band::{Band, BandFlags};
pub use types::{PixelType, Value};
pub use wkb::{BoundingBox, Raster};
