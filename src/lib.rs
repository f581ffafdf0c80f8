//! PostGIS raster WKB encoding for Rust.
//!
//! Builds the hex-encoded raster WKB accepted by PostGIS from in-memory
//! bands, choosing for every band the narrowest pixel type able to hold its
//! values and no-data sentinel.
//!
//! ## Use
//!
//! ```
//! use pgraster::raster::{Band, PixelType, Raster};
//!
//! let band = Band::new(vec![0, 1, 2, 3], Some(-9999)).unwrap();
//! assert_eq!(band.pixel_type(), PixelType::I16);
//!
//! let raster = Raster::new((0.0, 0.0, -10.0, 10.0), (2, 2), vec![band])
//!     .unwrap()
//!     .with_srid(4326);
//! println!("{}", raster.to_wkb_hex().unwrap());
//! ```

#![crate_name = "pgraster"]
#![crate_type = "lib"]

pub mod errors;
pub mod fdw;
mod geo_transform;
pub mod options;
pub mod raster;
pub mod vector;

pub use geo_transform::{GeoTransform, GeoTransformEx};

#[cfg(test)]
mod test_utils;
