//! Geometry encoding shared with the foreign data sources.

mod point;

pub use point::{point_to_wkb, point_to_wkb_hex};
