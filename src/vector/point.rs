use byteorder::{ByteOrder, LittleEndian};
use geo_types::Point;

/// WKB geometry type code of a point.
const WKB_POINT: u32 = 1;
/// PostGIS extended WKB flag marking an embedded SRID.
const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// Encode `point` as PostGIS extended WKB (little-endian).
///
/// With an `srid` the geometry type carries the SRID flag and the SRID
/// follows it; without one the output is plain WKB.
pub fn point_to_wkb(point: &Point<f64>, srid: Option<i32>) -> Vec<u8> {
    let mut buf = [0u8; 25];
    buf[0] = 1;
    let mut offset = 5;
    match srid {
        Some(srid) => {
            LittleEndian::write_u32(&mut buf[1..5], WKB_POINT | EWKB_SRID_FLAG);
            LittleEndian::write_i32(&mut buf[5..9], srid);
            offset += 4;
        }
        None => LittleEndian::write_u32(&mut buf[1..5], WKB_POINT),
    }
    LittleEndian::write_f64(&mut buf[offset..offset + 8], point.x());
    LittleEndian::write_f64(&mut buf[offset + 8..offset + 16], point.y());
    buf[..offset + 16].to_vec()
}

/// Lowercase hex form of [`point_to_wkb`], matching the raster encoder.
pub fn point_to_wkb_hex(point: &Point<f64>, srid: Option<i32>) -> String {
    hex::encode(point_to_wkb(point, srid))
}
