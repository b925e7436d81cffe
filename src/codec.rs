//! Integer geohash codec.
//!
//! Coordinates are bisected alternately on longitude then latitude, most
//! significant bit first, producing an unsigned integer of `bit_depth` bits.
//! Numeric order of the integers follows a Z-order curve, so a coarse cell
//! at depth `d` covers exactly the contiguous block of finer hashes sharing
//! its `d`-bit prefix.

use crate::error::{GeoError, Result};
use geozset_types::point::GeoPoint;

/// Largest bit depth whose hashes are exactly representable as `f64` scores.
pub const MAX_BIT_DEPTH: u8 = 52;

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LON_RANGE: (f64, f64) = (-180.0, 180.0);

/// Neighbor directions as (lat step, lon step): N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

/// Decoded cell: its centre and half-extents in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDecode {
    pub point: GeoPoint,
    pub lat_err: f64,
    pub lon_err: f64,
}

/// Encode a coordinate into a `bit_depth`-bit integer geohash.
///
/// # Examples
///
/// ```
/// use geozset::codec::{decode_int, encode_int};
///
/// let hash = encode_int(39.9523, -75.1638, 52);
/// let cell = decode_int(hash, 52);
/// assert!((cell.point.lat() - 39.9523).abs() <= cell.lat_err);
/// assert!((cell.point.lon() + 75.1638).abs() <= cell.lon_err);
/// ```
pub fn encode_int(lat: f64, lon: f64, bit_depth: u8) -> u64 {
    let (mut min_lat, mut max_lat) = LAT_RANGE;
    let (mut min_lon, mut max_lon) = LON_RANGE;
    let mut hash = 0u64;

    for bit in 0..bit_depth {
        hash <<= 1;
        if bit % 2 == 0 {
            let mid = (min_lon + max_lon) / 2.0;
            if lon > mid {
                hash |= 1;
                min_lon = mid;
            } else {
                max_lon = mid;
            }
        } else {
            let mid = (min_lat + max_lat) / 2.0;
            if lat > mid {
                hash |= 1;
                min_lat = mid;
            } else {
                max_lat = mid;
            }
        }
    }

    hash
}

/// Decode a `bit_depth`-bit integer geohash into its cell centre and error.
pub fn decode_int(hash: u64, bit_depth: u8) -> CellDecode {
    let (mut min_lat, mut max_lat) = LAT_RANGE;
    let (mut min_lon, mut max_lon) = LON_RANGE;

    for bit in 0..bit_depth {
        let set = (hash >> (bit_depth - 1 - bit)) & 1 == 1;
        if bit % 2 == 0 {
            let mid = (min_lon + max_lon) / 2.0;
            if set {
                min_lon = mid;
            } else {
                max_lon = mid;
            }
        } else {
            let mid = (min_lat + max_lat) / 2.0;
            if set {
                min_lat = mid;
            } else {
                max_lat = mid;
            }
        }
    }

    CellDecode {
        point: GeoPoint::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0),
        lat_err: (max_lat - min_lat) / 2.0,
        lon_err: (max_lon - min_lon) / 2.0,
    }
}

/// The eight cells surrounding `hash`, in N, NE, E, SE, S, SW, W, NW order.
///
/// Longitude wraps at the antimeridian and latitude clamps at the poles, so
/// near the poles several entries may equal each other or `hash` itself.
pub fn neighbors_int(hash: u64, bit_depth: u8) -> [u64; 8] {
    let cell = decode_int(hash, bit_depth);
    let mut out = [0u64; 8];

    for (slot, (dlat, dlon)) in out.iter_mut().zip(DIRECTIONS) {
        let lat = (cell.point.lat() + dlat * cell.lat_err * 2.0).clamp(LAT_RANGE.0, LAT_RANGE.1);
        let lon = wrap_lon(cell.point.lon() + dlon * cell.lon_err * 2.0);
        *slot = encode_int(lat, lon, bit_depth);
    }

    out
}

fn wrap_lon(lon: f64) -> f64 {
    if lon > LON_RANGE.1 {
        lon - 360.0
    } else if lon < LON_RANGE.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Great-circle distance in meters.
#[inline]
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    a.haversine_distance(b)
}

/// Textual base32 geohash of `point` with `len` characters (1-12).
pub fn to_base32(point: &GeoPoint, len: usize) -> Result<String> {
    let coord = geohash::Coord {
        x: point.lon(),
        y: point.lat(),
    };
    geohash::encode(coord, len).map_err(|e| GeoError::InvalidInput(e.to_string()))
}
