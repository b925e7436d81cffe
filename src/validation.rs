//! Validation for coordinates, radii and bit depths.

use crate::codec::MAX_BIT_DEPTH;
use crate::error::{GeoError, Result};

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geozset::validation::validate_coordinates;
///
/// assert!(validate_coordinates(39.9523, -75.1638).is_ok());
/// assert!(validate_coordinates(95.0, 0.0).is_err());
/// assert!(validate_coordinates(0.0, f64::NAN).is_err());
/// ```
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(GeoError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(GeoError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Ok(())
}

/// Validates a search radius in meters: finite and non-negative.
pub fn validate_radius(radius_meters: f64) -> Result<()> {
    if !radius_meters.is_finite() || radius_meters < 0.0 {
        return Err(GeoError::InvalidInput(format!(
            "Radius must be finite and non-negative, got: {}",
            radius_meters
        )));
    }
    Ok(())
}

/// Validates a geohash bit depth.
///
/// Scores are stored as `f64`, so anything above 52 bits would lose precision.
pub fn validate_bit_depth(bit_depth: u8) -> Result<()> {
    if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
        return Err(GeoError::InvalidInput(format!(
            "Bit depth must be in [1, {}], got: {}",
            MAX_BIT_DEPTH, bit_depth
        )));
    }
    Ok(())
}
