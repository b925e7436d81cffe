use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// A labelled coordinate to be indexed.
///
/// `label` is the member key inside a collection. Labels are unique per
/// collection; adding an existing label again overwrites its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoKey {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

impl GeoKey {
    /// Create a key from latitude, longitude and label.
    ///
    /// ```
    /// use geozset_types::key::GeoKey;
    ///
    /// let key = GeoKey::new(47.55, -52.6667, "St. John's");
    /// assert_eq!(key.label, "St. John's");
    /// ```
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: label.into(),
        }
    }

    pub fn from_point(point: GeoPoint, label: impl Into<String>) -> Self {
        Self::new(point.lat(), point.lon(), label)
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
