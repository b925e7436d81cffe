use serde::{Deserialize, Serialize};

/// A geographic point with latitude/longitude coordinates.
///
/// Wraps `geo::Point`, which stores longitude as `x` and latitude as `y`.
/// Constructors take latitude first to match how coordinates are written in
/// search calls.
///
/// # Examples
///
/// ```
/// use geozset_types::point::GeoPoint;
///
/// let toronto = GeoPoint::new(43.6667, -79.4167);
/// assert_eq!(toronto.lat(), 43.6667);
/// assert_eq!(toronto.inner().x(), -79.4167);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    inner: geo::Point<f64>,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            inner: geo::Point::new(lon, lat),
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Convert into the inner `geo::Point`.
    #[inline]
    pub fn into_inner(self) -> geo::Point<f64> {
        self.inner
    }

    /// Great-circle distance to another point in meters (haversine).
    ///
    /// ```
    /// use geozset_types::point::GeoPoint;
    ///
    /// let toronto = GeoPoint::new(43.6667, -79.4167);
    /// let philly = GeoPoint::new(39.9523, -75.1638);
    /// let d = toronto.haversine_distance(&philly);
    /// assert!(d > 500_000.0 && d < 600_000.0);
    /// ```
    #[inline]
    pub fn haversine_distance(&self, other: &GeoPoint) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.inner, other.inner)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(inner: geo::Point<f64>) -> Self {
        Self { inner }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.inner
    }
}
