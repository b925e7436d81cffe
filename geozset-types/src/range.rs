use serde::{Deserialize, Serialize};

/// A half-open interval `[lower, upper)` of encoded geohash scores.
///
/// Bounds are expressed in storage bit-depth units and stored as `f64` since
/// that is the score type of the backing sorted set. Every bound produced by
/// the decomposer is an integer no larger than 2^52, so it is exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRange {
    pub lower: f64,
    pub upper: f64,
}

impl GeoRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper, "range lower bound exceeds upper bound");
        Self { lower, upper }
    }

    /// Whether `score` falls inside `[lower, upper)`.
    ///
    /// ```
    /// use geozset_types::range::GeoRange;
    ///
    /// let range = GeoRange::new(4.0, 8.0);
    /// assert!(range.contains(4.0));
    /// assert!(!range.contains(8.0));
    /// ```
    #[inline]
    pub fn contains(&self, score: f64) -> bool {
        self.lower <= score && score < self.upper
    }

    /// Number of integer scores covered.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.upper <= self.lower
    }
}
