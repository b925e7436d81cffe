//! Distance ranking of scanned candidates.
//!
//! Geohash proximity only approximates geographic proximity, so every
//! candidate is decoded back to its cell centre and re-ordered by true
//! great-circle distance to the query point.

use crate::codec::{decode_int, distance_between};
use geozset_types::point::GeoPoint;
use geozset_types::result::{Candidate, RankedResult};

/// Rank candidates by distance to `query`, nearest first.
///
/// Ties keep their input order. `limit` of `None` keeps every candidate;
/// larger limits than the candidate count are clamped.
///
/// # Examples
///
/// ```
/// use geozset::codec::encode_int;
/// use geozset::ranking::rank_with_distances;
/// use geozset_types::point::GeoPoint;
/// use geozset_types::result::Candidate;
///
/// let query = GeoPoint::new(39.9523, -75.1638);
/// let candidates = vec![
///     Candidate::new("far", encode_int(43.6667, -79.4167, 52) as f64),
///     Candidate::new("near", encode_int(39.95, -75.16, 52) as f64),
/// ];
///
/// let ranked = rank_with_distances(&query, 52, candidates, Some(5));
/// assert_eq!(ranked[0].label, "near");
/// assert!(ranked[0].distance < ranked[1].distance);
/// ```
pub fn rank_with_distances(
    query: &GeoPoint,
    storage_bit_depth: u8,
    candidates: Vec<Candidate>,
    limit: Option<usize>,
) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = candidates
        .into_iter()
        .map(|candidate| {
            let cell = decode_int(candidate.score as u64, storage_bit_depth);
            RankedResult {
                distance: distance_between(query, &cell.point),
                label: candidate.label,
            }
        })
        .collect();

    // Stable sort: equal distances stay in scan order.
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked
}

/// Labels of [`rank_with_distances`], nearest first.
pub fn rank(
    query: &GeoPoint,
    storage_bit_depth: u8,
    candidates: Vec<Candidate>,
    limit: Option<usize>,
) -> Vec<String> {
    rank_with_distances(query, storage_bit_depth, candidates, limit)
        .into_iter()
        .map(|r| r.label)
        .collect()
}
