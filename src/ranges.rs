//! Decomposition of a search area into contiguous score ranges.
//!
//! The centre cell and its eight neighbours are computed at the coarse
//! search depth, merged into runs of consecutive hashes, and then rescaled
//! into the storage depth. A cell `h` at depth `d` covers exactly the scores
//! `[h << k, (h + 1) << k)` at depth `d + k`, so one coarse run maps to a
//! single contiguous scan over the store.

use crate::codec::{encode_int, neighbors_int};
use crate::error::{GeoError, Result};
use geozset_types::range::GeoRange;
use smallvec::SmallVec;

/// The centre cell plus up to eight distinct neighbours.
pub type CellSet = SmallVec<[u64; 9]>;

/// Sorted, de-duplicated hashes of the cell containing `(lat, lon)` and its
/// neighbours at `bit_depth`.
///
/// Fewer than nine cells come back near the poles and at very coarse depths,
/// where neighbour computation collapses onto the same cell.
pub fn candidate_cells(lat: f64, lon: f64, bit_depth: u8) -> CellSet {
    let centre = encode_int(lat, lon, bit_depth);

    let mut cells = CellSet::new();
    cells.push(centre);
    cells.extend(neighbors_int(centre, bit_depth));
    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Collapse sorted hashes into half-open runs of consecutive integers.
///
/// ```
/// use geozset::ranges::merge_contiguous;
///
/// assert_eq!(merge_contiguous(&[3, 4, 5, 9, 10, 20]), vec![(3, 6), (9, 11), (20, 21)]);
/// ```
pub fn merge_contiguous(sorted: &[u64]) -> Vec<(u64, u64)> {
    let mut runs = Vec::new();
    let mut iter = sorted.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start + 1;
        while let Some(&next) = iter.peek() {
            if next > end {
                break;
            }
            end = end.max(next + 1);
            iter.next();
        }
        runs.push((start, end));
    }

    runs
}

/// Score ranges to scan for a search centred on `(lat, lon)`.
///
/// Ranges are ascending, non-overlapping, and expressed in
/// `storage_bit_depth` units.
///
/// # Errors
///
/// [`GeoError::Precision`] when `storage_bit_depth < search_bit_depth`.
///
/// # Examples
///
/// ```
/// use geozset::ranges::decompose;
///
/// let ranges = decompose(39.9523, -75.1638, 26, 52)?;
/// assert!(!ranges.is_empty() && ranges.len() <= 9);
/// assert!(ranges.windows(2).all(|w| w[0].upper < w[1].lower));
///
/// assert!(decompose(39.9523, -75.1638, 26, 20).is_err());
/// # Ok::<(), geozset::GeoError>(())
/// ```
pub fn decompose(
    lat: f64,
    lon: f64,
    search_bit_depth: u8,
    storage_bit_depth: u8,
) -> Result<Vec<GeoRange>> {
    if storage_bit_depth < search_bit_depth {
        return Err(GeoError::Precision {
            search: search_bit_depth,
            storage: storage_bit_depth,
        });
    }

    let shift = u32::from(storage_bit_depth - search_bit_depth);
    let cells = candidate_cells(lat, lon, search_bit_depth);
    let ranges: Vec<GeoRange> = merge_contiguous(&cells)
        .into_iter()
        .map(|(lower, upper)| GeoRange::new(rescale(lower, shift), rescale(upper, shift)))
        .collect();

    log::debug!(
        "decomposed ({}, {}) at depth {} into {} range(s) over {} cell(s)",
        lat,
        lon,
        search_bit_depth,
        ranges.len(),
        cells.len()
    );

    Ok(ranges)
}

#[inline]
fn rescale(hash: u64, shift: u32) -> f64 {
    (hash << shift) as f64
}
