//! Public index facade.
//!
//! A [`GeoIndex`] stores labelled coordinates as geohash scores inside named
//! collections of a [`ScoredStore`] and answers radius searches in two
//! phases: an approximate scan over geohash cells, then an exact ranking by
//! great-circle distance.

use crate::builder::GeoIndexBuilder;
use crate::codec::{self, decode_int, encode_int};
use crate::config::{Config, ScanCap};
use crate::error::{GeoError, Result};
use crate::ranges::decompose;
use crate::ranking::rank_with_distances;
use crate::storage::{MemoryBackend, ScoredMember, ScoredStore};
use crate::validation::{validate_bit_depth, validate_coordinates, validate_radius};
use geozset_types::key::GeoKey;
use geozset_types::point::GeoPoint;
use geozset_types::range::GeoRange;
use geozset_types::result::{Candidate, RankedResult};

/// Radius search over geohash-scored collections.
///
/// The same `storage_bit_depth` must be used when adding and when
/// searching a collection, otherwise stored scores and computed ranges are
/// not comparable.
///
/// # Examples
///
/// ```rust
/// use geozset::{GeoIndex, GeoKey};
///
/// let index = GeoIndex::memory();
/// index.add_coordinates(
///     "people",
///     52,
///     &[
///         GeoKey::new(43.6667, -79.4167, "John"),
///         GeoKey::new(39.9523, -75.1638, "Shankar"),
///     ],
/// )?;
///
/// let nearby = index.search_by_radius("people", 39.9523, -75.1638, 5000.0, 52)?;
/// assert_eq!(nearby, vec!["Shankar"]);
/// # Ok::<(), geozset::GeoError>(())
/// ```
#[derive(Debug)]
pub struct GeoIndex<S: ScoredStore = MemoryBackend> {
    store: S,
    config: Config,
}

impl GeoIndex<MemoryBackend> {
    /// In-memory index with the default configuration.
    pub fn memory() -> Self {
        Self {
            store: MemoryBackend::new(),
            config: Config::default(),
        }
    }

    /// Start a builder; see [`GeoIndexBuilder`].
    pub fn builder() -> GeoIndexBuilder {
        GeoIndexBuilder::new()
    }
}

impl<S: ScoredStore> GeoIndex<S> {
    /// Index over `store` with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Index over `store` with a validated configuration.
    pub fn with_config(store: S, config: Config) -> Result<Self> {
        config.validate().map_err(GeoError::Config)?;
        #[cfg(not(feature = "parallel"))]
        if config.parallel_scans {
            log::warn!("parallel_scans is set but the `parallel` feature is off; scanning sequentially");
        }
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Encode and upsert `keys` into `collection`.
    ///
    /// Returns the number of newly added labels; re-adding an existing label
    /// moves it without changing the collection size. Store errors are
    /// returned as-is.
    pub fn add_coordinates(
        &self,
        collection: &str,
        storage_bit_depth: u8,
        keys: &[GeoKey],
    ) -> Result<u64> {
        validate_bit_depth(storage_bit_depth)?;
        for key in keys {
            validate_coordinates(key.lat, key.lon)?;
        }
        if keys.is_empty() {
            return Ok(0);
        }

        let members: Vec<ScoredMember> = keys
            .iter()
            .map(|key| {
                let score = encode_int(key.lat, key.lon, storage_bit_depth) as f64;
                ScoredMember::new(key.label.clone(), score)
            })
            .collect();

        let added = self.store.insert_scored(collection, &members)?;
        log::debug!(
            "added {} of {} coordinate(s) to '{}' at depth {}",
            added,
            keys.len(),
            collection,
            storage_bit_depth
        );
        Ok(added)
    }

    /// Remove labels from `collection`. Returns the number removed.
    pub fn remove_coordinates_by_keys(&self, collection: &str, labels: &[&str]) -> Result<u64> {
        if labels.is_empty() {
            return Ok(0);
        }
        let removed = self.store.remove_by_key(collection, labels)?;
        log::debug!("removed {} label(s) from '{}'", removed, collection);
        Ok(removed)
    }

    /// Labels near `(lat, lon)`, nearest first.
    ///
    /// Results are cell based: every member of the centre cell and its eight
    /// neighbours at the radius-derived depth is returned, ordered by
    /// distance. Members slightly beyond `radius_meters` may be included.
    pub fn search_by_radius(
        &self,
        collection: &str,
        lat: f64,
        lon: f64,
        radius_meters: f64,
        storage_bit_depth: u8,
    ) -> Result<Vec<String>> {
        let ranked = self.search_by_radius_with_distances(
            collection,
            lat,
            lon,
            radius_meters,
            storage_bit_depth,
            None,
        )?;
        Ok(ranked.into_iter().map(|r| r.label).collect())
    }

    /// Like [`search_by_radius`](Self::search_by_radius), keeping at most
    /// `limit` labels.
    ///
    /// With [`ScanCap::PerRange`] each range scan is also capped at `limit`,
    /// so this is an approximate top-`limit`.
    pub fn search_by_radius_with_limit(
        &self,
        collection: &str,
        lat: f64,
        lon: f64,
        radius_meters: f64,
        storage_bit_depth: u8,
        limit: usize,
    ) -> Result<Vec<String>> {
        let ranked = self.search_by_radius_with_distances(
            collection,
            lat,
            lon,
            radius_meters,
            storage_bit_depth,
            Some(limit),
        )?;
        Ok(ranked.into_iter().map(|r| r.label).collect())
    }

    /// Radius search returning labels with their distance in meters.
    pub fn search_by_radius_with_distances(
        &self,
        collection: &str,
        lat: f64,
        lon: f64,
        radius_meters: f64,
        storage_bit_depth: u8,
        limit: Option<usize>,
    ) -> Result<Vec<RankedResult>> {
        validate_coordinates(lat, lon)?;
        validate_radius(radius_meters)?;
        validate_bit_depth(storage_bit_depth)?;

        let search_bit_depth = self.config.precision.select_bit_depth(radius_meters);
        let ranges = decompose(lat, lon, search_bit_depth, storage_bit_depth)?;

        let scan_limit = match self.config.scan_cap {
            ScanCap::PerRange => limit,
            ScanCap::Exact => None,
        };
        let candidates = self.scan_ranges(collection, &ranges, scan_limit)?;

        log::debug!(
            "radius {}m around ({}, {}) in '{}': depth {}, {} range(s), {} candidate(s)",
            radius_meters,
            lat,
            lon,
            collection,
            search_bit_depth,
            ranges.len(),
            candidates.len()
        );

        let query = GeoPoint::new(lat, lon);
        Ok(rank_with_distances(&query, storage_bit_depth, candidates, limit))
    }

    /// Decoded position of a stored label (its cell centre).
    pub fn position(
        &self,
        collection: &str,
        label: &str,
        storage_bit_depth: u8,
    ) -> Result<Option<GeoPoint>> {
        validate_bit_depth(storage_bit_depth)?;
        let score = self.store.score_of(collection, label)?;
        Ok(score.map(|score| decode_int(score as u64, storage_bit_depth).point))
    }

    /// Distance in meters between two stored labels, `None` if either is missing.
    pub fn distance(
        &self,
        collection: &str,
        from: &str,
        to: &str,
        storage_bit_depth: u8,
    ) -> Result<Option<f64>> {
        let Some(a) = self.position(collection, from, storage_bit_depth)? else {
            return Ok(None);
        };
        let Some(b) = self.position(collection, to, storage_bit_depth)? else {
            return Ok(None);
        };
        Ok(Some(codec::distance_between(&a, &b)))
    }

    /// Base32 geohash (`len` characters, 1-12) of a stored label.
    pub fn geohash(
        &self,
        collection: &str,
        label: &str,
        storage_bit_depth: u8,
        len: usize,
    ) -> Result<Option<String>> {
        if !(1..=12).contains(&len) {
            return Err(GeoError::InvalidInput(format!(
                "Geohash length must be in [1, 12], got: {}",
                len
            )));
        }
        self.position(collection, label, storage_bit_depth)?
            .map(|point| codec::to_base32(&point, len))
            .transpose()
    }

    /// Number of labels in `collection`.
    pub fn len(&self, collection: &str) -> Result<usize> {
        self.store.len(collection)
    }

    pub fn is_empty(&self, collection: &str) -> Result<bool> {
        Ok(self.len(collection)? == 0)
    }

    /// Scan every range, aborting on the first store error.
    fn scan_ranges(
        &self,
        collection: &str,
        ranges: &[GeoRange],
        limit: Option<usize>,
    ) -> Result<Vec<Candidate>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel_scans {
            use rayon::prelude::*;

            let batches = ranges
                .par_iter()
                .map(|range| self.scan_range(collection, range, limit))
                .collect::<Result<Vec<_>>>()?;
            return Ok(batches.into_iter().flatten().collect());
        }

        let mut candidates = Vec::new();
        for range in ranges {
            candidates.extend(self.scan_range(collection, range, limit)?);
        }
        Ok(candidates)
    }

    fn scan_range(
        &self,
        collection: &str,
        range: &GeoRange,
        limit: Option<usize>,
    ) -> Result<Vec<Candidate>> {
        let hits = self
            .store
            .scan_by_score_range(collection, range, limit)
            .inspect_err(|e| {
                log::error!(
                    "scan [{}, {}) on '{}' failed: {}",
                    range.lower,
                    range.upper,
                    collection,
                    e
                )
            })?;
        log::trace!(
            "scan [{}, {}) on '{}' returned {}",
            range.lower,
            range.upper,
            collection,
            hits.len()
        );
        Ok(hits)
    }
}
