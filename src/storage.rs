//! Sorted-set store abstraction for geozset
//!
//! Collections are named sets of `(label, score)` members ordered by score.
//! The geohash score of a label is its only index; there is no separate
//! spatial structure to maintain.

use crate::error::Result;
use geozset_types::range::GeoRange;
use geozset_types::result::Candidate;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// A member to upsert into a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember {
    pub label: String,
    pub score: f64,
}

impl ScoredMember {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Trait for ordered key-value stores holding score-ordered members.
///
/// Implementations own their own locking; every method takes `&self` so
/// range scans can be issued concurrently. Failures are reported as
/// [`GeoError::Store`](crate::GeoError::Store) and propagated unchanged by
/// the index.
pub trait ScoredStore: Send + Sync {
    /// Upsert members. Returns the number of newly inserted labels;
    /// labels that already existed only have their score replaced.
    fn insert_scored(&self, collection: &str, members: &[ScoredMember]) -> Result<u64>;

    /// Remove members by label. Returns the number actually removed.
    fn remove_by_key(&self, collection: &str, labels: &[&str]) -> Result<u64>;

    /// Members with `range.lower <= score < range.upper`, ordered by
    /// `(score, label)` ascending, truncated to `limit` when given.
    fn scan_by_score_range(
        &self,
        collection: &str,
        range: &GeoRange,
        limit: Option<usize>,
    ) -> Result<Vec<Candidate>>;

    /// Score of a single member, if present.
    fn score_of(&self, collection: &str, label: &str) -> Result<Option<f64>>;

    /// Number of members in a collection. Missing collections are empty.
    fn len(&self, collection: &str) -> Result<usize>;
}

/// Storage backend statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of non-empty collections
    pub collection_count: usize,
    /// Total members across collections
    pub member_count: usize,
    /// Number of insert/remove/scan calls served
    pub operations_count: u64,
}

/// Score wrapper with a total order so it can key a `BTreeSet`.
#[derive(Debug, Clone, Copy)]
struct Score(f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One collection: label lookup plus score order.
#[derive(Debug, Default)]
struct SortedSet {
    scores: FxHashMap<String, f64>,
    ordered: BTreeSet<(Score, String)>,
}

impl SortedSet {
    fn upsert(&mut self, label: &str, score: f64) -> bool {
        match self.scores.insert(label.to_string(), score) {
            Some(old) => {
                self.ordered.remove(&(Score(old), label.to_string()));
                self.ordered.insert((Score(score), label.to_string()));
                false
            }
            None => {
                self.ordered.insert((Score(score), label.to_string()));
                true
            }
        }
    }

    fn remove(&mut self, label: &str) -> bool {
        match self.scores.remove(label) {
            Some(score) => {
                self.ordered.remove(&(Score(score), label.to_string()));
                true
            }
            None => false,
        }
    }

    fn range(&self, range: &GeoRange, limit: Option<usize>) -> Vec<Candidate> {
        // The empty string sorts before every label, so these bounds select
        // exactly `lower <= score < upper`.
        let from = (Score(range.lower), String::new());
        let to = (Score(range.upper), String::new());
        if from >= to {
            return Vec::new();
        }

        self.ordered
            .range(from..to)
            .take(limit.unwrap_or(usize::MAX))
            .map(|(score, label)| Candidate::new(label.clone(), score.0))
            .collect()
    }

    fn len(&self) -> usize {
        self.scores.len()
    }

    fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// In-memory sorted-set backend
///
/// Thread-safe: collections live behind a single `RwLock`, so scans share
/// the read lock while inserts and removals take the write lock.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<FxHashMap<String, SortedSet>>,
    operations: AtomicU64,
}

impl MemoryBackend {
    /// Create a new in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage statistics
    pub fn stats(&self) -> StorageStats {
        let collections = self.collections.read();
        StorageStats {
            collection_count: collections.values().filter(|set| !set.is_empty()).count(),
            member_count: collections.values().map(SortedSet::len).sum(),
            operations_count: self.operations.load(AtomicOrdering::Relaxed),
        }
    }

    /// Drop every collection.
    pub fn clear(&self) {
        self.collections.write().clear();
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, AtomicOrdering::Relaxed);
    }
}

impl ScoredStore for MemoryBackend {
    fn insert_scored(&self, collection: &str, members: &[ScoredMember]) -> Result<u64> {
        self.record_operation();
        let mut collections = self.collections.write();
        let set = collections.entry(collection.to_string()).or_default();

        let mut inserted = 0;
        for member in members {
            if set.upsert(&member.label, member.score) {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn remove_by_key(&self, collection: &str, labels: &[&str]) -> Result<u64> {
        self.record_operation();
        let mut collections = self.collections.write();
        let Some(set) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let removed = labels.iter().filter(|label| set.remove(label)).count() as u64;
        if set.is_empty() {
            collections.remove(collection);
        }
        Ok(removed)
    }

    fn scan_by_score_range(
        &self,
        collection: &str,
        range: &GeoRange,
        limit: Option<usize>,
    ) -> Result<Vec<Candidate>> {
        self.record_operation();
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|set| set.range(range, limit))
            .unwrap_or_default())
    }

    fn score_of(&self, collection: &str, label: &str) -> Result<Option<f64>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|set| set.scores.get(label).copied()))
    }

    fn len(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read();
        Ok(collections.get(collection).map_or(0, SortedSet::len))
    }
}
