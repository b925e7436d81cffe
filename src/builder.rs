//! Index builder for flexible configuration
//!
//! Collects configuration (inline or from a file), validates it once, and
//! attaches it to a store.

use crate::config::{Config, ScanCap};
use crate::error::Result;
use crate::index::GeoIndex;
use crate::precision::PrecisionTable;
use crate::storage::{MemoryBackend, ScoredStore};
use std::path::Path;

/// Builder for [`GeoIndex`] with custom calibration and scan policies.
#[derive(Debug, Default)]
pub struct GeoIndexBuilder {
    config: Config,
}

impl GeoIndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a `.json` or `.toml` file.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = Config::load(path)?;
        Ok(self)
    }

    /// Use a custom radius calibration table.
    pub fn precision(mut self, precision: PrecisionTable) -> Self {
        self.config = self.config.with_precision(precision);
        self
    }

    pub fn scan_cap(mut self, scan_cap: ScanCap) -> Self {
        self.config = self.config.with_scan_cap(scan_cap);
        self
    }

    /// Fan range scans out over the rayon pool (needs the `parallel` feature).
    pub fn parallel_scans(mut self, enabled: bool) -> Self {
        self.config = self.config.with_parallel_scans(enabled);
        self
    }

    /// Build an index over `store`. Fails if the configuration is invalid.
    pub fn build<S: ScoredStore>(self, store: S) -> Result<GeoIndex<S>> {
        GeoIndex::with_config(store, self.config)
    }

    /// Build an index over a fresh [`MemoryBackend`].
    pub fn build_in_memory(self) -> Result<GeoIndex<MemoryBackend>> {
        self.build(MemoryBackend::new())
    }
}
