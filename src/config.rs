//! Configuration for geozset indexes
//!
//! Holds the radius calibration table and the scan policies applied to
//! limited searches. Loaded from JSON or (with the `toml` feature) TOML.
use crate::error::{GeoError, Result};
use crate::precision::PrecisionTable;
use serde::de::Error;
use std::path::Path;

/// How a result limit is applied to per-range store scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanCap {
    /// Each range scan is capped at `limit` before global ranking.
    ///
    /// Cheap, but approximate: a range saturated with far members can crowd
    /// out nearer members, so the result is not a guaranteed top-`limit`.
    #[default]
    PerRange,
    /// Range scans are unbounded; `limit` is applied only after ranking.
    Exact,
}

/// Index configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan_cap: ScanCap,

    /// Issue range scans concurrently on the rayon pool. Accepted in every
    /// build so config files load regardless of features; ignored unless the
    /// `parallel` feature is enabled.
    #[serde(default)]
    pub parallel_scans: bool,

    /// Radius to bit-depth calibration
    #[serde(default)]
    pub precision: PrecisionTable,
}

impl Config {
    pub fn with_precision(mut self, precision: PrecisionTable) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_scan_cap(mut self, scan_cap: ScanCap) -> Self {
        self.scan_cap = scan_cap;
        self
    }

    pub fn with_parallel_scans(mut self, enabled: bool) -> Self {
        self.parallel_scans = enabled;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.precision.validate()
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a config file, choosing the format by extension (`.json`, `.toml`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::from_json(&contents)?),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents).map_err(|e| GeoError::Toml(e.to_string())),
            other => Err(GeoError::Config(format!(
                "Unsupported config file extension: {:?}",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_cap: ScanCap::default(),
            parallel_scans: false,
            precision: PrecisionTable::default(),
        }
    }
}
