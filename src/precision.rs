//! Radius to geohash bit-depth selection.
//!
//! Each step down the calibration table removes one latitude bit and one
//! longitude bit, i.e. two bits of depth, roughly doubling the cell width.

use crate::codec::MAX_BIT_DEPTH;
use serde::{Deserialize, Serialize};

/// Depth returned when the radius is wider than every calibrated step.
pub const COARSEST_BIT_DEPTH: u8 = 2;

/// Reference cell widths in meters, one per two-bit step down from depth 52.
const REFERENCE_CELL_WIDTHS: [f64; 25] = [
    0.6,        // 52
    1.0,        // 50
    2.19,       // 48
    4.57,       // 46
    9.34,       // 44
    14.4,       // 42
    33.18,      // 40
    62.1,       // 38
    128.55,     // 36
    252.9,      // 34
    510.02,     // 32
    1015.8,     // 30
    2236.5,     // 28
    3866.9,     // 26
    8749.7,     // 24
    15664.0,    // 22
    33163.5,    // 20
    72226.3,    // 18
    150350.0,   // 16
    306600.0,   // 14
    474640.0,   // 12
    1099600.0,  // 10
    2349600.0,  // 8
    4849600.0,  // 6
    10018863.0, // 4
];

/// Calibration table mapping search radii to geohash bit depths.
///
/// `cell_widths[i]` is the characteristic cell width at depth
/// `max_bit_depth - 2 * i`. The table is an immutable value owned by the
/// index configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrecisionTable {
    #[serde(default = "PrecisionTable::default_max_bit_depth")]
    max_bit_depth: u8,

    #[serde(default = "PrecisionTable::default_cell_widths")]
    cell_widths: Vec<f64>,
}

impl PrecisionTable {
    const fn default_max_bit_depth() -> u8 {
        MAX_BIT_DEPTH
    }

    fn default_cell_widths() -> Vec<f64> {
        REFERENCE_CELL_WIDTHS.to_vec()
    }

    /// Build a custom table. Call [`validate`](Self::validate) before use.
    pub fn new(max_bit_depth: u8, cell_widths: Vec<f64>) -> Self {
        Self {
            max_bit_depth,
            cell_widths,
        }
    }

    pub fn max_bit_depth(&self) -> u8 {
        self.max_bit_depth
    }

    pub fn cell_widths(&self) -> &[f64] {
        &self.cell_widths
    }

    /// Pick the bit depth whose cell width best matches `radius_meters`.
    ///
    /// Walks the table and stops at the first step `i` where the radius is
    /// closer to `cell_widths[i]` than to `cell_widths[i + 1]`. Radii beyond
    /// the last decision point map to [`COARSEST_BIT_DEPTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use geozset::precision::PrecisionTable;
    ///
    /// let table = PrecisionTable::default();
    /// assert_eq!(table.select_bit_depth(0.0), 52);
    /// assert_eq!(table.select_bit_depth(5000.0), 26);
    /// assert_eq!(table.select_bit_depth(50_000_000.0), 2);
    /// ```
    pub fn select_bit_depth(&self, radius_meters: f64) -> u8 {
        for (step, pair) in self.cell_widths.windows(2).enumerate() {
            if radius_meters - pair[0] < pair[1] - radius_meters {
                return self
                    .max_bit_depth
                    .saturating_sub(2 * step as u8)
                    .max(COARSEST_BIT_DEPTH);
            }
        }

        COARSEST_BIT_DEPTH
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cell_widths.len() < 2 {
            return Err("Precision table needs at least two cell widths".to_string());
        }

        if self.max_bit_depth > MAX_BIT_DEPTH {
            return Err(format!(
                "Precision table max bit depth {} exceeds {}",
                self.max_bit_depth, MAX_BIT_DEPTH
            ));
        }

        if let Some(w) = self
            .cell_widths
            .iter()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(format!("Cell widths must be finite and positive, got: {}", w));
        }

        if self.cell_widths.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err("Cell widths must be strictly increasing".to_string());
        }

        let steps = self.cell_widths.len() - 2;
        if (self.max_bit_depth as usize) < 2 * steps + COARSEST_BIT_DEPTH as usize {
            return Err(format!(
                "Max bit depth {} too small for {} cell widths",
                self.max_bit_depth,
                self.cell_widths.len()
            ));
        }

        Ok(())
    }
}

impl Default for PrecisionTable {
    fn default() -> Self {
        Self {
            max_bit_depth: Self::default_max_bit_depth(),
            cell_widths: Self::default_cell_widths(),
        }
    }
}
