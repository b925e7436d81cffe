use serde::{Deserialize, Serialize};

/// A member returned by a score range scan.
///
/// Candidates come back in store order, not distance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub score: f64,
}

impl Candidate {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A candidate with its great-circle distance (meters) to the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub label: String,
    pub distance: f64,
}

impl RankedResult {
    pub fn new(label: impl Into<String>, distance: f64) -> Self {
        Self {
            label: label.into(),
            distance,
        }
    }
}
