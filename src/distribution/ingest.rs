// src/distribution/ingest.rs

use super::DistributionTable;
use crate::core::HaiquError;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw JSON shapes accepted for experiment counts.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCounts {
    /// `{"00": 498, "11": 502}`
    Flat(BTreeMap<String, u64>),
    /// `{"Z": {"00": 498, ...}, "X": {...}}`
    PerBasis(BTreeMap<String, BTreeMap<String, u64>>),
}

/// Recorded counts for one experiment, with the JSON shape resolved once at
/// ingestion time.
///
/// Some experiments were measured in a single basis (a flat histogram),
/// others in several bases (one histogram per basis). Callers match on the
/// variant instead of re-inspecting the JSON on every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentCounts {
    /// A single histogram.
    Flat(DistributionTable),
    /// One histogram per measurement basis, keyed by basis name.
    PerBasis(BTreeMap<String, DistributionTable>),
}

impl ExperimentCounts {
    /// Parses a JSON document holding either a flat or a per-basis histogram.
    ///
    /// Per-basis tables are labeled `"{label}/{basis}"`.
    ///
    /// # Errors
    /// * `HaiquError::Ingestion` if the document matches neither shape (this
    ///   includes negative or fractional counts).
    /// * Any table construction error for the histograms themselves.
    pub fn from_json_str(label: &str, json: &str) -> Result<Self, HaiquError> {
        let raw: RawCounts = serde_json::from_str(json).map_err(|e| HaiquError::Ingestion {
            message: format!("'{}' is neither a flat nor a per-basis count map: {}", label, e),
        })?;

        match raw {
            RawCounts::Flat(counts) => {
                debug!(label, "ingested flat counts");
                Ok(ExperimentCounts::Flat(DistributionTable::labeled(label, counts)?))
            }
            RawCounts::PerBasis(per_basis) => {
                if per_basis.is_empty() {
                    return Err(HaiquError::Ingestion { message: format!("'{}' has no bases", label) });
                }
                let mut tables = BTreeMap::new();
                for (basis, counts) in per_basis {
                    let table = DistributionTable::labeled(&format!("{}/{}", label, basis), counts)?;
                    tables.insert(basis, table);
                }
                debug!(label, bases = tables.len(), "ingested per-basis counts");
                Ok(ExperimentCounts::PerBasis(tables))
            }
        }
    }

    /// The single histogram of a flat experiment.
    pub fn flat(&self) -> Option<&DistributionTable> {
        match self {
            ExperimentCounts::Flat(table) => Some(table),
            ExperimentCounts::PerBasis(_) => None,
        }
    }

    /// The histogram recorded in `basis`, for per-basis experiments.
    pub fn basis(&self, basis: &str) -> Option<&DistributionTable> {
        match self {
            ExperimentCounts::Flat(_) => None,
            ExperimentCounts::PerBasis(tables) => tables.get(basis),
        }
    }

    /// Basis names (empty for flat experiments).
    pub fn bases(&self) -> Vec<&str> {
        match self {
            ExperimentCounts::Flat(_) => Vec::new(),
            ExperimentCounts::PerBasis(tables) => tables.keys().map(String::as_str).collect(),
        }
    }
}
