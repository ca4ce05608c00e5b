// src/sampling/results.rs
use crate::core::{Bitstring, DEFAULT_PERCENT_DECIMALS};
use crate::metrics;
use std::fmt;

/// One weighted draw from a distribution table.
/// Holds the selected key together with its recorded count and the table
/// total, which is enough to report the observed probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleResult {
    key: Bitstring,
    count: u64,
    total: u64,
}

impl SampleResult {
    /// Creates a result. (Internal visibility)
    pub(crate) fn new(key: Bitstring, count: u64, total: u64) -> Self {
        Self { key, count, total }
    }

    /// The sampled bitstring.
    pub fn key(&self) -> &Bitstring {
        &self.key
    }

    /// Recorded count of the sampled bitstring.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Shot total of the table the sample was drawn from.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `count / total`.
    pub fn probability(&self) -> f64 {
        metrics::probability(self.count, self.total)
    }

    /// `probability * 100`.
    pub fn percentage(&self) -> f64 {
        metrics::percentage(self.count, self.total)
    }

    /// Consumes the result, returning the sampled key.
    pub fn into_key(self) -> Bitstring {
        self.key
    }
}

impl fmt::Display for SampleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} shots, {}%)",
            self.key,
            self.count,
            self.total,
            metrics::format_percentage(self.probability(), DEFAULT_PERCENT_DECIMALS)
        )
    }
}
