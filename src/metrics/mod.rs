// src/metrics/mod.rs

//! Probability and ranking annotations shown next to sampled artifacts.

use crate::core::{Bitstring, DEFAULT_PERCENT_DECIMALS, DEFAULT_TOP_N};
use crate::correlation::CorrelationMatrix;
use crate::distribution::DistributionTable;
use crate::sampling::SampleResult;
use std::collections::BTreeMap;
use std::fmt;

/// Display settings for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Decimal places for percentages.
    pub decimals: usize,
    /// Length of top-N rankings.
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { decimals: DEFAULT_PERCENT_DECIMALS, top_n: DEFAULT_TOP_N }
    }
}

/// `count / total`, or 0 for an empty total.
pub fn probability(count: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { count as f64 / total as f64 }
}

/// `probability(count, total) * 100`.
pub fn percentage(count: u64, total: u64) -> f64 {
    probability(count, total) * 100.0
}

/// Formats a probability as a percentage with `decimals` places, without the `%` sign.
pub fn format_percentage(probability: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, probability * 100.0)
}

/// One row of a probability ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub key: Bitstring,
    pub count: u64,
    pub probability: f64,
}

/// The `n` most frequent keys of `table`, highest count first. Ties are
/// broken by ascending key so the ranking is reproducible.
pub fn top_n(table: &DistributionTable, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<&(Bitstring, u64)> = table.entries().iter().collect();
    entries.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
    entries
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (key, count))| RankedEntry {
            rank: i + 1,
            key: key.clone(),
            count: *count,
            probability: probability(*count, table.shot_total()),
        })
        .collect()
}

/// Share of the matrix mass on the diagonal, i.e. how often the
/// correlation held across every recorded shot.
pub fn correlation_rate(matrix: &CorrelationMatrix) -> f64 {
    probability(matrix.diagonal_total(), matrix.total())
}

/// Pearson chi-squared statistic of an observed histogram against the
/// proportions recorded in `table`.
///
/// Degrees of freedom are `table.len() - 1`. An observed key the table gives
/// no mass to makes the statistic infinite.
pub fn chi_squared(observed: &BTreeMap<Bitstring, u64>, table: &DistributionTable) -> f64 {
    let shots: u64 = observed.values().sum();
    if shots == 0 {
        return 0.0;
    }
    if observed.iter().any(|(k, c)| *c > 0 && table.count(k) == 0) {
        return f64::INFINITY;
    }
    table
        .entries()
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(key, count)| {
            let expected = shots as f64 * probability(*count, table.shot_total());
            let seen = observed.get(key).copied().unwrap_or(0) as f64;
            (seen - expected).powi(2) / expected
        })
        .sum()
}

/// Text annotations for one sample, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub key: Bitstring,
    pub count: u64,
    pub total: u64,
    pub probability: f64,
    /// Percentage formatted with the configured precision.
    pub percentage: String,
}

impl Report {
    pub fn from_sample(sample: &SampleResult, config: &ReportConfig) -> Self {
        Self {
            key: sample.key().clone(),
            count: sample.count(),
            total: sample.total(),
            probability: sample.probability(),
            percentage: format_percentage(sample.probability(), config.decimals),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} ({}%)", self.key, self.count, self.total, self.percentage)
    }
}
