// src/distribution/mod.rs

//! Read-only empirical distributions over measured bitstrings.
//!
//! A `DistributionTable` is built once from literal data (or ingested JSON),
//! validated at construction, and never mutated afterwards. Every sampler,
//! decoder and reporter in the crate borrows tables immutably.

mod ingest;

pub use ingest::ExperimentCounts;

use crate::core::{Bitstring, HaiquError};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Histogram of bitstring outcomes from repeated shots of one circuit.
///
/// Invariants (checked by every constructor):
/// * at least one entry, all keys share the same width;
/// * no duplicate keys;
/// * `shot_total`, the sum of all counts, is positive.
///
/// Entries are stored in ascending lexical key order, which is the fixed
/// iteration order the sampler relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionTable {
    label: Option<String>,
    width: usize,
    entries: Vec<(Bitstring, u64)>,
    shot_total: u64,
}

impl DistributionTable {
    /// Builds a table from `(bitstring, count)` pairs.
    ///
    /// # Errors
    /// * `HaiquError::InvalidBitstring` if a key is not a `0`/`1` string.
    /// * `HaiquError::MalformedTable` for empty input, mixed key widths,
    ///   duplicate keys, a zero total or an overflowing total.
    pub fn from_counts<I, K>(counts: I) -> Result<Self, HaiquError>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        Self::build(None, counts)
    }

    /// Same as [`DistributionTable::from_counts`] but attaches a label that is
    /// carried into diagnostics, e.g. `"DIST_Z"`.
    pub fn labeled<I, K>(label: &str, counts: I) -> Result<Self, HaiquError>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        Self::build(Some(label), counts)
    }

    /// Convenience for the `&[("00", 512), ...]` literals the data module uses.
    pub fn from_static(label: &str, counts: &[(&str, u64)]) -> Result<Self, HaiquError> {
        Self::labeled(label, counts.iter().copied())
    }

    fn build<I, K>(label: Option<&str>, counts: I) -> Result<Self, HaiquError>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut sorted: BTreeMap<Bitstring, u64> = BTreeMap::new();
        let mut width: Option<usize> = None;

        for (key, count) in counts {
            let key = Bitstring::parse(key.as_ref())?;
            match width {
                None => width = Some(key.width()),
                Some(w) if w != key.width() => {
                    return Err(HaiquError::malformed(
                        label,
                        format!("key '{}' has {} bits but the table uses {}", key, key.width(), w),
                    ));
                }
                Some(_) => {}
            }
            if sorted.contains_key(&key) {
                return Err(HaiquError::malformed(label, format!("duplicate key '{}'", key)));
            }
            sorted.insert(key, count);
        }

        let width = width.ok_or_else(|| HaiquError::malformed(label, "table has no entries"))?;

        let shot_total = sorted
            .values()
            .try_fold(0u64, |acc, c| acc.checked_add(*c))
            .ok_or_else(|| HaiquError::malformed(label, "shot total overflows u64"))?;
        if shot_total == 0 {
            return Err(HaiquError::malformed(label, "all counts are zero"));
        }

        let entries: Vec<(Bitstring, u64)> = sorted.into_iter().collect();
        debug!(
            table = label.unwrap_or("<unlabeled>"),
            width,
            entries = entries.len(),
            shot_total,
            "distribution table loaded"
        );

        Ok(Self { label: label.map(str::to_string), width, entries, shot_total })
    }

    /// Optional label the table was created with.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Width in bits of every key.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sum of all counts.
    pub fn shot_total(&self) -> u64 {
        self.shot_total
    }

    /// Number of distinct recorded outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> &[(Bitstring, u64)] {
        &self.entries
    }

    /// Counts in entry order.
    pub fn weights(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    /// Recorded count for `key`, or 0 if the outcome never occurred.
    pub fn count(&self, key: &Bitstring) -> u64 {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .map(|i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Observed probability `count / shot_total` for `key`.
    pub fn probability(&self, key: &Bitstring) -> f64 {
        self.count(key) as f64 / self.shot_total as f64
    }
}

impl fmt::Display for DistributionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Distribution {} ({} bits, {} shots):",
            self.label.as_deref().unwrap_or("<unlabeled>"),
            self.width,
            self.shot_total
        )?;
        for (key, count) in &self.entries {
            writeln!(f, "  {}: {}", key, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_sorted_and_total_derived() -> Result<(), HaiquError> {
        let table = DistributionTable::from_static("bell", &[("11", 480), ("00", 500), ("01", 20), ("10", 24)])?;
        let keys: Vec<&str> = table.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["00", "01", "10", "11"]);
        assert_eq!(table.shot_total(), 1024);
        assert_eq!(table.width(), 2);
        assert_eq!(table.count(&Bitstring::parse("10")?), 24);
        Ok(())
    }

    #[test]
    fn test_missing_key_counts_zero() -> Result<(), HaiquError> {
        let table = DistributionTable::from_static("t", &[("000", 3), ("111", 1)])?;
        assert_eq!(table.count(&Bitstring::parse("010")?), 0);
        assert!((table.probability(&Bitstring::parse("000")?) - 0.75).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_rejects_mixed_widths() {
        let err = DistributionTable::from_static("mixed", &[("00", 1), ("011", 1)]).unwrap_err();
        assert!(matches!(err, HaiquError::MalformedTable { table: Some(ref t), .. } if t == "mixed"));
    }

    #[test]
    fn test_rejects_duplicates_empty_and_zero_total() {
        assert!(matches!(
            DistributionTable::from_static("dup", &[("01", 1), ("01", 2)]),
            Err(HaiquError::MalformedTable { .. })
        ));
        assert!(matches!(
            DistributionTable::from_counts(Vec::<(String, u64)>::new()),
            Err(HaiquError::MalformedTable { .. })
        ));
        assert!(matches!(
            DistributionTable::from_static("zero", &[("0", 0), ("1", 0)]),
            Err(HaiquError::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(matches!(
            DistributionTable::from_static("bad", &[("0a", 1)]),
            Err(HaiquError::InvalidBitstring { .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_total() {
        assert!(matches!(
            DistributionTable::from_static("big", &[("0", u64::MAX), ("1", 1)]),
            Err(HaiquError::MalformedTable { .. })
        ));
    }
}
