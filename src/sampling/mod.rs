// src/sampling/mod.rs

//! Weighted categorical sampling over recorded counts.
//!
//! The draw is the classic cumulative-subtraction scheme: pick
//! `r = u * total` with `u` uniform in `[0, 1)`, walk the weights in their
//! fixed order subtracting each one, and stop at the first entry that drives
//! `r` to zero or below. Randomness is always supplied by the caller so that
//! tests and demos can seed it.

mod results;

pub use results::SampleResult;

use crate::core::Bitstring;
use crate::distribution::DistributionTable;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::trace;

/// Draws an index from `weights` with probability `weights[i] / total`.
///
/// `total` is the precomputed sum of `weights`; callers sampling repeatedly
/// from the same vector pass it in to skip the O(n) summation.
///
/// Zero-weight entries are never selected. If floating-point drift lets the
/// walk run off the end, the last nonzero entry is returned; this is a
/// defined fallback, not an error.
///
/// Returns `None` only when there is nothing to draw: `total == 0` or every
/// weight is zero.
pub fn sample_index<R: Rng + ?Sized>(weights: &[u64], total: u64, rng: &mut R) -> Option<usize> {
    if total == 0 {
        return None;
    }
    let mut remaining = rng.random::<f64>() * total as f64;
    let mut last_nonzero = None;

    for (index, weight) in weights.iter().enumerate() {
        if *weight == 0 {
            continue;
        }
        last_nonzero = Some(index);
        remaining -= *weight as f64;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    // Reached only when `total` overstates the weights or through rounding.
    trace!(?last_nonzero, "weighted walk exhausted, falling back to last nonzero entry");
    last_nonzero
}

/// Same as [`sample_index`] but sums `weights` itself.
pub fn sample_weighted<R: Rng + ?Sized>(weights: &[u64], rng: &mut R) -> Option<usize> {
    let total = weights.iter().fold(0u64, |acc, w| acc.saturating_add(*w));
    sample_index(weights, total, rng)
}

/// Draws an entry index from `table`, given its cached `weights`.
///
/// Tables always carry a positive total, so the draw cannot come back
/// empty; index 0 keeps this total anyway.
pub(crate) fn draw_entry<R: Rng + ?Sized>(table: &DistributionTable, weights: &[u64], rng: &mut R) -> usize {
    sample_index(weights, table.shot_total(), rng).unwrap_or(0)
}

/// Draws one outcome of `table` as a [`SampleResult`].
pub(crate) fn draw_sample<R: Rng + ?Sized>(table: &DistributionTable, weights: &[u64], rng: &mut R) -> SampleResult {
    let (key, count) = &table.entries()[draw_entry(table, weights, rng)];
    SampleResult::new(key.clone(), *count, table.shot_total())
}

/// Samples bitstrings from a borrowed [`DistributionTable`].
///
/// The weight vector and total are cached at construction, so repeated
/// draws (one per click or playback tick) are a single linear walk.
#[derive(Debug, Clone)]
pub struct WeightedSampler<'a> {
    table: &'a DistributionTable,
    weights: Vec<u64>,
}

impl<'a> WeightedSampler<'a> {
    pub fn new(table: &'a DistributionTable) -> Self {
        Self { table, weights: table.weights().collect() }
    }

    /// The table being sampled.
    pub fn table(&self) -> &'a DistributionTable {
        self.table
    }

    /// Draws one outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleResult {
        draw_sample(self.table, &self.weights, rng)
    }

    /// Draws `shots` outcomes and returns how often each key came up.
    /// Keys that were never drawn are absent from the map.
    pub fn sample_n<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> BTreeMap<Bitstring, u64> {
        let mut histogram = BTreeMap::new();
        for _ in 0..shots {
            let index = draw_entry(self.table, &self.weights, rng);
            *histogram.entry(self.table.entries()[index].0.clone()).or_insert(0) += 1;
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HaiquError;
    use rand::SeedableRng;
    use rand::RngCore;
    use rand::rngs::StdRng;

    /// Returns the same raw word forever, pinning `random::<f64>()`.
    struct FixedRng(u64);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    #[test]
    fn test_single_nonzero_entry_always_selected() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights = [0, 0, 42, 0];
        for _ in 0..1_000 {
            assert_eq!(sample_weighted(&weights, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_zero_draw_skips_leading_zero_weights() {
        // A zero word yields u = 0.0.
        let mut rng = FixedRng(0);
        assert_eq!(sample_weighted(&[0, 5, 5], &mut rng), Some(1));
    }

    #[test]
    fn test_all_zero_weights_yield_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_weighted(&[0, 0, 0], &mut rng), None);
        assert_eq!(sample_weighted(&[], &mut rng), None);
    }

    #[test]
    fn test_overstated_total_falls_back_to_last_nonzero() {
        // u close to 1 against a total far larger than the weights.
        let mut rng = FixedRng(u64::MAX);
        assert_eq!(sample_index(&[3, 4, 0], 1_000, &mut rng), Some(1));
    }

    #[test]
    fn test_sampler_reports_count_and_total() -> Result<(), HaiquError> {
        let table = DistributionTable::from_static("t", &[("0", 0), ("1", 10)])?;
        let sampler = WeightedSampler::new(&table);
        let mut rng = StdRng::seed_from_u64(3);
        let result = sampler.sample(&mut rng);
        assert_eq!(result.key().as_str(), "1");
        assert_eq!(result.count(), 10);
        assert_eq!(result.total(), 10);
        assert!((result.probability() - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_sample_n_counts_every_shot() -> Result<(), HaiquError> {
        let table = DistributionTable::from_static("t", &[("00", 75), ("01", 25)])?;
        let sampler = WeightedSampler::new(&table);
        let mut rng = StdRng::seed_from_u64(11);
        let histogram = sampler.sample_n(10_000, &mut rng);
        assert_eq!(histogram.values().sum::<u64>(), 10_000);
        let zeros = histogram.get(&Bitstring::parse("00")?).copied().unwrap_or(0);
        assert!((7_200..=7_800).contains(&zeros), "got {}", zeros);
        Ok(())
    }

    #[test]
    fn test_display_formats_percentage() -> Result<(), HaiquError> {
        let result = SampleResult::new(Bitstring::parse("101")?, 1, 8);
        assert_eq!(result.to_string(), "101 (1/8 shots, 12.50%)");
        Ok(())
    }
}
