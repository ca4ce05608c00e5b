// src/lib.rs

//! `haiqu` - weighted sampling and decoding over recorded quantum hardware results
//!
//! Pre-computed measurement distributions (Bell pairs, GHZ states, a nine
//! qubit poem circuit) are loaded once as read-only tables. Outcomes are
//! drawn in proportion to their recorded counts and decoded into poems,
//! chords or ranked histogram entries with probability annotations.

pub mod core;
pub mod distribution;
pub mod sampling;
pub mod decoding;
pub mod correlation;
pub mod metrics;
pub mod validation;
pub mod sonification;
pub mod poetry;
pub mod data;
pub mod logging;

// Re-export the most common types for easier top-level use
pub use crate::core::{BitRange, Bitstring, HaiquError};
pub use distribution::{DistributionTable, ExperimentCounts};
pub use sampling::{SampleResult, WeightedSampler, sample_index, sample_weighted};
pub use decoding::{BitOrder, DecodedArtifact, Decoder, FieldBinding, WordBank};
pub use correlation::{Axis, CorrelatedDraw, CorrelationMatrix};
pub use metrics::{RankedEntry, Report, ReportConfig};
pub use sonification::{Chord, PlaybackSchedule, SonificationConfig};
pub use poetry::{Poem, PoemGenerator};
pub use validation::{check_binding_coverage, check_positive_lines, check_table_width, is_symmetric};

// Example 1: Weighted draw from a recorded Bell distribution
// Every draw is proportional to the recorded count; seeding the RNG makes
// the sequence reproducible.
/// ```
/// use haiqu::{DistributionTable, WeightedSampler, HaiquError};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let table = DistributionTable::from_static("DIST_Z", &[("00", 496), ("01", 14), ("10", 19), ("11", 495)])?;
/// let sampler = WeightedSampler::new(&table);
/// let mut rng = StdRng::seed_from_u64(2024);
///
/// let sample = sampler.sample(&mut rng);
/// println!("Measured {}", sample);
/// assert_eq!(sample.total(), 1024);
/// assert_eq!(table.count(sample.key()), sample.count());
/// # Ok::<(), HaiquError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Same bits, same poem
// Three 3-bit fields, high bits first, each indexing an 8-line word bank.
/// ```
/// use haiqu::{BitOrder, Bitstring, Decoder, HaiquError, WordBank};
///
/// let bank = |role: &str| -> Result<WordBank, HaiquError> {
///     WordBank::new(role, (0..8).map(|i| format!("{} {}", role, i)).collect::<Vec<_>>())
/// };
/// let decoder = Decoder::uniform(BitOrder::HighToLow, vec![bank("first")?, bank("middle")?, bank("last")?])?;
///
/// let bits = Bitstring::parse("000011010")?;
/// let poem = decoder.decode(&bits)?;
/// assert_eq!(poem.values(), vec!["first 0", "middle 3", "last 2"]);
/// assert_eq!(poem, decoder.decode(&bits)?);
/// # Ok::<(), HaiquError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
