// src/poetry/mod.rs

//! The quantum poem: every measured 9-bit outcome of the poem circuit is a
//! three-line poem, and the entangled first/last lines can be drawn as a
//! correlated pair.

use crate::core::{Bitstring, HaiquError};
use crate::correlation::{Axis, CorrelatedDraw, CorrelationMatrix};
use crate::data;
use crate::decoding::{BitOrder, DecodedArtifact, Decoder};
use crate::distribution::DistributionTable;
use crate::metrics::{self, RankedEntry};
use crate::sampling::{self, SampleResult};
use crate::validation::check_table_width;
use rand::Rng;
use std::fmt;

/// A decoded poem with the frequency of the bitstring that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poem {
    artifact: DecodedArtifact,
    count: u64,
    total: u64,
}

impl Poem {
    /// The measured bitstring.
    pub fn key(&self) -> &Bitstring {
        self.artifact.key()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.artifact.values()
    }

    pub fn artifact(&self) -> &DecodedArtifact {
        &self.artifact
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Observed probability of this exact poem.
    pub fn probability(&self) -> f64 {
        metrics::probability(self.count, self.total)
    }
}

impl fmt::Display for Poem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.artifact)?;
        write!(f, "  -- |{}>, {}/{} shots", self.key(), self.count, self.total)
    }
}

/// A poem whose first and last lines came from one correlated draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelatedPoem {
    pub artifact: DecodedArtifact,
    pub draw: CorrelatedDraw,
}

impl CorrelatedPoem {
    /// `true` if the last line mirrors the first.
    pub fn held(&self) -> bool {
        self.draw.held
    }
}

impl fmt::Display for CorrelatedPoem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.artifact)?;
        if self.draw.held {
            write!(f, "  -- correlation held ({} -> {})", self.draw.first, self.draw.last)
        } else {
            write!(f, "  -- noise broke the correlation ({} -> {})", self.draw.first, self.draw.last)
        }
    }
}

/// Composes the poem distribution, the three-line decoder and the
/// first/last-line correlation matrix.
#[derive(Debug, Clone)]
pub struct PoemGenerator {
    table: DistributionTable,
    weights: Vec<u64>,
    decoder: Decoder,
    matrix: CorrelationMatrix,
}

impl PoemGenerator {
    /// # Errors
    /// * `HaiquError::WidthMismatch` if the table and decoder widths differ.
    /// * `HaiquError::InvalidBinding` unless the decoder has exactly three
    ///   fields whose first and last banks match the matrix size.
    pub fn new(table: DistributionTable, decoder: Decoder, matrix: CorrelationMatrix) -> Result<Self, HaiquError> {
        check_table_width(&table, decoder.width())?;
        let bindings = decoder.bindings();
        if bindings.len() != 3 {
            return Err(HaiquError::InvalidBinding {
                message: format!("a poem needs 3 lines, decoder has {} fields", bindings.len()),
            });
        }
        for binding in [&bindings[0], &bindings[2]] {
            if binding.bank.len() != matrix.size() {
                return Err(HaiquError::InvalidBinding {
                    message: format!(
                        "word bank '{}' has {} entries but the correlation matrix is {}x{}",
                        binding.bank.role(),
                        binding.bank.len(),
                        matrix.size(),
                        matrix.size()
                    ),
                });
            }
        }
        let weights = table.weights().collect();
        Ok(Self { table, weights, decoder, matrix })
    }

    /// Generator over the bundled poem data, high bits on the first line.
    pub fn bundled() -> Result<Self, HaiquError> {
        let decoder = Decoder::uniform(BitOrder::HighToLow, data::poem_word_banks()?)?;
        Self::new(data::poem_distribution()?, decoder, data::bell_pair_matrix()?)
    }

    pub fn table(&self) -> &DistributionTable {
        &self.table
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn matrix(&self) -> &CorrelationMatrix {
        &self.matrix
    }

    /// Samples a bitstring from the poem distribution and decodes it.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Poem, HaiquError> {
        self.poem_for_sample(&sampling::draw_sample(&self.table, &self.weights, rng))
    }

    /// Decodes the poem for an explicit bitstring; its count is 0 if the
    /// hardware never produced it.
    pub fn poem_for(&self, bits: &Bitstring) -> Result<Poem, HaiquError> {
        let sample = SampleResult::new(bits.clone(), self.table.count(bits), self.table.shot_total());
        self.poem_for_sample(&sample)
    }

    fn poem_for_sample(&self, sample: &SampleResult) -> Result<Poem, HaiquError> {
        Ok(Poem { artifact: self.decoder.decode(sample.key())?, count: sample.count(), total: sample.total() })
    }

    /// Fixes the first line (`Axis::Row`) or the last line (`Axis::Column`),
    /// draws the other from the correlation matrix, and uses `middle` for
    /// the second line.
    pub fn correlated<R: Rng + ?Sized>(&self, axis: Axis, middle: usize, rng: &mut R) -> Result<CorrelatedPoem, HaiquError> {
        let draw = self.matrix.derive(axis, rng)?;
        let bits = self.decoder.encode(&[draw.first, middle, draw.last])?;
        Ok(CorrelatedPoem { artifact: self.decoder.decode(&bits)?, draw })
    }

    /// The `n` most frequent poems.
    pub fn top_poems(&self, n: usize) -> Result<Vec<(RankedEntry, Poem)>, HaiquError> {
        metrics::top_n(&self.table, n)
            .into_iter()
            .map(|entry| -> Result<(RankedEntry, Poem), HaiquError> {
                let poem = self.poem_for(&entry.key)?;
                Ok((entry, poem))
            })
            .collect()
    }
}
