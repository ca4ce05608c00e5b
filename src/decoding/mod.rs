// src/decoding/mod.rs

//! Deterministic decoding of a bitstring into a multi-part artifact.
//!
//! A [`Decoder`] slices a fixed-width bitstring into disjoint bit ranges and
//! uses each slice, read as a binary integer, to index one [`WordBank`].
//! The same bits always produce the same artifact: the poem that comes up
//! for `"000011010"` is the same poem every time those bits are measured.

mod artifact;

pub use artifact::{DecodedArtifact, DecodedField};

use crate::core::{BitRange, Bitstring, HaiquError};
use crate::validation::check_binding_coverage;
use std::fmt;

/// An ordered list of text fragments for one field of an artifact.
///
/// The size is a power of two so that a bit range of width `log2(len)`
/// addresses every entry and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    role: String,
    entries: Vec<String>,
}

impl WordBank {
    /// # Errors
    /// `HaiquError::InvalidBinding` unless `entries.len()` is a power of two ≥ 2.
    pub fn new<S: Into<String>>(role: &str, entries: Vec<S>) -> Result<Self, HaiquError> {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        if entries.len() < 2 || !entries.len().is_power_of_two() {
            return Err(HaiquError::InvalidBinding {
                message: format!("word bank '{}' has {} entries, expected a power of two >= 2", role, entries.len()),
            });
        }
        Ok(Self { role: role.to_string(), entries })
    }

    pub fn from_static(role: &str, entries: &[&str]) -> Result<Self, HaiquError> {
        Self::new(role, entries.to_vec())
    }

    /// The field this bank fills, e.g. `"line1"`.
    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bits needed to address every entry.
    pub fn index_bits(&self) -> usize {
        self.entries.len().trailing_zeros() as usize
    }

    /// Entry at `index`; never clamps.
    pub fn get(&self, index: usize) -> Result<&str, HaiquError> {
        self.entries.get(index).map(String::as_str).ok_or_else(|| HaiquError::IndexOutOfRange {
            index,
            len: self.entries.len(),
            context: format!("word bank '{}'", self.role),
        })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Which end of the bitstring feeds the first word bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitOrder {
    /// The leftmost (most significant) bits index the first bank.
    #[default]
    HighToLow,
    /// The rightmost (least significant) bits index the first bank.
    LowToHigh,
}

/// Binds one bit range of the input to one word bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub range: BitRange,
    pub bank: WordBank,
}

impl FieldBinding {
    pub fn new(range: BitRange, bank: WordBank) -> Self {
        Self { range, bank }
    }
}

/// Maps fixed-width bitstrings to [`DecodedArtifact`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    width: usize,
    bindings: Vec<FieldBinding>,
}

impl Decoder {
    /// Builds a decoder over `width`-bit strings.
    ///
    /// Fields are decoded in the order given.
    ///
    /// # Errors
    /// `HaiquError::InvalidBinding` if a range width differs from
    /// `log2(bank.len())`, or if the ranges do not tile `0..width` exactly.
    pub fn new(width: usize, bindings: Vec<FieldBinding>) -> Result<Self, HaiquError> {
        for binding in &bindings {
            if binding.range.width != binding.bank.index_bits() {
                return Err(HaiquError::InvalidBinding {
                    message: format!(
                        "field '{}' reads {} bits but its word bank needs {}",
                        binding.bank.role(),
                        binding.range.width,
                        binding.bank.index_bits()
                    ),
                });
            }
        }
        let ranges: Vec<BitRange> = bindings.iter().map(|b| b.range).collect();
        check_binding_coverage(width, &ranges)?;
        Ok(Self { width, bindings })
    }

    /// Lays `banks` out as contiguous fields, each as wide as its bank needs.
    ///
    /// With [`BitOrder::HighToLow`] the first bank reads the leftmost bits;
    /// with [`BitOrder::LowToHigh`] it reads the rightmost ones.
    pub fn uniform(order: BitOrder, banks: Vec<WordBank>) -> Result<Self, HaiquError> {
        let width: usize = banks.iter().map(WordBank::index_bits).sum();
        let mut bindings = Vec::with_capacity(banks.len());
        let mut offset = 0;
        for bank in banks {
            let bits = bank.index_bits();
            let start = match order {
                BitOrder::HighToLow => offset,
                BitOrder::LowToHigh => width - offset - bits,
            };
            bindings.push(FieldBinding::new(BitRange::new(start, bits), bank));
            offset += bits;
        }
        Self::new(width, bindings)
    }

    /// Expected bitstring length.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Word-bank indices selected by `bits`, one per field.
    pub fn indices(&self, bits: &Bitstring) -> Result<Vec<usize>, HaiquError> {
        self.check_width(bits)?;
        self.bindings.iter().map(|b| bits.slice_value(b.range)).collect()
    }

    /// Decodes `bits` into one value per field.
    ///
    /// # Errors
    /// * `HaiquError::WidthMismatch` if `bits` is not `width()` long.
    /// * `HaiquError::IndexOutOfRange` if a slice addresses past its bank.
    pub fn decode(&self, bits: &Bitstring) -> Result<DecodedArtifact, HaiquError> {
        self.check_width(bits)?;
        let mut fields = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let index = bits.slice_value(binding.range)?;
            let value = binding.bank.get(index)?;
            fields.push(DecodedField::new(binding.bank.role(), index, value));
        }
        Ok(DecodedArtifact::new(bits.clone(), fields))
    }

    /// Inverse of [`Decoder::indices`]: the bitstring that selects `indices`.
    pub fn encode(&self, indices: &[usize]) -> Result<Bitstring, HaiquError> {
        if indices.len() != self.bindings.len() {
            return Err(HaiquError::InvalidBinding {
                message: format!("{} indices given for {} fields", indices.len(), self.bindings.len()),
            });
        }
        let mut chars = vec!['0'; self.width];
        for (binding, index) in self.bindings.iter().zip(indices) {
            binding.bank.get(*index)?;
            let slice = Bitstring::from_index(*index, binding.range.width)?;
            for (offset, c) in slice.as_str().chars().enumerate() {
                chars[binding.range.start + offset] = c;
            }
        }
        Bitstring::parse(&chars.into_iter().collect::<String>())
    }

    fn check_width(&self, bits: &Bitstring) -> Result<(), HaiquError> {
        if bits.width() != self.width {
            return Err(HaiquError::WidthMismatch { expected: self.width, found: bits.width() });
        }
        Ok(())
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoder ({} bits):", self.width)?;
        for binding in &self.bindings {
            writeln!(f, "  {} -> {} ({} entries)", binding.range, binding.bank.role(), binding.bank.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(role: &str) -> WordBank {
        let entries: Vec<String> = (0..8).map(|i| format!("{}-{}", role, i)).collect();
        WordBank::new(role, entries).unwrap()
    }

    fn three_field(order: BitOrder) -> Decoder {
        Decoder::uniform(order, vec![bank("a"), bank("b"), bank("c")]).unwrap()
    }

    #[test]
    fn test_high_to_low_indices() -> Result<(), HaiquError> {
        let decoder = three_field(BitOrder::HighToLow);
        let bits = Bitstring::parse("000011010")?;
        assert_eq!(decoder.indices(&bits)?, vec![0, 3, 2]);
        let artifact = decoder.decode(&bits)?;
        assert_eq!(artifact.values(), vec!["a-0", "b-3", "c-2"]);
        Ok(())
    }

    #[test]
    fn test_low_to_high_indices() -> Result<(), HaiquError> {
        let decoder = three_field(BitOrder::LowToHigh);
        let bits = Bitstring::parse("000011010")?;
        assert_eq!(decoder.indices(&bits)?, vec![2, 3, 0]);
        Ok(())
    }

    #[test]
    fn test_decode_is_deterministic() -> Result<(), HaiquError> {
        let decoder = three_field(BitOrder::HighToLow);
        let bits = Bitstring::parse("101110001")?;
        assert_eq!(decoder.decode(&bits)?, decoder.decode(&bits)?);
        Ok(())
    }

    #[test]
    fn test_encode_inverts_indices() -> Result<(), HaiquError> {
        for order in [BitOrder::HighToLow, BitOrder::LowToHigh] {
            let decoder = three_field(order);
            let bits = decoder.encode(&[5, 0, 7])?;
            assert_eq!(decoder.indices(&bits)?, vec![5, 0, 7]);
        }
        assert!(three_field(BitOrder::HighToLow).encode(&[8, 0, 0]).is_err());
        assert!(three_field(BitOrder::HighToLow).encode(&[1, 0]).is_err());
        Ok(())
    }

    #[test]
    fn test_width_mismatch() {
        let decoder = three_field(BitOrder::HighToLow);
        let bits = Bitstring::parse("0101").unwrap();
        assert_eq!(decoder.decode(&bits), Err(HaiquError::WidthMismatch { expected: 9, found: 4 }));
    }

    #[test]
    fn test_bank_size_must_match_range() {
        let bindings = vec![
            FieldBinding::new(BitRange::new(0, 2), bank("a")),
            FieldBinding::new(BitRange::new(2, 3), bank("b")),
        ];
        assert!(matches!(Decoder::new(5, bindings), Err(HaiquError::InvalidBinding { .. })));
    }

    #[test]
    fn test_word_bank_sizes() {
        assert!(WordBank::from_static("x", &["a", "b", "c"]).is_err());
        assert!(WordBank::from_static("x", &["a"]).is_err());
        let bank = WordBank::from_static("x", &["a", "b", "c", "d"]).unwrap();
        assert_eq!(bank.index_bits(), 2);
        assert!(matches!(bank.get(4), Err(HaiquError::IndexOutOfRange { index: 4, len: 4, .. })));
    }
}
