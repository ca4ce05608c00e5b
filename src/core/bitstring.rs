// src/core/bitstring.rs

use super::error::HaiquError;
use std::fmt;
use std::str::FromStr;

/// One measured outcome of a multi-qubit readout, e.g. `"011"`.
///
/// Character 0 is the leftmost (most significant) bit. Ordering is lexical,
/// which for equal-width bitstrings coincides with numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bitstring(String);

impl Bitstring {
    /// Parses a string of `'0'`/`'1'` characters.
    pub fn parse(input: &str) -> Result<Self, HaiquError> {
        if input.is_empty() || !input.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(HaiquError::InvalidBitstring { input: input.to_string() });
        }
        Ok(Self(input.to_string()))
    }

    /// Renders `value` as a zero-padded bitstring of `width` bits.
    pub fn from_index(value: usize, width: usize) -> Result<Self, HaiquError> {
        if width == 0 {
            return Err(HaiquError::InvalidBitstring { input: String::new() });
        }
        if width < usize::BITS as usize && value >> width != 0 {
            return Err(HaiquError::IndexOutOfRange {
                index: value,
                len: 1 << width,
                context: format!("{}-bit bitstring", width),
            });
        }
        Ok(Self(format!("{:0width$b}", value, width = width)))
    }

    /// Number of bits.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates bits from the leftmost character.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Number of `'1'` characters (Hamming weight).
    pub fn count_ones(&self) -> usize {
        self.bits().filter(|b| *b).count()
    }

    /// Reads `range` as an unsigned binary integer, leftmost character most significant.
    pub fn slice_value(&self, range: BitRange) -> Result<usize, HaiquError> {
        if range.end() > self.width() {
            return Err(HaiquError::WidthMismatch { expected: range.end(), found: self.width() });
        }
        if range.width >= usize::BITS as usize {
            return Err(HaiquError::InvalidBinding {
                message: format!("bit range {} is too wide to index into a word bank", range),
            });
        }
        Ok(self.0.as_bytes()[range.start..range.end()]
            .iter()
            .fold(0usize, |acc, b| (acc << 1) | usize::from(*b == b'1')))
    }

    /// The whole bitstring as an integer.
    pub fn to_index(&self) -> Result<usize, HaiquError> {
        self.slice_value(BitRange::new(0, self.width()))
    }
}

impl FromStr for Bitstring {
    type Err = HaiquError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bitstring::parse(s)
    }
}

impl AsRef<str> for Bitstring {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous run of bit positions `start..start + width` within a bitstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitRange {
    /// First character position (0 = leftmost).
    pub start: usize,
    /// Number of bits in the range.
    pub width: usize,
}

impl BitRange {
    pub fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    /// One past the last position covered, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.width)
    }

    /// `true` if the two ranges share at least one position.
    pub fn overlaps(&self, other: &BitRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_binary() {
        assert!(Bitstring::parse("0102").is_err());
        assert!(Bitstring::parse("").is_err());
        assert!(Bitstring::parse(" 01").is_err());
        assert_eq!(Bitstring::parse("0110").map(|b| b.width()), Ok(4));
    }

    #[test]
    fn test_slice_value_reads_high_bits_first() -> Result<(), HaiquError> {
        let b = Bitstring::parse("000011010")?;
        assert_eq!(b.slice_value(BitRange::new(0, 3))?, 0);
        assert_eq!(b.slice_value(BitRange::new(3, 3))?, 3);
        assert_eq!(b.slice_value(BitRange::new(6, 3))?, 2);
        assert_eq!(b.to_index()?, 26);
        Ok(())
    }

    #[test]
    fn test_slice_past_end_is_width_mismatch() {
        let b = Bitstring::parse("101").unwrap();
        assert_eq!(
            b.slice_value(BitRange::new(2, 2)),
            Err(HaiquError::WidthMismatch { expected: 4, found: 3 })
        );
    }

    #[test]
    fn test_slice_at_usize_limit_is_width_mismatch() {
        let b = Bitstring::parse("101").unwrap();
        assert_eq!(
            b.slice_value(BitRange::new(usize::MAX, 1)),
            Err(HaiquError::WidthMismatch { expected: usize::MAX, found: 3 })
        );
        assert_eq!(BitRange::new(usize::MAX, 2).end(), usize::MAX);
    }

    #[test]
    fn test_from_index_pads_and_bounds() {
        assert_eq!(Bitstring::from_index(5, 4).unwrap().as_str(), "0101");
        assert!(Bitstring::from_index(8, 3).is_err());
        assert!(Bitstring::from_index(0, 0).is_err());
    }

    #[test]
    fn test_overlap() {
        assert!(BitRange::new(0, 3).overlaps(&BitRange::new(2, 3)));
        assert!(!BitRange::new(0, 3).overlaps(&BitRange::new(3, 3)));
    }

    #[test]
    fn test_count_ones() {
        assert_eq!(Bitstring::parse("10110").unwrap().count_ones(), 3);
    }
}
