//! Error handling logic

use std::fmt;

/// Error types raised when static experiment data or decoder wiring breaks
/// one of the construction-time contracts.
///
/// Sampling itself never fails on a valid table: numerical edge cases are
/// handled with a defined fallback instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum HaiquError {
    /// A distribution table violates its invariants (empty, mixed key
    /// lengths, duplicate keys, zero total).
    MalformedTable {
        /// Label of the offending table, if it has one
        table: Option<String>,
        /// MalformedTable failure message
        message: String,
    },

    /// A string could not be read as a bitstring (non `0`/`1` characters or empty).
    InvalidBitstring {
        /// The rejected input
        input: String,
    },

    /// A bitstring length does not match the width a table or decoder expects.
    WidthMismatch {
        /// Expected bitstring length
        expected: usize,
        /// Actual bitstring length
        found: usize,
    },

    /// Decoder field bindings overlap, leave gaps, or disagree with their word bank size.
    InvalidBinding {
        /// InvalidBinding failure message
        message: String,
    },

    /// An index addressed past the end of a word bank or matrix.
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of addressable entries
        len: usize,
        /// Where the lookup happened
        context: String,
    },

    /// A correlation matrix is empty or not square.
    InvalidMatrix {
        /// InvalidMatrix failure message
        message: String,
    },

    /// JSON input could not be turned into experiment counts.
    Ingestion {
        /// Ingestion failure message
        message: String,
    },
}

impl HaiquError {
    pub(crate) fn malformed(table: Option<&str>, message: impl Into<String>) -> Self {
        HaiquError::MalformedTable { table: table.map(str::to_string), message: message.into() }
    }
}

impl fmt::Display for HaiquError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaiquError::MalformedTable { table: Some(label), message } => write!(f, "Malformed Table '{}': {}", label, message),
            HaiquError::MalformedTable { table: None, message } => write!(f, "Malformed Table: {}", message),
            HaiquError::InvalidBitstring { input } => write!(f, "Invalid Bitstring: {:?} is not a non-empty string of 0/1", input),
            HaiquError::WidthMismatch { expected, found } => write!(f, "Width Mismatch: expected {} bits, found {}", expected, found),
            HaiquError::InvalidBinding { message } => write!(f, "Invalid Binding: {}", message),
            HaiquError::IndexOutOfRange { index, len, context } => write!(f, "Index Out Of Range ({}): index {} but only {} entries", context, index, len),
            HaiquError::InvalidMatrix { message } => write!(f, "Invalid Matrix: {}", message),
            HaiquError::Ingestion { message } => write!(f, "Ingestion Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for HaiquError {}

impl From<serde_json::Error> for HaiquError {
    fn from(err: serde_json::Error) -> Self {
        HaiquError::Ingestion { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_table_label() {
        let err = HaiquError::malformed(Some("DIST_Z"), "no entries");
        assert_eq!(err.to_string(), "Malformed Table 'DIST_Z': no entries");
        let err = HaiquError::malformed(None, "no entries");
        assert_eq!(err.to_string(), "Malformed Table: no entries");
    }

    #[test]
    fn test_json_errors_become_ingestion_errors() {
        let err: HaiquError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, HaiquError::Ingestion { .. }));
    }
}
