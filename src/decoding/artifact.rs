// src/decoding/artifact.rs
use crate::core::Bitstring;
use std::fmt;

/// One decoded field: which bank entry was selected and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    role: String,
    index: usize,
    value: String,
}

impl DecodedField {
    pub(crate) fn new(role: &str, index: usize, value: &str) -> Self {
        Self { role: role.to_string(), index, value: value.to_string() }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Index into the field's word bank.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The structured result of decoding one bitstring: one value per field,
/// in the decoder's field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArtifact {
    key: Bitstring,
    fields: Vec<DecodedField>,
}

impl DecodedArtifact {
    pub(crate) fn new(key: Bitstring, fields: Vec<DecodedField>) -> Self {
        Self { key, fields }
    }

    /// The bitstring this artifact was decoded from.
    pub fn key(&self) -> &Bitstring {
        &self.key
    }

    pub fn fields(&self) -> &[DecodedField] {
        &self.fields
    }

    /// Field values in order.
    pub fn values(&self) -> Vec<&str> {
        self.fields.iter().map(DecodedField::value).collect()
    }

    /// Field value for `role`, if the decoder has such a field.
    pub fn field(&self, role: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.role == role).map(DecodedField::value)
    }
}

impl fmt::Display for DecodedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", field.value)?;
        }
        Ok(())
    }
}
