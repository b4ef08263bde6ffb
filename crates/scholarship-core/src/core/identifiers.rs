// crates/scholarship-core/src/core/identifiers.rs
// ============================================================================
// Module: Scholarship Form Identifiers
// Description: Validated identifiers for submissions, fields, and file slots.
// Purpose: Keep untrusted strings out of SQL column names and download lookups.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! Identifiers are validated at construction and never change afterwards.
//! A [`SubmissionId`] is 128 bits of thread-local CSPRNG output rendered as
//! upper-case hex; it doubles as the download token. A [`FieldName`] is a
//! SQL-safe identifier because each general field names a table column.
//! A [`SlotIndex`] addresses one of [`MAX_FILE_SLOTS`] attachment positions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Number of fixed file-attachment slots on every submission record.
pub const MAX_FILE_SLOTS: usize = 5;

/// Maximum length of a field or column name.
pub const MAX_FIELD_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Submission identifier is not 32 hexadecimal characters.
    #[error("invalid submission id")]
    InvalidSubmissionId,
    /// Field name is not a SQL-safe identifier.
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),
    /// Slot index is not an integer.
    #[error("invalid file slot: {0}")]
    InvalidSlot(String),
    /// Slot index is outside the fixed slot range.
    #[error("file slot {0} out of range")]
    SlotOutOfRange(i64),
}

// ============================================================================
// SECTION: Submission Identifier
// ============================================================================

/// Opaque per-submission identifier used as the row key and download token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Length of the canonical hex rendering.
    pub const LENGTH: usize = 32;

    /// Generates a fresh identifier from 128 random bits.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        let mut out = String::with_capacity(Self::LENGTH);
        for byte in bytes {
            let _ = write!(out, "{byte:02X}");
        }
        Self(out)
    }

    /// Parses an identifier supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSubmissionId`] unless the value is
    /// exactly 32 hexadecimal characters.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let trimmed = value.trim();
        if trimmed.len() != Self::LENGTH || !trimmed.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(IdentifierError::InvalidSubmissionId);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubmissionId> for String {
    fn from(value: SubmissionId) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Field Name
// ============================================================================

/// SQL-safe form field name (`[A-Za-z_][A-Za-z0-9_]*`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validates and wraps a field name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidFieldName`] when the value is empty,
    /// too long, or contains characters outside the identifier alphabet.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if !is_sql_identifier(&value) {
            return Err(IdentifierError::InvalidFieldName(value));
        }
        Ok(Self(value))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

/// Returns true when `value` is usable as an unquoted SQL identifier.
#[must_use]
pub fn is_sql_identifier(value: &str) -> bool {
    let mut bytes = value.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    value.len() <= MAX_FIELD_NAME_LENGTH
        && (first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

// ============================================================================
// SECTION: File Slot
// ============================================================================

/// Index of one of the fixed file-attachment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Builds a slot index from a zero-based position.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::SlotOutOfRange`] when `index` is not below
    /// [`MAX_FILE_SLOTS`].
    pub fn new(index: usize) -> Result<Self, IdentifierError> {
        if index >= MAX_FILE_SLOTS {
            return Err(IdentifierError::SlotOutOfRange(i64::try_from(index).unwrap_or(i64::MAX)));
        }
        u8::try_from(index)
            .map(Self)
            .map_err(|_| IdentifierError::SlotOutOfRange(i64::MAX))
    }

    /// Parses a client-supplied slot number such as the `file` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSlot`] for non-integers and
    /// [`IdentifierError::SlotOutOfRange`] for integers outside `0..5`.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let number: i64 =
            value.trim().parse().map_err(|_| IdentifierError::InvalidSlot(value.to_string()))?;
        let index = usize::try_from(number).map_err(|_| IdentifierError::SlotOutOfRange(number))?;
        Self::new(index).map_err(|_| IdentifierError::SlotOutOfRange(number))
    }

    /// Returns the zero-based position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Iterates every slot in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0 .. MAX_FILE_SLOTS).filter_map(|index| Self::new(index).ok())
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::FieldName;
    use super::IdentifierError;
    use super::SlotIndex;
    use super::SubmissionId;

    #[test]
    fn generated_ids_are_upper_hex_and_distinct() {
        let first = SubmissionId::generate();
        let second = SubmissionId::generate();
        assert_eq!(first.as_str().len(), SubmissionId::LENGTH);
        assert!(first.as_str().bytes().all(|b| b.is_ascii_digit() || (b'A' ..= b'F').contains(&b)));
        assert_ne!(first, second);
    }

    #[test]
    fn parse_normalizes_case_and_rejects_braces() {
        let id = SubmissionId::parse("0123456789abcdef0123456789ABCDEF");
        assert_eq!(id.as_ref().map(SubmissionId::as_str), Ok("0123456789ABCDEF0123456789ABCDEF"));
        assert_eq!(
            SubmissionId::parse("{01234567-89AB-CDEF-0123-456789ABCDEF}"),
            Err(IdentifierError::InvalidSubmissionId)
        );
        assert_eq!(SubmissionId::parse("' OR 1=1 --"), Err(IdentifierError::InvalidSubmissionId));
    }

    #[test]
    fn field_names_must_be_sql_identifiers() {
        assert!(FieldName::new("fname").is_ok());
        assert!(FieldName::new("_class_year2").is_ok());
        assert!(FieldName::new("2fast").is_err());
        assert!(FieldName::new("first name").is_err());
        assert!(FieldName::new("drop;table").is_err());
        assert!(FieldName::new("").is_err());
        assert!(FieldName::new("a".repeat(65)).is_err());
    }

    #[test]
    fn slot_parse_enforces_range() {
        assert_eq!(SlotIndex::parse("0").map(SlotIndex::get), Ok(0));
        assert_eq!(SlotIndex::parse("4").map(SlotIndex::get), Ok(4));
        assert_eq!(SlotIndex::parse("5"), Err(IdentifierError::SlotOutOfRange(5)));
        assert_eq!(SlotIndex::parse("-1"), Err(IdentifierError::SlotOutOfRange(-1)));
        assert!(matches!(SlotIndex::parse("two"), Err(IdentifierError::InvalidSlot(_))));
        assert_eq!(SlotIndex::all().count(), 5);
    }
}
