//! Record identifier newtype with a smart constructor.
//!
//! Identifiers validate non-empty strings at construction time.
//! The raw constructor is never exported - use `RecordId::new`.

use std::fmt;

/// Unique identifier for a record within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Smart constructor: validates non-empty identifier.
    ///
    /// Whitespace-only identifiers are rejected as well, since they cannot
    /// be told apart in any rendering of the catalogue.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRecordId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(InvalidRecordId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Reasons a record id is rejected.
pub enum InvalidRecordId {
    #[error("Record ID cannot be empty")]
    /// The id was empty.
    Empty,
}

// ===== Tests =====
