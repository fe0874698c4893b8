//! Catalogue record type.

use super::identifiers::RecordId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// One catalogued release entry.
///
/// The raw timestamp string is kept alongside its parsed date. A record whose
/// timestamp cannot be resolved to a calendar date is still a valid record: it
/// is only excluded from date-bounded filter results.
///
/// # Invariants
/// - `folded_name` is always `display_name.to_lowercase()`
/// - `date` is always `parse_record_date(&timestamp)`
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    display_name: String,
    folded_name: String,
    category: String,
    category_name: Option<String>,
    color: Option<String>,
    timestamp: String,
    date: Option<NaiveDate>,
    description: String,
    tags: Vec<String>,
}

impl Record {
    /// Create a record with the required fields. Optional fields start empty.
    pub fn new(
        id: RecordId,
        display_name: impl Into<String>,
        category: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        let timestamp = timestamp.into();
        Self {
            id,
            folded_name: display_name.to_lowercase(),
            display_name,
            category: category.into(),
            category_name: None,
            color: None,
            date: parse_record_date(&timestamp),
            timestamp,
            description: String::new(),
            tags: Vec::new(),
        }
    }

    /// Set the long description shown when expanded.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags shown when expanded.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Human-readable category label (falls back to the category key).
    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Set the `#rrggbb` accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Unique id.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Name shown on the timeline.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lower-cased display name, computed once for case-insensitive search.
    pub fn folded_name(&self) -> &str {
        &self.folded_name
    }

    /// Category key used for filtering.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Label shown for the category.
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(&self.category)
    }

    /// Accent color as supplied, unvalidated.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Timestamp exactly as supplied by the loader.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Parsed calendar date, or `None` if the timestamp is unresolvable.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Long description, empty if none.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tags, in catalogue order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Resolve an ISO-8601 timestamp to a calendar date.
///
/// Accepts a plain date (`2021-06-15`), an RFC 3339 date-time (the offset is
/// discarded, the local calendar date is kept), or a naive date-time without
/// offset. Anything else yields `None`.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
