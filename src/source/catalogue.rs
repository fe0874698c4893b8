//! JSON catalogue format.
//!
//! The catalogue is either `{"models": [...]}` or a bare array. Each entry is
//! decoded independently so an error names the offending position.

use super::LoadError;
use crate::model::{Record, RecordId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueDocument {
    Wrapped { models: Vec<Value> },
    Bare(Vec<Value>),
}

/// One catalogue entry as written on disk.
#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    #[serde(alias = "id", alias = "identifier")]
    model_name: String,

    #[serde(alias = "displayName", alias = "name")]
    display_name: String,

    #[serde(alias = "category")]
    modality: String,

    #[serde(default, alias = "category_name")]
    modality_name: Option<String>,

    #[serde(default, alias = "color")]
    modality_color: Option<String>,

    /// A missing key, `null`, or a non-string scalar yields an undated record.
    #[serde(
        default,
        alias = "timestamp",
        alias = "date",
        deserialize_with = "scalar_timestamp"
    )]
    transformers_date: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default, alias = "tags")]
    tasks: Option<Vec<String>>,
}

fn scalar_timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(raw) => Ok(raw),
        Value::Null => Ok(String::new()),
        // Kept verbatim for display; never resolves to a date
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a date string, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        _ => "a scalar",
    }
}

impl CatalogueEntry {
    fn into_record(self, index: usize) -> Result<Record, LoadError> {
        let id = RecordId::new(self.model_name).map_err(|e| LoadError::InvalidRecord {
            index,
            reason: e.to_string(),
        })?;

        let mut record = Record::new(id, self.display_name, self.modality, self.transformers_date)
            .with_description(self.description.unwrap_or_default())
            .with_tags(self.tasks.unwrap_or_default());

        if let Some(name) = self.modality_name {
            record = record.with_category_name(name);
        }
        if let Some(color) = self.modality_color {
            record = record.with_color(color);
        }

        if record.date().is_none() {
            warn!(
                id = %record.id(),
                timestamp = record.timestamp(),
                "Record has no resolvable date; it is hidden whenever a date bound is set"
            );
        }

        Ok(record)
    }
}

/// Decode catalogue JSON into records, in file order.
///
/// # Errors
///
/// - [`LoadError::Json`] if the text is not JSON, or not an object with a
///   `models` array or a bare array.
/// - [`LoadError::InvalidRecord`] for the first entry missing a required
///   field, with a wrong field type, or with an empty identifier.
pub fn parse_catalogue(json: &str) -> Result<Vec<Record>, LoadError> {
    let entries = match serde_json::from_str(json)? {
        CatalogueDocument::Wrapped { models } => models,
        CatalogueDocument::Bare(entries) => entries,
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let entry: CatalogueEntry =
                serde_json::from_value(value).map_err(|e| LoadError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })?;
            entry.into_record(index)
        })
        .collect()
}
