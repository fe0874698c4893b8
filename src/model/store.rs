//! Immutable, load-time-sorted record store.

use super::identifiers::RecordId;
use super::record::Record;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Errors raised while populating a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Two records share the same identifier.
    #[error("Duplicate record identifier: {0}")]
    DuplicateId(RecordId),
}

/// The full catalogue for one session.
///
/// Records are sorted once, at construction, by ascending date. The sort is
/// stable, so records sharing a date keep their loader order. Records with an
/// unresolvable date sort after every dated record.
///
/// The store is never mutated after construction; filtering produces index
/// views into it (see [`crate::filter::FilteredView`]).
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    categories: BTreeSet<String>,
}

impl RecordStore {
    /// Build a store, enforcing identifier uniqueness and date ordering.
    pub fn new(mut records: Vec<Record>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id().clone()) {
                return Err(StoreError::DuplicateId(record.id().clone()));
            }
        }

        // None sorts before Some, so key on (is_none, date) to push undated last
        records.sort_by_key(|r| (r.date().is_none(), r.date()));

        let categories = records.iter().map(|r| r.category().to_string()).collect();

        Ok(Self {
            records,
            categories,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index` in date order.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records in date order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate records in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Distinct category keys, sorted. These are the category picker's options.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Index of the record with this identifier.
    pub fn index_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Earliest and latest resolvable dates in the store.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(Record::date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
