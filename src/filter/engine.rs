//! Filter execution.
//!
//! Pure functions: `(records, criteria) → filtered sequence`. Inputs are never
//! mutated and the relative order of the store is always preserved.

use super::criteria::FilterCriteria;
use crate::model::{Record, RecordId, RecordStore};
use tracing::debug;

// ===== Predicates =====

/// Case-insensitive substring match on the display name.
/// Empty search text matches everything.
pub fn matches_search(record: &Record, criteria: &FilterCriteria) -> bool {
    criteria.search_text.is_empty()
        || record
            .folded_name()
            .contains(&criteria.search_text.to_lowercase())
}

/// Category membership. An empty selection matches every category.
pub fn matches_category(record: &Record, criteria: &FilterCriteria) -> bool {
    criteria.selected_categories.is_empty()
        || criteria.selected_categories.contains(record.category())
}

/// Inclusive date-range match.
///
/// With no bounds set every record matches, including undated ones. With any
/// bound set, a record whose date could not be resolved never matches, and an
/// inverted range (start after end) matches nothing.
pub fn matches_date_range(record: &Record, criteria: &FilterCriteria) -> bool {
    if !criteria.has_date_bounds() {
        return true;
    }
    if criteria.is_inverted_range() {
        return false;
    }
    let Some(date) = record.date() else {
        return false;
    };
    criteria.date_start.is_none_or(|start| date >= start)
        && criteria.date_end.is_none_or(|end| date <= end)
}

// ===== Matcher =====

/// Criteria prepared for repeated evaluation.
///
/// Folds the search text once instead of once per record.
struct Matcher<'c> {
    criteria: &'c FilterCriteria,
    folded_search: String,
    inverted: bool,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            folded_search: criteria.search_text.to_lowercase(),
            inverted: criteria.is_inverted_range(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        (self.folded_search.is_empty() || record.folded_name().contains(&self.folded_search))
            && matches_category(record, self.criteria)
            && matches_date_range(record, self.criteria)
    }
}

// ===== FilteredView =====

/// Result of filtering a store: positions into the store, in store order.
///
/// A view is derived, never edited. Applying new criteria produces a new view.
///
/// # Invariants
/// - `indices` is strictly increasing
/// - every index is `< store.len()` for the store it was built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// View that contains every record of a store of `len` records.
    pub fn all(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store indices of the matching records.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Record at `position` in the filtered sequence.
    pub fn get<'s>(&self, position: usize, store: &'s RecordStore) -> Option<&'s Record> {
        self.indices.get(position).and_then(|&i| store.get(i))
    }

    /// Iterate matching records in store order.
    pub fn records<'s>(&'s self, store: &'s RecordStore) -> impl Iterator<Item = &'s Record> + 's {
        self.indices.iter().filter_map(move |&i| store.get(i))
    }

    /// Position of a record within the filtered sequence.
    pub fn position_of(&self, id: &RecordId, store: &RecordStore) -> Option<usize> {
        self.records(store).position(|r| r.id() == id)
    }
}

// ===== Execution =====

/// Filter a store, returning positions of matching records.
///
/// O(n) in the number of records; the search text is folded once per call.
pub fn apply_filter(store: &RecordStore, criteria: &FilterCriteria) -> FilteredView {
    if criteria.is_unconstrained() {
        return FilteredView::all(store.len());
    }

    let matcher = Matcher::new(criteria);
    if matcher.inverted {
        debug!(
            start = ?criteria.date_start,
            end = ?criteria.date_end,
            "Inverted date range, filter yields no records"
        );
        return FilteredView::default();
    }

    let indices = store
        .iter()
        .enumerate()
        .filter(|(_, record)| matcher.matches(record))
        .map(|(i, _)| i)
        .collect();

    FilteredView { indices }
}

/// Filter any sequence of records, preserving its order.
///
/// Operates on borrowed records so the output can be filtered again, e.g.
/// `filter_records(filter_records(&all, &c), &c)`.
pub fn filter_records<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let matcher = Matcher::new(criteria);
    if matcher.inverted {
        return Vec::new();
    }
    records.into_iter().filter(|r| matcher.matches(r)).collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
