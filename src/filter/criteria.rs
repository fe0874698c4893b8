//! Filter criteria value type.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Current combination of search text, category set, and date bounds.
///
/// The default value matches every record:
/// - empty `search_text` imposes no constraint
/// - empty `selected_categories` matches all categories
/// - absent date bounds are open-ended
///
/// Both date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against display names.
    pub search_text: String,
    /// Category keys to keep. Empty means every category.
    pub selected_categories: BTreeSet<String>,
    /// Inclusive lower date bound.
    pub date_start: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_end: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Replace the selected categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set both date bounds; `None` leaves a side open.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
    }

    /// Select every category in `options`.
    pub fn select_all_categories<'a, I>(&mut self, options: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.selected_categories = options.into_iter().cloned().collect();
    }

    /// Deselect every category, which matches all records.
    pub fn clear_categories(&mut self) {
        self.selected_categories.clear();
    }

    /// True if `category` is currently selected.
    pub fn is_category_selected(&self, category: &str) -> bool {
        self.selected_categories.contains(category)
    }

    /// True if at least one date bound is set.
    pub fn has_date_bounds(&self) -> bool {
        self.date_start.is_some() || self.date_end.is_some()
    }

    /// True if both bounds are set and the start lies after the end.
    /// No record can satisfy such a range.
    pub fn is_inverted_range(&self) -> bool {
        matches!((self.date_start, self.date_end), (Some(start), Some(end)) if start > end)
    }

    /// True if these criteria match every record.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.selected_categories.is_empty() && !self.has_date_bounds()
    }

    /// Label for the category picker button.
    ///
    /// "All Categories" when nothing is selected, the category itself when
    /// exactly one is, otherwise "N Selected".
    pub fn category_label(&self) -> String {
        match self.selected_categories.len() {
            0 => "All Categories".to_string(),
            1 => self
                .selected_categories
                .iter()
                .next()
                .cloned()
                .unwrap_or_default(),
            n => format!("{} Selected", n),
        }
    }
}
