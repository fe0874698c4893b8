//! Filter engine (pure).
//!
//! Composes search, category, and date predicates into one deterministic
//! subset of the record store.

pub mod criteria;
pub mod engine;

pub use criteria::FilterCriteria;
pub use engine::{
    apply_filter, filter_records, matches_category, matches_date_range, matches_search,
    FilteredView,
};
