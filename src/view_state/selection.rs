//! Globally exclusive record expansion.

use crate::model::RecordId;

/// Which record, if any, is shown expanded.
///
/// Sum type: exactly one state at a time, so at most one record is expanded.
/// The state is keyed by identifier and never consults the filtered list or
/// the window. An expanded record that is filtered out or scrolled away stays
/// expanded and shows as such when it becomes visible again.
///
/// # State Transitions
///
/// - `Collapsed` → `Expanded(id)` on `toggle(id)`
/// - `Expanded(id)` → `Collapsed` on `toggle(id)` or `collapse()`
/// - `Expanded(a)` → `Expanded(b)` on `toggle(b)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing expanded.
    #[default]
    Collapsed,
    /// Exactly this record expanded.
    Expanded(RecordId),
}

impl SelectionState {
    /// Pure transition: the state after toggling `id`.
    pub fn toggled(self, id: &RecordId) -> Self {
        match self {
            Self::Expanded(current) if &current == id => Self::Collapsed,
            _ => Self::Expanded(id.clone()),
        }
    }

    /// Toggle `id` in place and return the new state.
    pub fn toggle(&mut self, id: &RecordId) -> &Self {
        *self = std::mem::take(self).toggled(id);
        self
    }

    /// Collapse whatever is expanded.
    pub fn collapse(&mut self) {
        *self = Self::Collapsed;
    }

    /// Id of the expanded record.
    pub fn expanded(&self) -> Option<&RecordId> {
        match self {
            Self::Collapsed => None,
            Self::Expanded(id) => Some(id),
        }
    }

    /// True if `id` is the expanded record.
    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded() == Some(id)
    }
}
