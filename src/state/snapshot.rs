//! Read-only projection of the state for rendering.

use crate::model::Record;
use crate::view_state::{SelectionState, WindowRange};

/// One record inside the rendered window.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleItem<'a> {
    /// Position in the filtered sequence.
    pub position: usize,
    /// Top edge, in the same unit as the item height.
    pub top: f64,
    /// The record itself.
    pub record: &'a Record,
    /// Whether the record is expanded.
    pub expanded: bool,
    /// Whether the record has keyboard focus.
    pub focused: bool,
}

/// Everything a renderer needs for one frame.
///
/// Derived from a consistent state: the items are exactly the window's slice
/// of the current filtered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSnapshot<'a> {
    /// Records inside the window, in filtered order.
    pub items: Vec<VisibleItem<'a>>,
    /// Window the items were cut from.
    pub window: WindowRange,
    /// Expansion state for the frame.
    pub selection: &'a SelectionState,
    /// Length of the filtered sequence.
    pub matched: usize,
    /// Size of the whole store.
    pub total: usize,
}

impl TimelineSnapshot<'_> {
    /// True when no record matches. Renderers show an empty-state message.
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    /// "Showing X of Y records".
    pub fn summary(&self) -> String {
        format!("Showing {} of {} records", self.matched, self.total)
    }
}
