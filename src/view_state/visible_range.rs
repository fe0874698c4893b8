//! Window calculation result

use std::ops::Range;

/// Contiguous slice of the filtered sequence that must be rendered.
///
/// Indices are positions in the filtered sequence, not in the store.
///
/// # Invariants
/// - `start <= end <= count` for the count it was computed from
/// - `top_offset == start * item_height`
/// - `total_height == count * item_height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRange {
    /// Position of the first rendered record (inclusive).
    pub start: usize,
    /// Position after the last rendered record (exclusive).
    pub end: usize,
    /// Space reserved above the rendered slice.
    pub top_offset: f64,
    /// Height of the full, unrendered list. Drives the scrollbar.
    pub total_height: f64,
}

impl WindowRange {
    /// The empty window at the top of an empty list.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        top_offset: 0.0,
        total_height: 0.0,
    };

    /// Number of rendered records.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over rendered positions.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a specific position is rendered.
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}

impl Default for WindowRange {
    fn default() -> Self {
        Self::EMPTY
    }
}
