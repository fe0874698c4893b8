//! Events accepted by the state container.

use crate::model::RecordId;
use chrono::NaiveDate;
use std::time::Instant;

/// Everything that can change [`super::AppState`].
///
/// Events carry the instant they happened at when timing matters (debounced
/// search); everything else is instantaneous.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // Filters
    /// Search text changed. Applied after the debounce quiet period.
    SearchInput {
        /// Full text of the search field.
        text: String,
        /// When the keystroke happened.
        now: Instant,
    },
    /// Apply any pending search text immediately.
    SearchCommit,
    /// Timer tick from the event loop. Fires a due debounced search.
    Tick(Instant),
    /// Add or remove a category from the selection.
    ToggleCategory(String),
    /// Select every category known to the store.
    SelectAllCategories,
    /// Empty the category selection (matches everything).
    ClearCategories,
    /// Set or clear the inclusive start date.
    SetDateStart(Option<NaiveDate>),
    /// Set or clear the inclusive end date.
    SetDateEnd(Option<NaiveDate>),

    // Viewport
    /// Scroll by a signed delta, in the viewport's unit (rows or pixels).
    ScrollBy(f64),
    /// Scroll to an absolute offset.
    ScrollTo(f64),
    /// Scroll up one viewport.
    PageUp,
    /// Scroll down one viewport.
    PageDown,
    /// Jump to the first record.
    ScrollToTop,
    /// Jump to the last record.
    ScrollToBottom,
    /// Viewport height changed.
    Resize {
        /// New visible height.
        viewport_height: f64,
    },

    // Selection and focus
    /// Toggle expansion of a specific record.
    ToggleExpand(RecordId),
    /// Toggle expansion of the focused record (or the first visible one).
    ToggleFocusedExpand,
    /// Collapse whatever is expanded.
    Collapse,
    /// Move keyboard focus to the next record.
    FocusNext,
    /// Move keyboard focus to the previous record.
    FocusPrev,

    // Category picker
    /// Open the category picker.
    OpenCategoryPicker,
    /// Close the picker. Also sent for any click outside it.
    CloseCategoryPicker,
    /// Move the picker cursor down.
    PickerNext,
    /// Move the picker cursor up.
    PickerPrev,
    /// Toggle the category under the picker cursor.
    PickerToggle,

    /// The owning view is going away. Cancels pending timers; every later
    /// event is ignored.
    Teardown,
}
