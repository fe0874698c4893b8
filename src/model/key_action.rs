//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the timeline up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the timeline down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first record. Default: g/Home
    ScrollToTop,
    /// Jump to the last record. Default: G/End
    ScrollToBottom,

    // Record navigation
    /// Move keyboard focus to the next record. Default: Ctrl+j/Tab
    NextEntry,
    /// Move keyboard focus to the previous record. Default: Ctrl+k/Shift+Tab
    PrevEntry,
    /// Expand the focused record, collapsing any other. Default: Enter/Space
    ToggleExpand,
    /// Collapse whatever record is expanded. Default: c
    Collapse,

    // Filters
    /// Activate the search input. Default: //Ctrl+f
    StartSearch,
    /// Open or close the category picker. Default: m
    ToggleCategoryPicker,
    /// Select every category. Default: a
    SelectAllCategories,
    /// Clear the category selection (matches everything). Default: x
    ClearCategories,
    /// Edit the inclusive start date. Default: [
    EditDateStart,
    /// Edit the inclusive end date. Default: ]
    EditDateEnd,
    /// Remove both date bounds. Default: D
    ClearDates,

    // Application
    /// Quit. Default: q/Ctrl+c
    Quit,
}
