//! Layout dimension constants for TUI rendering.

/// Height of the filter bar in lines (border + content).
pub const FILTER_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the detail pane shown while a record is expanded (border included).
pub const DETAIL_PANE_HEIGHT: u16 = 8;

/// Width of the category picker popup, border included.
pub const PICKER_WIDTH: u16 = 32;

/// Horizontal offset of the picker popup from the left edge of the filter bar.
pub const PICKER_X_OFFSET: u16 = 2;

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_ROWS: f64 = 3.0;

/// Shown in place of the timeline when nothing matches.
pub const EMPTY_MESSAGE: &str = "No records match the current filters.";

/// Upper bound on how long the event loop sleeps with nothing pending.
pub const IDLE_POLL_MS: u64 = 250;
