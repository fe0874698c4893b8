//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod event;
pub mod input;
pub mod key_handler;
pub mod snapshot;

// Re-export for convenience
pub use app_state::{AppState, CategoryPicker};
pub use event::AppEvent;
pub use input::{InputField, InputMode};
pub use key_handler::{handle_key_action, handle_text_key, KeyOutcome};
pub use snapshot::{TimelineSnapshot, VisibleItem};
