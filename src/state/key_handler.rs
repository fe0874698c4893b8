//! Keyboard action handling.
//!
//! Translates user intent ([`KeyAction`]) and raw text keys into
//! [`AppEvent`]s. Routing depends on the current mode:
//!
//! - Category picker open: navigation keys drive the picker; any other action
//!   closes the picker first, like a click outside a dropdown.
//! - Editing a text field: keys edit the buffer (see [`handle_text_key`]).
//! - Otherwise: navigation, expansion, and filter shortcuts.

use super::app_state::AppState;
use super::event::AppEvent;
use super::input::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, InputField,
    InputMode,
};
use crate::model::KeyAction;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::{debug, warn};

/// Rows moved per line scroll.
const LINE_SCROLL: f64 = 1.0;

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Handle a bound key action in Browse mode.
pub fn handle_key_action(state: &mut AppState, action: KeyAction) -> KeyOutcome {
    if state.picker().open {
        match action {
            KeyAction::ScrollDown | KeyAction::NextEntry => {
                state.apply_event(AppEvent::PickerNext);
                return KeyOutcome::Continue;
            }
            KeyAction::ScrollUp | KeyAction::PrevEntry => {
                state.apply_event(AppEvent::PickerPrev);
                return KeyOutcome::Continue;
            }
            KeyAction::ToggleExpand => {
                state.apply_event(AppEvent::PickerToggle);
                return KeyOutcome::Continue;
            }
            KeyAction::ToggleCategoryPicker | KeyAction::Collapse => {
                state.apply_event(AppEvent::CloseCategoryPicker);
                return KeyOutcome::Continue;
            }
            _ => {
                state.apply_event(AppEvent::CloseCategoryPicker);
            }
        }
    }

    let event = match action {
        KeyAction::ScrollUp => AppEvent::ScrollBy(-LINE_SCROLL),
        KeyAction::ScrollDown => AppEvent::ScrollBy(LINE_SCROLL),
        KeyAction::PageUp => AppEvent::PageUp,
        KeyAction::PageDown => AppEvent::PageDown,
        KeyAction::ScrollToTop => AppEvent::ScrollToTop,
        KeyAction::ScrollToBottom => AppEvent::ScrollToBottom,
        KeyAction::NextEntry => AppEvent::FocusNext,
        KeyAction::PrevEntry => AppEvent::FocusPrev,
        KeyAction::ToggleExpand => AppEvent::ToggleFocusedExpand,
        KeyAction::Collapse => AppEvent::Collapse,
        KeyAction::ToggleCategoryPicker => AppEvent::OpenCategoryPicker,
        KeyAction::SelectAllCategories => AppEvent::SelectAllCategories,
        KeyAction::ClearCategories => AppEvent::ClearCategories,
        KeyAction::StartSearch => {
            // A search still waiting out its delay is newer than the applied one
            let current = state
                .pending_search()
                .unwrap_or(state.criteria().search_text.as_str())
                .to_string();
            state.input = InputMode::editing(InputField::Search, current);
            return KeyOutcome::Continue;
        }
        KeyAction::EditDateStart => {
            let current = format_date(state.criteria().date_start);
            state.input = InputMode::editing(InputField::DateStart, current);
            return KeyOutcome::Continue;
        }
        KeyAction::EditDateEnd => {
            let current = format_date(state.criteria().date_end);
            state.input = InputMode::editing(InputField::DateEnd, current);
            return KeyOutcome::Continue;
        }
        KeyAction::ClearDates => {
            state.apply_event(AppEvent::SetDateStart(None));
            state.apply_event(AppEvent::SetDateEnd(None));
            return KeyOutcome::Continue;
        }
        KeyAction::Quit => return KeyOutcome::Quit,
    };

    state.apply_event(event);
    KeyOutcome::Continue
}

/// Handle a raw key while a text field is being edited.
///
/// Search edits are forwarded to the debouncer as they happen; date edits
/// are applied only on Enter, and only if they parse. Ctrl+C always quits.
pub fn handle_text_key(state: &mut AppState, key: KeyEvent, now: Instant) -> KeyOutcome {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }

    let Some(field) = state.input.field() else {
        return KeyOutcome::Continue;
    };
    let input = std::mem::take(&mut state.input);

    match key.code {
        KeyCode::Char(ch) => {
            state.input = handle_char_input(input, ch);
            emit_search(state, field, now);
        }
        KeyCode::Backspace => {
            state.input = handle_backspace(input);
            emit_search(state, field, now);
        }
        KeyCode::Left => state.input = handle_cursor_left(input),
        KeyCode::Right => state.input = handle_cursor_right(input),
        KeyCode::Enter => submit(state, field, input),
        KeyCode::Esc => {
            // Leaving the search box keeps the pending search; date edits are discarded
            debug!(?field, "Input cancelled");
            state.input = InputMode::Browse;
        }
        _ => state.input = input,
    }

    KeyOutcome::Continue
}

fn emit_search(state: &mut AppState, field: InputField, now: Instant) {
    if field != InputField::Search {
        return;
    }
    if let Some(text) = state.input.text() {
        let text = text.to_string();
        state.apply_event(AppEvent::SearchInput { text, now });
    }
}

fn submit(state: &mut AppState, field: InputField, input: InputMode) {
    let text = input.text().unwrap_or_default().trim().to_string();
    match field {
        InputField::Search => {
            state.apply_event(AppEvent::SearchCommit);
            state.input = InputMode::Browse;
        }
        InputField::DateStart | InputField::DateEnd => match parse_date_input(&text) {
            Ok(date) => {
                let event = if field == InputField::DateStart {
                    AppEvent::SetDateStart(date)
                } else {
                    AppEvent::SetDateEnd(date)
                };
                state.apply_event(event);
                state.input = InputMode::Browse;
            }
            Err(e) => {
                warn!(input = %text, error = %e, "Rejected date input");
                state.input = input;
            }
        },
    }
}

/// Parse a date field. Empty input clears the bound.
pub fn parse_date_input(text: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map(Some)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
