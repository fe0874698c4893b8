//! Text input editing (pure state transitions).
//!
//! The search box and the two date fields share one editing model: a buffer
//! and a character cursor. All functions are pure - no side effects,
//! testable without TUI.

/// Which text field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Display-name search (debounced).
    Search,
    /// Inclusive start date, `YYYY-MM-DD`.
    DateStart,
    /// Inclusive end date, `YYYY-MM-DD`.
    DateEnd,
}

/// Keyboard input mode. Sum type - exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are navigation commands.
    #[default]
    Browse,
    /// Keys edit a text field. `cursor` counts characters, not bytes.
    Editing {
        /// Field being edited.
        field: InputField,
        /// Uncommitted buffer.
        text: String,
        /// Cursor position, in characters.
        cursor: usize,
    },
}

impl InputMode {
    /// Start editing `field`, pre-filled with `initial`, cursor at the end.
    pub fn editing(field: InputField, initial: impl Into<String>) -> Self {
        let text = initial.into();
        let cursor = text.chars().count();
        Self::Editing {
            field,
            text,
            cursor,
        }
    }

    /// True while a text field has the keyboard.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Field being edited, if any.
    pub fn field(&self) -> Option<InputField> {
        match self {
            Self::Browse => None,
            Self::Editing { field, .. } => Some(*field),
        }
    }

    /// Current buffer, if editing.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Browse => None,
            Self::Editing { text, .. } => Some(text),
        }
    }
}

/// Byte index of the `cursor`-th character.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Insert a character at the cursor and advance it.
///
/// No-op in Browse mode.
pub fn handle_char_input(state: InputMode, ch: char) -> InputMode {
    match state {
        InputMode::Editing {
            field,
            mut text,
            cursor,
        } => {
            text.insert(byte_index(&text, cursor), ch);
            InputMode::Editing {
                field,
                text,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor if cursor > 0.
///
/// No-op in Browse mode.
pub fn handle_backspace(state: InputMode) -> InputMode {
    match state {
        InputMode::Editing {
            field,
            mut text,
            cursor,
        } if cursor > 0 => {
            text.remove(byte_index(&text, cursor - 1));
            InputMode::Editing {
                field,
                text,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(state: InputMode) -> InputMode {
    match state {
        InputMode::Editing {
            field,
            text,
            cursor,
        } => InputMode::Editing {
            field,
            text,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move cursor right by one position. Saturates at the end of the text.
pub fn handle_cursor_right(state: InputMode) -> InputMode {
    match state {
        InputMode::Editing {
            field,
            text,
            cursor,
        } => {
            let len = text.chars().count();
            InputMode::Editing {
                field,
                text,
                cursor: (cursor + 1).min(len),
            }
        }
        other => other,
    }
}
