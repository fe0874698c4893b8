//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides vim-style defaults alongside arrow/page keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    /// Every key bound to `action`.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        const NONE: KeyModifiers = KeyModifiers::NONE;
        const CTRL: KeyModifiers = KeyModifiers::CONTROL;
        const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

        let defaults = [
            // Scrolling
            (KeyCode::Char('j'), NONE, KeyAction::ScrollDown),
            (KeyCode::Down, NONE, KeyAction::ScrollDown),
            (KeyCode::Char('k'), NONE, KeyAction::ScrollUp),
            (KeyCode::Up, NONE, KeyAction::ScrollUp),
            (KeyCode::Char('d'), CTRL, KeyAction::PageDown),
            (KeyCode::PageDown, NONE, KeyAction::PageDown),
            (KeyCode::Char('u'), CTRL, KeyAction::PageUp),
            (KeyCode::PageUp, NONE, KeyAction::PageUp),
            (KeyCode::Char('g'), NONE, KeyAction::ScrollToTop),
            (KeyCode::Home, NONE, KeyAction::ScrollToTop),
            (KeyCode::Char('G'), SHIFT, KeyAction::ScrollToBottom),
            (KeyCode::End, NONE, KeyAction::ScrollToBottom),
            // Record navigation
            (KeyCode::Char('j'), CTRL, KeyAction::NextEntry),
            (KeyCode::Tab, NONE, KeyAction::NextEntry),
            (KeyCode::Char('k'), CTRL, KeyAction::PrevEntry),
            (KeyCode::BackTab, SHIFT, KeyAction::PrevEntry),
            (KeyCode::Enter, NONE, KeyAction::ToggleExpand),
            (KeyCode::Char(' '), NONE, KeyAction::ToggleExpand),
            (KeyCode::Char('c'), NONE, KeyAction::Collapse),
            (KeyCode::Esc, NONE, KeyAction::Collapse),
            // Filters
            (KeyCode::Char('/'), NONE, KeyAction::StartSearch),
            (KeyCode::Char('f'), CTRL, KeyAction::StartSearch),
            (KeyCode::Char('m'), NONE, KeyAction::ToggleCategoryPicker),
            (KeyCode::Char('a'), NONE, KeyAction::SelectAllCategories),
            (KeyCode::Char('x'), NONE, KeyAction::ClearCategories),
            (KeyCode::Char('['), NONE, KeyAction::EditDateStart),
            (KeyCode::Char(']'), NONE, KeyAction::EditDateEnd),
            (KeyCode::Char('D'), SHIFT, KeyAction::ClearDates),
            // Application
            (KeyCode::Char('q'), NONE, KeyAction::Quit),
            (KeyCode::Char('c'), CTRL, KeyAction::Quit),
        ];

        let bindings = defaults
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();

        Self { bindings }
    }
}
