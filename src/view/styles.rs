//! Timeline styling.
//!
//! Category accents come from the catalogue's optional color field.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether color output is enabled.
///
/// Disabled by the `--no-color` flag or a set `NO_COLOR` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Priority: `--no-color` flag, then `NO_COLOR`, then enabled.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// True if colors should be drawn.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

// ===== TimelineStyles =====

/// Accent used when a record has no (valid) color.
pub const DEFAULT_ACCENT: Color = Color::Rgb(0x3b, 0x82, 0xf6);

/// Styles for every element the view draws.
#[derive(Debug, Clone, Copy)]
pub struct TimelineStyles {
    colors: ColorConfig,
}

impl TimelineStyles {
    /// Styles honoring the color preference.
    pub fn new(colors: ColorConfig) -> Self {
        Self { colors }
    }

    fn fg(self, color: Color) -> Style {
        if self.colors.colors_enabled() {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Accent for a record, from its `#rrggbb` color if present.
    pub fn accent(self, color: Option<&str>) -> Style {
        self.fg(color.and_then(parse_hex_color).unwrap_or(DEFAULT_ACCENT))
    }

    /// Record title, reversed when focused.
    pub fn title(self, focused: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Date column.
    pub fn date(self) -> Style {
        self.fg(Color::Gray)
    }

    /// De-emphasized text.
    pub fn muted(self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Tag chips.
    pub fn tag(self) -> Style {
        self.fg(Color::Cyan)
    }

    /// Label of the field being edited.
    pub fn active_field(self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Block cursor in a text field.
    pub fn cursor(self) -> Style {
        Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted picker row.
    pub fn picker_cursor(self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

impl Default for TimelineStyles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

/// Parse `#rrggbb` (or `rrggbb`). Anything else is `None`.
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex_color("#f59e0b"), Some(Color::Rgb(0xf5, 0x9e, 0x0b)));
        assert_eq!(parse_hex_color("10b981"), Some(Color::Rgb(0x10, 0xb9, 0x81)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("rgb(1,2,3)"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn accent_falls_back_to_default() {
        let styles = TimelineStyles::default();
        assert_eq!(styles.accent(None).fg, Some(DEFAULT_ACCENT));
        assert_eq!(styles.accent(Some("nope")).fg, Some(DEFAULT_ACCENT));
    }

    #[test]
    fn disabled_colors_drop_foreground() {
        let styles = TimelineStyles::new(ColorConfig::disabled());
        assert_eq!(styles.accent(Some("#ff0000")).fg, None);
        assert_eq!(styles.date().fg, None);
    }
}
