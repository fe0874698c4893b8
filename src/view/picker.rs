//! Category picker popup (multi-select).

use super::styles::TimelineStyles;
use crate::filter::FilterCriteria;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::collections::BTreeSet;

/// Rows above the option list inside the popup (border + hint line).
pub const PICKER_HEADER_ROWS: u16 = 2;

/// Popup listing every category with a checkbox.
pub struct CategoryPickerPopup<'a> {
    options: &'a BTreeSet<String>,
    criteria: &'a FilterCriteria,
    cursor: usize,
    styles: TimelineStyles,
}

impl<'a> CategoryPickerPopup<'a> {
    /// Popup listing `options`, with `cursor` highlighted.
    pub fn new(
        options: &'a BTreeSet<String>,
        criteria: &'a FilterCriteria,
        cursor: usize,
        styles: TimelineStyles,
    ) -> Self {
        Self {
            options,
            criteria,
            cursor,
            styles,
        }
    }

    /// Height needed to show every option: borders, hint line, options.
    pub fn desired_height(option_count: usize) -> u16 {
        let rows = u16::try_from(option_count).unwrap_or(u16::MAX);
        rows.saturating_add(PICKER_HEADER_ROWS + 1)
    }
}

/// Option under row `row` of a picker drawn at `area`, if any.
pub fn option_at(area: Rect, options: &BTreeSet<String>, column: u16, row: u16) -> Option<&String> {
    let inside = column > area.x
        && column < area.right().saturating_sub(1)
        && row >= area.y + PICKER_HEADER_ROWS
        && row < area.bottom().saturating_sub(1);
    if !inside {
        return None;
    }
    options.iter().nth(usize::from(row - area.y - PICKER_HEADER_ROWS))
}

impl Widget for CategoryPickerPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut lines = vec![Line::styled("a: select all  x: clear", self.styles.muted())];
        for (i, option) in self.options.iter().enumerate() {
            let checked = if self.criteria.is_category_selected(option) {
                "[x]"
            } else {
                "[ ]"
            };
            let line = Line::from(format!("{checked} {option}"));
            lines.push(if i == self.cursor {
                line.style(self.styles.picker_cursor())
            } else {
                line
            });
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.criteria.category_label())),
            )
            .render(area, buf);
    }
}
