//! Virtualized timeline widget.
//!
//! Draws only the items in the snapshot's window. Each item occupies exactly
//! `item_height` rows starting at `top - scroll_offset`, so the first and last
//! items may be clipped by the area edges.

use super::constants::EMPTY_MESSAGE;
use super::helpers::{single_line, truncate_to_width};
use super::styles::TimelineStyles;
use crate::model::Record;
use crate::state::{TimelineSnapshot, VisibleItem};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Human-readable date, or the raw timestamp if it did not parse.
pub fn format_record_date(record: &Record) -> String {
    match record.date() {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None if record.timestamp().trim().is_empty() => "Unknown date".to_string(),
        None => record.timestamp().to_string(),
    }
}

/// Timeline widget over a [`TimelineSnapshot`].
pub struct TimelineView<'a> {
    snapshot: &'a TimelineSnapshot<'a>,
    scroll_offset: f64,
    item_height: f64,
    styles: TimelineStyles,
}

impl<'a> TimelineView<'a> {
    /// Timeline for `snapshot`, scrolled to `scroll_offset`.
    pub fn new(
        snapshot: &'a TimelineSnapshot<'a>,
        scroll_offset: f64,
        item_height: f64,
        styles: TimelineStyles,
    ) -> Self {
        Self {
            snapshot,
            scroll_offset,
            item_height,
            styles,
        }
    }

    /// Card lines for one item, at most `rows` of them.
    fn item_lines(&self, item: &VisibleItem<'_>, width: usize, rows: usize) -> Vec<Line<'static>> {
        let record = item.record;
        let accent = self.styles.accent(record.color());
        let bar = || Span::styled("▌ ", accent);

        let marker = if item.expanded { "▼ " } else { "▶ " };
        let date = format_record_date(record);
        // bar(2) + marker(2) + gap(2) + date
        let title_room = width.saturating_sub(6 + date.chars().count());

        let mut lines = vec![Line::from(vec![
            bar(),
            Span::raw(marker),
            Span::styled(
                truncate_to_width(record.display_name(), title_room),
                self.styles.title(item.focused),
            ),
            Span::raw("  "),
            Span::styled(date, self.styles.date()),
        ])];

        let mut meta = vec![bar(), Span::styled(record.category_label().to_string(), accent)];
        if !record.tags().is_empty() {
            let count = record.tags().len();
            let noun = if count == 1 { "task" } else { "tasks" };
            meta.push(Span::styled(format!("  · {count} {noun}"), self.styles.muted()));
        }
        lines.push(Line::from(meta));

        let description = single_line(record.description());
        if !description.is_empty() {
            lines.push(Line::from(vec![
                bar(),
                Span::styled(
                    truncate_to_width(&description, width.saturating_sub(2)),
                    self.styles.muted(),
                ),
            ]));
        }

        // Last row of every card is a spacer when the card is tall enough
        let content_rows = rows.saturating_sub(1).max(1);
        lines.truncate(content_rows);
        lines
    }
}

impl Widget for TimelineView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        if self.snapshot.is_empty() {
            let y = area.y + area.height / 2;
            Paragraph::new(Line::from(EMPTY_MESSAGE))
                .alignment(Alignment::Center)
                .style(self.styles.muted())
                .render(Rect::new(area.x, y, area.width, 1), buf);
            return;
        }

        // Leave the last column for the scrollbar
        let content = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        let rows = self.item_height.round().max(1.0) as usize;

        for item in &self.snapshot.items {
            let first_row = (item.top - self.scroll_offset).floor() as i64;
            let lines = self.item_lines(item, content.width as usize, rows);
            for (i, line) in lines.iter().enumerate() {
                let row = first_row + i as i64;
                if row < 0 || row >= i64::from(content.height) {
                    continue;
                }
                buf.set_line(content.x, content.y + row as u16, line, content.width);
            }
        }

        let total_rows = self.snapshot.window.total_height.ceil() as usize;
        let mut scrollbar = ScrollbarState::new(total_rows.saturating_sub(area.height as usize))
            .position(self.scroll_offset.round() as usize)
            .viewport_content_length(area.height as usize);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .render(area, buf, &mut scrollbar);
    }
}
