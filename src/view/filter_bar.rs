//! Filter bar: search box, category summary, and date bounds on one line.

use super::styles::TimelineStyles;
use crate::filter::FilterCriteria;
use crate::state::{InputField, InputMode};
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Filter bar widget.
pub struct FilterBar<'a> {
    criteria: &'a FilterCriteria,
    input: &'a InputMode,
    picker_open: bool,
    search_pending: bool,
    /// Earliest and latest record dates, shown in place of open bounds.
    data_range: Option<(NaiveDate, NaiveDate)>,
    styles: TimelineStyles,
}

impl<'a> FilterBar<'a> {
    /// Bar for the applied `criteria` and the current input mode.
    pub fn new(criteria: &'a FilterCriteria, input: &'a InputMode, styles: TimelineStyles) -> Self {
        Self {
            criteria,
            input,
            picker_open: false,
            search_pending: false,
            data_range: None,
            styles,
        }
    }

    /// Show whether the category picker is open.
    pub fn picker_open(mut self, open: bool) -> Self {
        self.picker_open = open;
        self
    }

    /// Mark the search text as typed but not yet applied.
    pub fn search_pending(mut self, pending: bool) -> Self {
        self.search_pending = pending;
        self
    }

    /// Date span of the loaded records, for the open-bound placeholders.
    pub fn data_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.data_range = range;
        self
    }

    fn label(&self, text: &'static str, field: Option<InputField>) -> Span<'static> {
        let active = field.is_some() && self.input.field() == field;
        if active {
            Span::styled(text, self.styles.active_field())
        } else {
            Span::raw(text)
        }
    }

    /// The field's spans: live buffer with cursor while editing, value otherwise.
    fn field_spans(&self, field: InputField, value: String, placeholder: String) -> Vec<Span<'static>> {
        if let InputMode::Editing {
            field: editing,
            text,
            cursor,
        } = self.input
        {
            if *editing == field {
                return cursor_spans(text, *cursor, self.styles);
            }
        }

        if value.is_empty() {
            vec![Span::styled(placeholder, self.styles.muted())]
        } else {
            vec![Span::raw(value)]
        }
    }

    fn line(&self) -> Line<'static> {
        let separator = || Span::styled("  │  ", self.styles.muted());
        let mut spans = Vec::new();

        spans.push(self.label("Search: ", Some(InputField::Search)));
        spans.extend(self.field_spans(
            InputField::Search,
            self.criteria.search_text.clone(),
            "/ to search".to_string(),
        ));
        if self.search_pending {
            spans.push(Span::styled(" …", self.styles.muted()));
        }

        spans.push(separator());
        spans.push(self.label("Category: ", None));
        let marker = if self.picker_open { " ▴" } else { " ▾" };
        spans.push(Span::raw(format!("{}{}", self.criteria.category_label(), marker)));

        spans.push(separator());
        spans.push(self.label("From: ", Some(InputField::DateStart)));
        spans.extend(self.field_spans(
            InputField::DateStart,
            format_bound(self.criteria.date_start),
            format_open_bound(self.data_range.map(|(first, _)| first)),
        ));
        spans.push(Span::raw("  "));
        spans.push(self.label("To: ", Some(InputField::DateEnd)));
        spans.extend(self.field_spans(
            InputField::DateEnd,
            format_bound(self.criteria.date_end),
            format_open_bound(self.data_range.map(|(_, last)| last)),
        ));

        Line::from(spans)
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL).title("Filters");
        // In the border so it survives clipping of the long filter line
        if self.criteria.is_inverted_range() {
            block = block.title_top(
                Line::styled(" start after end ", self.styles.active_field()).right_aligned(),
            );
        }
        Paragraph::new(self.line()).block(block).render(area, buf);
    }
}

fn format_bound(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Placeholder for an unset bound: the data's own edge, or "any".
fn format_open_bound(edge: Option<NaiveDate>) -> String {
    edge.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "any".to_string())
}

/// Split `text` around a block cursor at character `cursor`.
fn cursor_spans(text: &str, cursor: usize, styles: TimelineStyles) -> Vec<Span<'static>> {
    let before: String = text.chars().take(cursor).collect();
    let mut after = text.chars().skip(cursor);
    let under = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let rest: String = after.collect();

    vec![
        Span::raw(before),
        Span::styled(under, styles.cursor()),
        Span::raw(rest),
    ]
}
