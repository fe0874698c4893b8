//! Detail pane for the expanded record.

use super::styles::TimelineStyles;
use super::timeline::format_record_date;
use crate::model::Record;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Full description and tasks of one record.
pub struct DetailPane<'a> {
    record: &'a Record,
    /// The record is expanded but excluded by the current filters.
    hidden: bool,
    styles: TimelineStyles,
}

impl<'a> DetailPane<'a> {
    /// Pane for `record`.
    pub fn new(record: &'a Record, styles: TimelineStyles) -> Self {
        Self {
            record,
            hidden: false,
            styles,
        }
    }

    /// Hide the pane without unmounting its content.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let record = self.record;
        let accent = self.styles.accent(record.color());

        let mut title = format!(" {} ", record.display_name());
        if self.hidden {
            title.push_str("(filtered out) ");
        }

        let mut lines = vec![Line::from(vec![
            Span::styled(record.category_label().to_string(), accent),
            Span::styled("  ·  ", self.styles.muted()),
            Span::styled(format_record_date(record), self.styles.date()),
            Span::styled("  ·  ", self.styles.muted()),
            Span::styled(record.id().to_string(), self.styles.muted()),
        ])];

        if !record.tags().is_empty() {
            let mut tasks = vec![Span::raw("Tasks: ")];
            for (i, tag) in record.tags().iter().enumerate() {
                if i > 0 {
                    tasks.push(Span::styled(", ", self.styles.muted()));
                }
                tasks.push(Span::styled(tag.clone(), self.styles.tag()));
            }
            lines.push(Line::from(tasks));
        }

        if !record.description().trim().is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(record.description().to_string()));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(accent)
                    .title(title),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(pane: DetailPane<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(pane, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_tasks_and_description() {
        let record = Record::new(RecordId::new("clip").unwrap(), "CLIP", "multimodal", "2021-01-05")
            .with_category_name("Multimodal")
            .with_tags(vec!["zero-shot".into(), "retrieval".into()])
            .with_description("Contrastive image-text pretraining.");
        let out = render(DetailPane::new(&record, TimelineStyles::default()));
        assert!(out.contains("CLIP"));
        assert!(out.contains("Multimodal"));
        assert!(out.contains("zero-shot"));
        assert!(out.contains("retrieval"));
        assert!(out.contains("Contrastive"));
    }

    #[test]
    fn marks_filtered_out_record() {
        let record = Record::new(RecordId::new("a").unwrap(), "A", "text", "2020-01-01");
        let out = render(DetailPane::new(&record, TimelineStyles::default()).hidden(true));
        assert!(out.contains("(filtered out)"));
    }
}
