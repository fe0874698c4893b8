//! Screen layout: filter bar, timeline, optional detail pane, status bar,
//! and the category picker popup on top.

use super::constants::{
    DETAIL_PANE_HEIGHT, FILTER_BAR_HEIGHT, PICKER_WIDTH, PICKER_X_OFFSET, STATUS_BAR_HEIGHT,
};
use super::detail::DetailPane;
use super::filter_bar::FilterBar;
use super::picker::CategoryPickerPopup;
use super::styles::TimelineStyles;
use super::timeline::TimelineView;
use crate::model::Record;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: &str = "j/k scroll · / search · m categories · [ ] dates · Enter expand · q quit";

/// Where each part of the screen was drawn. Kept for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Filter bar block.
    pub filter_bar: Rect,
    /// Timeline list.
    pub timeline: Rect,
    /// Detail pane, when a record is expanded.
    pub detail: Option<Rect>,
    /// Status line.
    pub status: Rect,
    /// Category picker popup, when open.
    pub picker: Option<Rect>,
}

/// Split the frame. The detail pane only takes space when requested.
pub fn compute_areas(frame: Rect, show_detail: bool) -> ScreenAreas {
    let detail_height = if show_detail { DETAIL_PANE_HEIGHT } else { 0 };
    let [filter_bar, timeline, detail, status] = Layout::vertical([
        Constraint::Length(FILTER_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(detail_height),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame);

    ScreenAreas {
        filter_bar,
        timeline,
        detail: show_detail.then_some(detail),
        status,
        picker: None,
    }
}

/// Popup area hanging from the filter bar, clipped to the frame.
pub fn picker_area(filter_bar: Rect, frame: Rect, option_count: usize) -> Rect {
    let x = (filter_bar.x + PICKER_X_OFFSET).min(frame.right());
    let y = filter_bar.bottom().saturating_sub(1).min(frame.bottom());
    let width = PICKER_WIDTH.min(frame.right() - x);
    let height = CategoryPickerPopup::desired_height(option_count).min(frame.bottom() - y);
    Rect::new(x, y, width, height)
}

/// The expanded record, and whether the current filters hide it.
pub fn expanded_record(state: &AppState) -> Option<(&Record, bool)> {
    let id = state.selection().expanded()?;
    let index = state.store().index_of(id)?;
    let record = state.store().get(index)?;
    let hidden = state.filtered().position_of(id, state.store()).is_none();
    Some((record, hidden))
}

/// Timeline height for a frame, given the current state.
pub fn timeline_rows(frame: Rect, state: &AppState) -> u16 {
    compute_areas(frame, expanded_record(state).is_some())
        .timeline
        .height
}

/// Draw one full frame and report where everything went.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: TimelineStyles) -> ScreenAreas {
    let expanded = expanded_record(state);
    let mut areas = compute_areas(frame.area(), expanded.is_some());

    let picker = state.picker();
    frame.render_widget(
        FilterBar::new(state.criteria(), &state.input, styles)
            .picker_open(picker.open)
            .search_pending(state.has_pending_search())
            .data_range(state.store().date_bounds()),
        areas.filter_bar,
    );

    let snapshot = state.snapshot();
    let viewport = state.viewport();
    frame.render_widget(
        TimelineView::new(
            &snapshot,
            viewport.scroll_offset(),
            viewport.item_height().get(),
            styles,
        ),
        areas.timeline,
    );

    if let (Some(area), Some((record, hidden))) = (areas.detail, expanded) {
        frame.render_widget(DetailPane::new(record, styles).hidden(hidden), area);
    }

    let status = Line::from(vec![
        Span::raw(snapshot.summary()),
        Span::styled(format!("  {KEY_HINTS}"), styles.muted()),
    ]);
    frame.render_widget(Paragraph::new(status), areas.status);

    if picker.open {
        let options = state.store().categories();
        let area = picker_area(areas.filter_bar, frame.area(), options.len());
        frame.render_widget(
            CategoryPickerPopup::new(options, state.criteria(), picker.cursor, styles),
            area,
        );
        areas.picker = Some(area);
    }

    areas
}
