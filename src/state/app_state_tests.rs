//! Tests for the state container and its recompute pipeline.

use super::*;
use crate::model::Record;
use crate::view_state::ItemHeight;
use chrono::NaiveDate;

// ===== Fixtures =====

const DEBOUNCE: Duration = Duration::from_millis(300);

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn id(s: &str) -> RecordId {
    RecordId::new(s).unwrap()
}

/// 100 records, alternating categories, one per day from 2020-01-01.
fn large_store() -> RecordStore {
    let start = ymd(2020, 1, 1);
    let records = (0..100)
        .map(|i| {
            let category = if i % 2 == 0 { "text" } else { "vision" };
            let date = start + chrono::Days::new(i as u64);
            Record::new(
                id(&format!("m{:03}", i)),
                format!("Model {:03}", i),
                category,
                date.format("%Y-%m-%d").to_string(),
            )
        })
        .collect();
    RecordStore::new(records).unwrap()
}

/// Item height 4, viewport 20 (5 items), buffer 1.
fn state() -> AppState {
    let viewport = ViewportState::new(ItemHeight::new(4.0).unwrap(), 20.0, 1);
    AppState::new(large_store(), viewport, DEBOUNCE)
}

fn visible_ids(state: &AppState) -> Vec<String> {
    state
        .snapshot()
        .items
        .iter()
        .map(|item| item.record.id().to_string())
        .collect()
}

// ===== Initial state =====

#[test]
fn new_state_shows_everything_from_top() {
    let state = state();
    assert_eq!(state.filtered().len(), 100);
    assert_eq!(state.window().start, 0);
    assert_eq!(state.window().end, 7); // 5 visible + 2 * buffer
    assert_eq!(state.window().total_height, 400.0);
    assert_eq!(state.selection(), &SelectionState::Collapsed);
    assert_eq!(state.generation(), 1);
}

#[test]
fn with_criteria_applies_initial_filter() {
    let viewport = ViewportState::new(ItemHeight::new(4.0).unwrap(), 20.0, 1);
    let criteria = FilterCriteria::new().with_categories(["vision"]);
    let state = AppState::with_criteria(large_store(), viewport, DEBOUNCE, criteria);
    assert_eq!(state.filtered().len(), 50);
}

#[test]
fn snapshot_summary_counts() {
    let mut state = state();
    state.apply_event(AppEvent::ToggleCategory("text".to_string()));
    let snapshot = state.snapshot();
    assert_eq!(snapshot.summary(), "Showing 50 of 100 records");
    assert!(!snapshot.is_empty());
}

// ===== Debounced search =====

#[test]
fn search_input_is_not_applied_before_quiet_period() {
    let mut state = state();
    let t0 = Instant::now();
    state.apply_event(AppEvent::SearchInput {
        text: "model 04".to_string(),
        now: t0,
    });
    assert!(state.has_pending_search());
    assert!(!state.apply_event(AppEvent::Tick(t0 + Duration::from_millis(100))));
    assert_eq!(state.filtered().len(), 100);
}

#[test]
fn search_burst_applies_last_value_once() {
    let mut state = state();
    let t0 = Instant::now();
    for (i, text) in ["m", "mo", "model 04"].iter().enumerate() {
        state.apply_event(AppEvent::SearchInput {
            text: text.to_string(),
            now: t0 + Duration::from_millis(i as u64 * 50),
        });
    }
    let generation = state.generation();

    assert!(state.apply_event(AppEvent::Tick(t0 + Duration::from_millis(100) + DEBOUNCE)));
    assert_eq!(state.generation(), generation + 1);
    assert_eq!(state.criteria().search_text, "model 04");
    assert_eq!(state.filtered().len(), 10); // Model 040..049

    assert!(!state.apply_event(AppEvent::Tick(t0 + DEBOUNCE * 10)));
    assert_eq!(state.generation(), generation + 1);
}

#[test]
fn search_commit_applies_immediately() {
    let mut state = state();
    state.apply_event(AppEvent::SearchInput {
        text: "model 099".to_string(),
        now: Instant::now(),
    });
    assert!(state.apply_event(AppEvent::SearchCommit));
    assert_eq!(state.filtered().len(), 1);
    assert!(!state.has_pending_search());
}

#[test]
fn time_until_due_reports_pending_deadline() {
    let mut state = state();
    let t0 = Instant::now();
    assert_eq!(state.time_until_due(t0), None);
    state.apply_event(AppEvent::SearchInput {
        text: "x".to_string(),
        now: t0,
    });
    assert_eq!(state.time_until_due(t0), Some(DEBOUNCE));
}

#[test]
fn identical_search_does_not_refilter() {
    let mut state = state();
    state.apply_event(AppEvent::ScrollTo(40.0));
    let generation = state.generation();
    state.apply_event(AppEvent::SearchInput {
        text: String::new(),
        now: Instant::now(),
    });
    assert!(!state.apply_event(AppEvent::SearchCommit));
    assert_eq!(state.generation(), generation);
    assert_eq!(state.viewport().scroll_offset(), 40.0);
}

// ===== Window reset =====

#[test]
fn new_filter_resets_window_to_top() {
    let mut state = state();
    state.apply_event(AppEvent::ScrollTo(200.0));
    assert!(state.window().start > 0);

    state.apply_event(AppEvent::ToggleCategory("vision".to_string()));

    assert_eq!(state.viewport().scroll_offset(), 0.0);
    assert_eq!(state.window().start, 0);
    assert_eq!(visible_ids(&state)[0], "m001");
}

#[test]
fn shrinking_filter_never_points_past_end() {
    let mut state = state();
    state.apply_event(AppEvent::ScrollToBottom);
    state.apply_event(AppEvent::SetDateEnd(Some(ymd(2020, 1, 2))));
    let window = state.window();
    assert_eq!(state.filtered().len(), 2);
    assert!(window.end <= 2);
    assert_eq!(window.start, 0);
}

#[test]
fn empty_result_gives_empty_window() {
    let mut state = state();
    state.apply_event(AppEvent::SetDateStart(Some(ymd(2021, 1, 1))));
    state.apply_event(AppEvent::SetDateEnd(Some(ymd(2020, 1, 1))));
    let snapshot = state.snapshot();
    assert!(snapshot.is_empty());
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.window, WindowRange::EMPTY);
}

// ===== Scrolling =====

#[test]
fn scroll_moves_window() {
    let mut state = state();
    assert!(state.apply_event(AppEvent::ScrollBy(40.0)));
    assert_eq!(state.window().start, 9); // floor(40 / 4) - 1
    assert_eq!(state.window().end, 16);
}

#[test]
fn scroll_at_top_reports_no_change() {
    let mut state = state();
    assert!(!state.apply_event(AppEvent::ScrollBy(-10.0)));
}

#[test]
fn page_down_then_to_bottom() {
    let mut state = state();
    state.apply_event(AppEvent::PageDown);
    assert_eq!(state.viewport().scroll_offset(), 20.0);
    state.apply_event(AppEvent::ScrollToBottom);
    assert_eq!(state.viewport().scroll_offset(), 380.0);
    assert_eq!(state.window().end, 100);
}

#[test]
fn resize_recomputes_window() {
    let mut state = state();
    state.apply_event(AppEvent::Resize {
        viewport_height: 40.0,
    });
    assert_eq!(state.window().end, 12);
    state.apply_event(AppEvent::Resize {
        viewport_height: 0.0,
    });
    assert!(state.window().is_empty());
}

#[test]
fn snapshot_items_carry_offsets() {
    let mut state = state();
    state.apply_event(AppEvent::ScrollTo(40.0));
    let snapshot = state.snapshot();
    let first = &snapshot.items[0];
    assert_eq!(first.position, 9);
    assert_eq!(first.top, 36.0);
    assert_eq!(snapshot.window.top_offset, 36.0);
}

// ===== Selection =====

#[test]
fn expand_is_globally_exclusive() {
    let mut state = state();
    state.apply_event(AppEvent::ToggleExpand(id("m001")));
    state.apply_event(AppEvent::ToggleExpand(id("m002")));
    let expanded: Vec<_> = state
        .snapshot()
        .items
        .iter()
        .filter(|i| i.expanded)
        .map(|i| i.record.id().to_string())
        .collect();
    assert_eq!(expanded, vec!["m002"]);
}

#[test]
fn selection_survives_being_filtered_out() {
    let mut state = state();
    state.apply_event(AppEvent::ToggleExpand(id("m001")));
    state.apply_event(AppEvent::ToggleCategory("text".to_string()));
    assert!(state.selection().is_expanded(&id("m001")));

    state.apply_event(AppEvent::ClearCategories);
    let item = state
        .snapshot()
        .items
        .into_iter()
        .find(|i| i.record.id().as_str() == "m001")
        .unwrap();
    assert!(item.expanded);
}

#[test]
fn selection_survives_scrolling_away() {
    let mut state = state();
    state.apply_event(AppEvent::ToggleExpand(id("m000")));
    state.apply_event(AppEvent::ScrollToBottom);
    assert!(state.selection().is_expanded(&id("m000")));
}

#[test]
fn toggle_focused_expand_defaults_to_first_visible() {
    let mut state = state();
    state.apply_event(AppEvent::ScrollTo(8.0));
    assert!(state.apply_event(AppEvent::ToggleFocusedExpand));
    assert!(state.selection().is_expanded(&id("m002")));
}

#[test]
fn toggle_focused_expand_uses_focus() {
    let mut state = state();
    state.apply_event(AppEvent::FocusNext);
    state.apply_event(AppEvent::FocusNext);
    state.apply_event(AppEvent::ToggleFocusedExpand);
    assert!(state.selection().is_expanded(&id("m001")));
}

#[test]
fn toggle_focused_expand_on_empty_list_is_noop() {
    let mut state = state();
    state.apply_event(AppEvent::ToggleCategory("audio".to_string()));
    assert!(!state.apply_event(AppEvent::ToggleFocusedExpand));
    assert_eq!(state.selection(), &SelectionState::Collapsed);
}

#[test]
fn collapse_reports_change_only_when_expanded() {
    let mut state = state();
    assert!(!state.apply_event(AppEvent::Collapse));
    state.apply_event(AppEvent::ToggleExpand(id("m003")));
    assert!(state.apply_event(AppEvent::Collapse));
}

// ===== Focus =====

#[test]
fn focus_next_scrolls_focused_record_into_view() {
    let mut state = state();
    for _ in 0..7 {
        state.apply_event(AppEvent::FocusNext);
    }
    assert_eq!(state.focus(), Some(6));
    // item 6 spans 24..28, viewport of 20 must end at 28
    assert_eq!(state.viewport().scroll_offset(), 8.0);
    assert!(state.snapshot().items.iter().any(|i| i.focused && i.position == 6));
}

#[test]
fn focus_prev_stops_at_first_record() {
    let mut state = state();
    state.apply_event(AppEvent::FocusNext);
    state.apply_event(AppEvent::FocusPrev);
    assert_eq!(state.focus(), Some(0));
    assert!(!state.apply_event(AppEvent::FocusPrev));
}

#[test]
fn refilter_clears_focus() {
    let mut state = state();
    state.apply_event(AppEvent::FocusNext);
    state.apply_event(AppEvent::ToggleCategory("text".to_string()));
    assert_eq!(state.focus(), None);
}

// ===== Category picker =====

#[test]
fn picker_toggle_requires_open_picker() {
    let mut state = state();
    assert!(!state.apply_event(AppEvent::PickerToggle));
    state.apply_event(AppEvent::OpenCategoryPicker);
    assert!(state.apply_event(AppEvent::PickerToggle));
    assert!(state.criteria().is_category_selected("text"));
}

#[test]
fn picker_cursor_moves_within_options() {
    let mut state = state();
    state.apply_event(AppEvent::OpenCategoryPicker);
    state.apply_event(AppEvent::PickerNext);
    state.apply_event(AppEvent::PickerNext);
    assert_eq!(state.picker().cursor, 1);
    state.apply_event(AppEvent::PickerToggle);
    assert!(state.criteria().is_category_selected("vision"));
    state.apply_event(AppEvent::PickerPrev);
    assert_eq!(state.picker().cursor, 0);
}

#[test]
fn close_picker_keeps_selection() {
    let mut state = state();
    state.apply_event(AppEvent::OpenCategoryPicker);
    state.apply_event(AppEvent::PickerToggle);
    assert!(state.apply_event(AppEvent::CloseCategoryPicker));
    assert!(!state.picker().open);
    assert_eq!(state.filtered().len(), 50);
}

#[test]
fn select_all_then_clear_categories() {
    let mut state = state();
    state.apply_event(AppEvent::SelectAllCategories);
    assert_eq!(state.criteria().category_label(), "2 Selected");
    assert_eq!(state.filtered().len(), 100);
    state.apply_event(AppEvent::ClearCategories);
    assert_eq!(state.criteria().category_label(), "All Categories");
}

// ===== Teardown =====

#[test]
fn teardown_cancels_pending_search() {
    let mut state = state();
    let t0 = Instant::now();
    state.apply_event(AppEvent::SearchInput {
        text: "model 001".to_string(),
        now: t0,
    });
    state.apply_event(AppEvent::Teardown);
    assert!(state.is_torn_down());
    assert!(!state.has_pending_search());
    assert!(!state.apply_event(AppEvent::Tick(t0 + DEBOUNCE * 2)));
    assert_eq!(state.filtered().len(), 100);
}

#[test]
fn events_after_teardown_are_ignored() {
    let mut state = state();
    state.apply_event(AppEvent::Teardown);
    assert!(!state.apply_event(AppEvent::ToggleExpand(id("m001"))));
    assert_eq!(state.selection(), &SelectionState::Collapsed);
}
