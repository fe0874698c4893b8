//! Acceptance tests: filtering, windowing and expansion driven end to end.
//!
//! Each scenario loads records, feeds events through the public API and
//! checks what a user would observe.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tlv::config::KeyBindings;
use tlv::filter::{apply_filter, FilterCriteria};
use tlv::model::{Record, RecordId, RecordStore};
use tlv::source::load_catalogue;
use tlv::state::{AppEvent, AppState};
use tlv::view::{ColorConfig, TimelineStyles, TuiApp, ViewSettings};
use tlv::view_state::{compute_range, ItemHeight, SelectionState, ViewportState};

const FIXTURE: &str = "tests/fixtures/catalogue.json";

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn record(id: &str, category: &str, date: &str) -> Record {
    Record::new(RecordId::new(id).unwrap(), id.to_uppercase(), category, date)
}

fn ids<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<&'a str> {
    records.map(|r| r.id().as_str()).collect()
}

// ===== Scenario A: Date range =====

#[test]
fn date_range_keeps_only_records_inside_bounds() {
    // GIVEN three records a year apart
    let store = RecordStore::new(vec![
        record("1", "text", "2020-01-01"),
        record("2", "text", "2021-06-15"),
        record("3", "text", "2022-03-10"),
    ])
    .unwrap();

    // WHEN the range covers only 2021
    let criteria = FilterCriteria::new().with_date_range(ymd(2021, 1, 1), ymd(2022, 1, 1));
    let view = apply_filter(&store, &criteria);

    // THEN only the middle record remains
    assert_eq!(ids(view.records(&store)), vec!["2"]);
}

// ===== Scenario B: Window =====

#[test]
fn window_for_scrolled_long_list() {
    let range = compute_range(1000, 260.0, 5200.0, 800.0, 5);
    assert_eq!((range.start, range.end), (15, 29));
    assert_eq!(range.top_offset, 15.0 * 260.0);
    assert_eq!(range.total_height, 1000.0 * 260.0);
}

#[test]
fn window_follows_state_scroll() {
    let records = (0..1000)
        .map(|i| record(&format!("m{i:04}"), "text", "2021-01-01"))
        .collect();
    let store = RecordStore::new(records).unwrap();
    let viewport = ViewportState::new(ItemHeight::new(260.0).unwrap(), 800.0, 5);
    let mut state = AppState::new(store, viewport, Duration::from_millis(300));

    state.apply_event(AppEvent::ScrollTo(5200.0));
    let snapshot = state.snapshot();

    assert_eq!(snapshot.items.len(), 14);
    assert_eq!(snapshot.items[0].position, 15);
    assert_eq!(snapshot.items[0].top, 15.0 * 260.0);
}

// ===== Scenario C: Empty category selection =====

#[test]
fn empty_category_selection_matches_all() {
    let store = load_catalogue(FIXTURE).unwrap();
    let search_only = FilterCriteria::new().with_search("r");

    let with_empty_set = apply_filter(&store, &search_only.clone().with_categories(Vec::<String>::new()));
    let every_category = apply_filter(
        &store,
        &search_only.with_categories(store.categories().iter().cloned()),
    );

    assert_eq!(with_empty_set, every_category);
    assert!(!with_empty_set.is_empty());
}

// ===== Scenario D: Expansion toggles =====

#[test]
fn toggling_same_record_twice_collapses() {
    let m1 = RecordId::new("m1").unwrap();
    let m2 = RecordId::new("m2").unwrap();

    let mut selection = SelectionState::default();
    selection.toggle(&m1);
    selection.toggle(&m2);
    assert_eq!(selection, SelectionState::Expanded(m2.clone()));
    selection.toggle(&m2);

    assert_eq!(selection, SelectionState::Collapsed);
}

// ===== Catalogue loading =====

#[test]
fn fixture_loads_sorted_with_undated_last() {
    let store = load_catalogue(FIXTURE).unwrap();

    assert_eq!(
        ids(store.iter()),
        vec!["bert", "roberta", "vit", "clip", "whisper", "mystery"]
    );
    let categories: Vec<&str> = store.categories().iter().map(String::as_str).collect();
    assert_eq!(categories, vec!["audio", "multimodal", "text", "vision"]);
}

#[test]
fn undated_record_hidden_only_by_date_bounds() {
    let store = load_catalogue(FIXTURE).unwrap();
    let mystery = RecordId::new("mystery").unwrap();

    let all = apply_filter(&store, &FilterCriteria::new());
    assert!(all.position_of(&mystery, &store).is_some());

    let bounded = apply_filter(&store, &FilterCriteria::new().with_date_range(ymd(2000, 1, 1), None));
    assert!(bounded.position_of(&mystery, &store).is_none());
    assert_eq!(bounded.len(), store.len() - 1);
}

// ===== Interactive session =====

fn harness() -> TuiApp<TestBackend> {
    let store = load_catalogue(FIXTURE).unwrap();
    let settings = ViewSettings {
        item_height: ItemHeight::new(4.0).unwrap(),
        buffer: 1,
        debounce: Duration::from_millis(300),
        criteria: FilterCriteria::default(),
        colors: ColorConfig::disabled(),
    };
    let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    TuiApp::new(
        terminal,
        settings.build_state(store),
        KeyBindings::default(),
        TimelineStyles::new(settings.colors),
    )
}

fn render(app: &mut TuiApp<TestBackend>) -> String {
    app.draw().unwrap();
    app.terminal()
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode, now: Instant) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
}

#[test]
fn search_burst_applies_once_after_quiet_period() {
    let store = load_catalogue(FIXTURE).unwrap();
    let viewport = ViewportState::new(ItemHeight::new(4.0).unwrap(), 20.0, 1);
    let mut state = AppState::new(store, viewport, Duration::from_millis(300));
    let start = Instant::now();

    for (i, text) in ["b", "be", "ber", "bert"].into_iter().enumerate() {
        let now = start + Duration::from_millis(50 * i as u64);
        state.apply_event(AppEvent::SearchInput {
            text: text.to_string(),
            now,
        });
    }
    let last = start + Duration::from_millis(150);
    let generation = state.generation();

    assert!(!state.apply_event(AppEvent::Tick(last + Duration::from_millis(299))));
    assert_eq!(state.filtered().len(), 6);
    assert_eq!(state.generation(), generation);

    assert!(state.apply_event(AppEvent::Tick(last + Duration::from_millis(300))));
    assert_eq!(state.criteria().search_text, "bert");
    assert_eq!(state.generation(), generation + 1, "one refilter for the burst");
    assert_eq!(state.filtered().len(), 2);
}

#[test]
fn typed_search_commits_on_enter() {
    let mut app = harness();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('/'), now);
    for ch in "bert".chars() {
        press(&mut app, KeyCode::Char(ch), now);
    }
    assert!(app.state().has_pending_search());
    assert_eq!(app.state().filtered().len(), 6);

    press(&mut app, KeyCode::Enter, now);
    let out = render(&mut app);
    assert_eq!(app.state().filtered().len(), 2, "BERT and RoBERTa");
    assert!(out.contains("Showing 2 of 6 records"), "got:\n{out}");
    assert!(!out.contains("Whisper"));
}

#[test]
fn category_picker_filters_and_summarizes() {
    let mut app = harness();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('m'), now);
    // audio, multimodal, text, vision: move to text and toggle it
    press(&mut app, KeyCode::Char('j'), now);
    press(&mut app, KeyCode::Char('j'), now);
    press(&mut app, KeyCode::Enter, now);
    press(&mut app, KeyCode::Esc, now);

    assert!(!app.state().picker().open);
    assert_eq!(app.state().filtered().len(), 3, "bert, roberta, mystery");
    let out = render(&mut app);
    assert!(out.contains("Showing 3 of 6 records"), "got:\n{out}");
}

#[test]
fn no_matches_shows_empty_message() {
    let mut app = harness();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('/'), now);
    for ch in "zzz".chars() {
        press(&mut app, KeyCode::Char(ch), now);
    }
    press(&mut app, KeyCode::Enter, now);

    let out = render(&mut app);
    assert!(out.contains("No records match the current filters."), "got:\n{out}");
    assert!(out.contains("Showing 0 of 6 records"));
}
