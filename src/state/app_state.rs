//! Application state and transitions.
//!
//! AppState is the root state type containing all core state. It is mutated
//! only through [`AppState::apply_event`], which runs a fixed recompute
//! pipeline:
//!
//! ```text
//! criteria ──► filter ──► (new list? reset scroll) ──► window
//! ```
//!
//! Derived values (filtered view, window) are always recomputed from a
//! complete set of inputs before `apply_event` returns.

use super::event::AppEvent;
use super::input::InputMode;
use super::snapshot::{TimelineSnapshot, VisibleItem};
use crate::debounce::Debouncer;
use crate::filter::{apply_filter, FilterCriteria, FilteredView};
use crate::model::{RecordId, RecordStore};
use crate::view_state::{SelectionState, ViewportState, WindowRange};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

// ===== CategoryPicker =====

/// Multi-select category picker state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryPicker {
    /// Whether the option list is shown.
    pub open: bool,
    /// Highlighted option, an index into the store's sorted categories.
    pub cursor: usize,
}

// ===== AppState =====

/// Application state. Owned by a single controlling context.
///
/// # Components
///
/// - **Record store**: set once at construction, never mutated
/// - **Criteria**: mutated by filter events, search text via the debouncer
/// - **Filtered view**: re-derived whenever criteria change
/// - **Viewport**: mutated by scroll/resize events, reset on every new filter
/// - **Window**: re-derived from viewport + filtered length after every event
/// - **Selection**: changed only by expand/collapse events
///
/// # Reset rule
///
/// Every time a new filtered view is produced, the scroll offset is forced to
/// 0 before the window is recomputed, so the window never refers to positions
/// from a previous, unrelated list. `generation` counts produced views.
#[derive(Debug, Clone)]
pub struct AppState {
    store: RecordStore,
    criteria: FilterCriteria,
    filtered: FilteredView,
    generation: u64,
    viewport: ViewportState,
    window: WindowRange,
    selection: SelectionState,
    search_debounce: Debouncer<String>,
    focus: Option<usize>,
    picker: CategoryPicker,
    torn_down: bool,

    /// Text editing mode, driven by the view's key handler.
    pub input: InputMode,
}

impl AppState {
    /// Create state matching every record.
    pub fn new(store: RecordStore, viewport: ViewportState, debounce_delay: Duration) -> Self {
        Self::with_criteria(store, viewport, debounce_delay, FilterCriteria::default())
    }

    /// Create state with externally provided initial criteria.
    pub fn with_criteria(
        store: RecordStore,
        viewport: ViewportState,
        debounce_delay: Duration,
        criteria: FilterCriteria,
    ) -> Self {
        let mut state = Self {
            filtered: FilteredView::default(),
            store,
            criteria,
            generation: 0,
            viewport,
            window: WindowRange::EMPTY,
            selection: SelectionState::default(),
            search_debounce: Debouncer::new(debounce_delay),
            focus: None,
            picker: CategoryPicker::default(),
            torn_down: false,
            input: InputMode::default(),
        };
        state.refilter();
        state
    }

    // ===== Accessors =====

    /// The loaded records.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Criteria behind the current filtered view.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The current filtered view.
    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    /// Number of filtered views produced so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Scroll position and viewport geometry.
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Rendered window for the current scroll position.
    pub fn window(&self) -> WindowRange {
        self.window
    }

    /// Which record, if any, is expanded.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Focused position in the filtered sequence.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Category picker state.
    pub fn picker(&self) -> CategoryPicker {
        self.picker
    }

    /// True once teardown has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether search text is waiting out its quiet period.
    pub fn has_pending_search(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// Search text typed but not yet applied.
    pub fn pending_search(&self) -> Option<&str> {
        self.search_debounce.pending().map(String::as_str)
    }

    /// Time until the pending search is due. Event loops wait at most this long.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.search_debounce.time_until_due(now)
    }

    /// Project the current state for rendering.
    pub fn snapshot(&self) -> TimelineSnapshot<'_> {
        let items = self
            .window
            .indices()
            .filter_map(|position| {
                let record = self.filtered.get(position, &self.store)?;
                Some(VisibleItem {
                    position,
                    top: self.viewport.item_top(position),
                    record,
                    expanded: self.selection.is_expanded(record.id()),
                    focused: self.focus == Some(position),
                })
            })
            .collect();

        TimelineSnapshot {
            items,
            window: self.window,
            selection: &self.selection,
            matched: self.filtered.len(),
            total: self.store.len(),
        }
    }

    // ===== Event handling =====

    /// Apply one event and run the recompute pipeline.
    ///
    /// Returns `true` if anything observable changed (the caller should
    /// redraw). After `Teardown`, every event is ignored.
    pub fn apply_event(&mut self, event: AppEvent) -> bool {
        if self.torn_down {
            trace!(?event, "Event ignored after teardown");
            return false;
        }

        let count = self.filtered.len();
        let changed = match event {
            AppEvent::SearchInput { text, now } => {
                self.search_debounce.schedule(text, now);
                false
            }
            AppEvent::SearchCommit => match self.search_debounce.flush() {
                Some(text) => self.update_criteria(|c| c.search_text = text),
                None => false,
            },
            AppEvent::Tick(now) => match self.search_debounce.poll(now) {
                Some(text) => self.update_criteria(|c| c.search_text = text),
                None => false,
            },
            AppEvent::ToggleCategory(category) => {
                self.update_criteria(|c| c.toggle_category(&category))
            }
            AppEvent::SelectAllCategories => {
                let options = self.store.categories().clone();
                self.update_criteria(|c| c.select_all_categories(&options))
            }
            AppEvent::ClearCategories => self.update_criteria(FilterCriteria::clear_categories),
            AppEvent::SetDateStart(date) => self.update_criteria(|c| c.date_start = date),
            AppEvent::SetDateEnd(date) => self.update_criteria(|c| c.date_end = date),

            AppEvent::ScrollBy(delta) => self.move_viewport(|vp| vp.scroll_by(delta, count)),
            AppEvent::ScrollTo(offset) => self.move_viewport(|vp| vp.scroll_to(offset, count)),
            AppEvent::PageUp => self.move_viewport(|vp| vp.page_up(count)),
            AppEvent::PageDown => self.move_viewport(|vp| vp.page_down(count)),
            AppEvent::ScrollToTop => self.move_viewport(ViewportState::scroll_to_top),
            AppEvent::ScrollToBottom => self.move_viewport(|vp| vp.scroll_to_bottom(count)),
            AppEvent::Resize { viewport_height } => {
                self.move_viewport(|vp| vp.resize(viewport_height, count))
            }

            AppEvent::ToggleExpand(id) => {
                self.selection.toggle(&id);
                true
            }
            AppEvent::ToggleFocusedExpand => match self.focused_or_first_visible() {
                Some(id) => {
                    self.selection.toggle(&id);
                    true
                }
                None => false,
            },
            AppEvent::Collapse => {
                let was_expanded = self.selection.expanded().is_some();
                self.selection.collapse();
                was_expanded
            }
            AppEvent::FocusNext => self.move_focus(1),
            AppEvent::FocusPrev => self.move_focus(-1),

            AppEvent::OpenCategoryPicker => self.set_picker_open(true),
            AppEvent::CloseCategoryPicker => self.set_picker_open(false),
            AppEvent::PickerNext => self.move_picker(1),
            AppEvent::PickerPrev => self.move_picker(-1),
            AppEvent::PickerToggle => {
                let option = self.store.categories().iter().nth(self.picker.cursor).cloned();
                match option {
                    Some(category) if self.picker.open => {
                        self.update_criteria(|c| c.toggle_category(&category))
                    }
                    _ => false,
                }
            }

            AppEvent::Teardown => {
                if self.search_debounce.cancel() {
                    debug!("Pending search discarded on teardown");
                }
                self.torn_down = true;
                false
            }
        };

        self.recompute_window();
        changed
    }

    // ===== Pipeline =====

    /// Edit the criteria; refilter only if they actually changed.
    fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) -> bool {
        let mut next = self.criteria.clone();
        edit(&mut next);
        if next == self.criteria {
            return false;
        }
        self.criteria = next;
        self.refilter();
        true
    }

    fn refilter(&mut self) {
        self.filtered = apply_filter(&self.store, &self.criteria);
        self.generation = self.generation.wrapping_add(1);
        self.viewport.reset();
        self.focus = None;
        self.recompute_window();
        debug!(
            generation = self.generation,
            matched = self.filtered.len(),
            total = self.store.len(),
            "Filter applied"
        );
    }

    fn recompute_window(&mut self) {
        self.window = self.viewport.window(self.filtered.len());
    }

    fn move_viewport(&mut self, op: impl FnOnce(&mut ViewportState)) -> bool {
        let before = self.viewport.clone();
        op(&mut self.viewport);
        self.viewport != before
    }

    // ===== Focus =====

    /// Position of the first record whose top edge is at or below the scroll offset.
    fn first_visible_position(&self) -> Option<usize> {
        let count = self.filtered.len();
        if count == 0 {
            return None;
        }
        let item = self.viewport.item_height().get();
        let position = (self.viewport.scroll_offset() / item).ceil() as usize;
        Some(position.min(count - 1))
    }

    fn focused_or_first_visible(&self) -> Option<RecordId> {
        let position = self
            .focus
            .filter(|&p| p < self.filtered.len())
            .or_else(|| self.first_visible_position())?;
        self.filtered
            .get(position, &self.store)
            .map(|r| r.id().clone())
    }

    fn move_focus(&mut self, step: isize) -> bool {
        let count = self.filtered.len();
        if count == 0 {
            return false;
        }
        let next = match self.focus {
            None => self.first_visible_position().unwrap_or(0),
            Some(current) => current.saturating_add_signed(step).min(count - 1),
        };
        let changed = self.focus != Some(next);
        self.focus = Some(next);
        self.viewport.scroll_to_index(next, count);
        changed
    }

    // ===== Category picker =====

    fn set_picker_open(&mut self, open: bool) -> bool {
        let changed = self.picker.open != open;
        self.picker.open = open;
        changed
    }

    fn move_picker(&mut self, step: isize) -> bool {
        let options = self.store.categories().len();
        if !self.picker.open || options == 0 {
            return false;
        }
        let next = self
            .picker
            .cursor
            .saturating_add_signed(step)
            .min(options - 1);
        let changed = next != self.picker.cursor;
        self.picker.cursor = next;
        changed
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
