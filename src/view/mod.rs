//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail;
mod filter_bar;
mod helpers;
pub mod layout;
mod picker;
pub mod styles;
mod timeline;

pub use detail::DetailPane;
pub use filter_bar::FilterBar;
pub use helpers::{single_line, truncate_to_width, wrap_lines};
pub use layout::{render_layout, ScreenAreas};
pub use picker::CategoryPickerPopup;
pub use styles::{ColorConfig, TimelineStyles};
pub use timeline::{format_record_date, TimelineView};

use crate::config::KeyBindings;
use crate::filter::FilterCriteria;
use crate::model::{RecordId, RecordStore};
use crate::state::{handle_key_action, handle_text_key, AppEvent, AppState, KeyOutcome};
use crate::view_state::{ItemHeight, ViewportState};
use constants::{IDLE_POLL_MS, WHEEL_SCROLL_ROWS};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

// ===== Terminal guard =====

/// Owns the terminal modes the TUI needs: raw mode, alternate screen, mouse
/// capture.
///
/// Dropping the guard restores the terminal, so an early return or a panic
/// unwinding through the event loop never leaves the shell in raw mode.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failures instead of ignoring them.
    pub fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = restore_terminal();
        }
    }
}

/// Disable raw mode, mouse capture, and leave the alternate screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
}

// ===== Application =====

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    key_bindings: KeyBindings,
    styles: TimelineStyles,
    /// Areas from the last draw, for mouse hit-testing
    areas: Option<ScreenAreas>,
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap a terminal around `state`.
    pub fn new(
        terminal: Terminal<B>,
        state: AppState,
        key_bindings: KeyBindings,
        styles: TimelineStyles,
    ) -> Self {
        let mut app = Self {
            terminal,
            state,
            key_bindings,
            styles,
            areas: None,
        };
        app.sync_viewport();
        app
    }

    /// The state being rendered.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn frame_area(&self) -> Rect {
        self.terminal
            .size()
            .map(|size| Rect::new(0, 0, size.width, size.height))
            .unwrap_or_default()
    }

    /// Keep the viewport height equal to the timeline's on-screen rows.
    fn sync_viewport(&mut self) -> bool {
        let rows = f64::from(layout::timeline_rows(self.frame_area(), &self.state));
        if rows == self.state.viewport().viewport_height() {
            return false;
        }
        trace!(rows, "Timeline viewport resized");
        self.state.apply_event(AppEvent::Resize {
            viewport_height: rows,
        })
    }

    /// Handle a key press. Returns `true` if the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let outcome = if self.state.input.is_editing() {
            handle_text_key(&mut self.state, key, now)
        } else {
            match self.key_bindings.get(key) {
                Some(action) => handle_key_action(&mut self.state, action),
                None => KeyOutcome::Continue,
            }
        };
        outcome == KeyOutcome::Quit
    }

    /// Handle a mouse event against the areas of the last draw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(areas) = self.areas else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);
        let in_picker = areas.picker.is_some_and(|area| area.contains(position));

        match mouse.kind {
            MouseEventKind::ScrollUp if in_picker => {
                self.state.apply_event(AppEvent::PickerPrev);
            }
            MouseEventKind::ScrollDown if in_picker => {
                self.state.apply_event(AppEvent::PickerNext);
            }
            MouseEventKind::ScrollUp => {
                self.state.apply_event(AppEvent::ScrollBy(-WHEEL_SCROLL_ROWS));
            }
            MouseEventKind::ScrollDown => {
                self.state.apply_event(AppEvent::ScrollBy(WHEEL_SCROLL_ROWS));
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(areas, position, in_picker),
            _ => {}
        }
    }

    fn handle_click(&mut self, areas: ScreenAreas, position: Position, in_picker: bool) {
        if let Some(picker_area) = areas.picker {
            if in_picker {
                let options = self.state.store().categories();
                if let Some(option) =
                    picker::option_at(picker_area, options, position.x, position.y).cloned()
                {
                    self.state.apply_event(AppEvent::ToggleCategory(option));
                }
            } else {
                // Any click outside an open picker only closes it
                self.state.apply_event(AppEvent::CloseCategoryPicker);
            }
            return;
        }

        if areas.filter_bar.contains(position) {
            self.state.apply_event(AppEvent::OpenCategoryPicker);
        } else if areas.timeline.contains(position) {
            if let Some(id) = self.record_at_row(position.y - areas.timeline.y) {
                self.state.apply_event(AppEvent::ToggleExpand(id));
            }
        }
    }

    /// Record drawn at `row` rows below the top of the timeline area.
    fn record_at_row(&self, row: u16) -> Option<RecordId> {
        let viewport = self.state.viewport();
        let y = viewport.scroll_offset() + f64::from(row);
        let position = (y / viewport.item_height().get()).floor() as usize;
        self.state
            .filtered()
            .get(position, self.state.store())
            .map(|record| record.id().clone())
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.sync_viewport();

        let state = &self.state;
        let styles = self.styles;
        let mut areas = None;
        self.terminal.draw(|frame| {
            areas = Some(render_layout(frame, state, styles));
        })?;
        self.areas = areas;
        Ok(())
    }

    /// Run the main event loop until the user quits.
    ///
    /// The loop sleeps in `event::poll` for at most the time left on the
    /// search debounce, so a due search fires without a separate timer.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const IDLE: Duration = Duration::from_millis(IDLE_POLL_MS);

        self.draw()?;

        loop {
            let timeout = self
                .state
                .time_until_due(Instant::now())
                .map_or(IDLE, |due| due.min(IDLE));

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key, Instant::now()) {
                            break;
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.state.apply_event(AppEvent::Tick(Instant::now())) {
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }

        self.state.apply_event(AppEvent::Teardown);
        Ok(())
    }
}

// ===== Entry point =====

/// Startup settings for the TUI, resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Height of one collapsed record.
    pub item_height: ItemHeight,
    /// Records rendered beyond each viewport edge.
    pub buffer: usize,
    /// Quiet period before a typed search is applied.
    pub debounce: Duration,
    /// Criteria applied at startup.
    pub criteria: FilterCriteria,
    /// Color preference.
    pub colors: ColorConfig,
}

impl ViewSettings {
    /// Initial application state for `store`. The viewport height is set on first draw.
    pub fn build_state(&self, store: RecordStore) -> AppState {
        let viewport = ViewportState::new(self.item_height, 0.0, self.buffer);
        AppState::with_criteria(store, viewport, self.debounce, self.criteria.clone())
    }
}

/// Initialize and run the TUI over a loaded store.
///
/// Logging must be initialized by caller before calling this function.
pub fn run_with_store(store: RecordStore, settings: ViewSettings) -> Result<(), TuiError> {
    let state = settings.build_state(store);
    info!(
        matched = state.filtered().len(),
        total = state.store().len(),
        "Starting timeline view"
    );

    let guard = TerminalGuard::acquire()?;
    let terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = TuiApp::new(
        terminal,
        state,
        KeyBindings::default(),
        TimelineStyles::new(settings.colors),
    );

    let result = app.run();
    guard.restore()?;
    result
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
