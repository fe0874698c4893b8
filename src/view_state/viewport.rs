//! Scroll position and viewport geometry.

use super::types::ItemHeight;
use super::visible_range::WindowRange;
use super::window::compute_range;

/// Scroll position and viewport geometry for a fixed-height list.
///
/// All scroll operations take the current list length and clamp the offset to
/// `[0, max(0, total_height - viewport_height)]`, so the viewport never shows
/// blank space past the last record.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    scroll_offset: f64,
    viewport_height: f64,
    item_height: ItemHeight,
    buffer: usize,
}

impl ViewportState {
    /// Viewport at offset zero.
    pub fn new(item_height: ItemHeight, viewport_height: f64, buffer: usize) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: sanitize(viewport_height),
            item_height,
            buffer,
        }
    }

    /// Distance scrolled from the top.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Visible height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Height of one collapsed record.
    pub fn item_height(&self) -> ItemHeight {
        self.item_height
    }

    /// Records rendered beyond each edge.
    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Largest offset that still fills the viewport for a list of `count`.
    pub fn max_scroll_offset(&self, count: usize) -> f64 {
        (count as f64 * self.item_height.get() - self.viewport_height).max(0.0)
    }

    /// Set an absolute offset, clamped to the valid range.
    pub fn scroll_to(&mut self, offset: f64, count: usize) {
        let max = self.max_scroll_offset(count);
        self.scroll_offset = sanitize(offset).min(max);
    }

    /// Move by a signed delta, clamped to the valid range.
    pub fn scroll_by(&mut self, delta: f64, count: usize) {
        let target = if delta.is_finite() {
            self.scroll_offset + delta
        } else {
            self.scroll_offset
        };
        self.scroll_to(target, count);
    }

    /// Scroll down one viewport.
    pub fn page_down(&mut self, count: usize) {
        self.scroll_by(self.viewport_height, count);
    }

    /// Scroll up one viewport.
    pub fn page_up(&mut self, count: usize) {
        self.scroll_by(-self.viewport_height, count);
    }

    /// Jump to the first record.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    /// Jump so the last record sits at the bottom.
    pub fn scroll_to_bottom(&mut self, count: usize) {
        self.scroll_offset = self.max_scroll_offset(count);
    }

    /// Change the viewport height and re-clamp the offset.
    pub fn resize(&mut self, viewport_height: f64, count: usize) {
        self.viewport_height = sanitize(viewport_height);
        self.scroll_to(self.scroll_offset, count);
    }

    /// Top edge of the record at `index`.
    pub fn item_top(&self, index: usize) -> f64 {
        index as f64 * self.item_height.get()
    }

    /// Scroll the minimum amount needed for the record at `index` to be fully
    /// inside the viewport (or at its top, if it is taller than the viewport).
    pub fn scroll_to_index(&mut self, index: usize, count: usize) {
        if index >= count {
            return;
        }
        let top = self.item_top(index);
        let bottom = top + self.item_height.get();
        if top < self.scroll_offset || self.item_height.get() > self.viewport_height {
            self.scroll_to(top, count);
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_to(bottom - self.viewport_height, count);
        }
    }

    /// Forget the scroll position. Used whenever the filtered list is replaced.
    pub fn reset(&mut self) {
        self.scroll_offset = 0.0;
    }

    /// Rendered slice for a list of `count` records at the current position.
    pub fn window(&self, count: usize) -> WindowRange {
        compute_range(
            count,
            self.item_height.get(),
            self.scroll_offset,
            self.viewport_height,
            self.buffer,
        )
    }
}

/// Map negative and non-finite values to 0.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
