//! Window calculator: which slice of the list to render.

use super::visible_range::WindowRange;

/// Compute the rendered slice for a fixed-height list.
///
/// ```text
/// start       = max(0, floor(scroll_offset / item_height) - buffer)
/// end         = min(count, start + ceil(viewport_height / item_height) + 2 * buffer)
/// top_offset  = start * item_height
/// total_height = count * item_height
/// ```
///
/// Degenerate inputs never fail:
/// - `count == 0` gives `start == end == 0`
/// - a zero (or negative, or non-finite) viewport gives `end == start`
/// - a negative or non-finite scroll offset is treated as 0
/// - `start` is clamped to `count` when scrolled past the end
/// - a non-positive or non-finite item height gives [`WindowRange::EMPTY`]
pub fn compute_range(
    count: usize,
    item_height: f64,
    scroll_offset: f64,
    viewport_height: f64,
    buffer: usize,
) -> WindowRange {
    if !(item_height.is_finite() && item_height > 0.0) {
        return WindowRange::EMPTY;
    }

    let total_height = count as f64 * item_height;
    if count == 0 {
        return WindowRange {
            total_height,
            ..WindowRange::EMPTY
        };
    }

    let offset = if scroll_offset.is_finite() && scroll_offset > 0.0 {
        scroll_offset
    } else {
        0.0
    };

    // f64 -> usize casts saturate, so huge offsets cannot wrap
    let first_visible = (offset / item_height).floor() as usize;
    let start = first_visible.saturating_sub(buffer).min(count);

    let end = if viewport_height.is_finite() && viewport_height > 0.0 {
        let visible = (viewport_height / item_height).ceil() as usize;
        start
            .saturating_add(visible)
            .saturating_add(buffer.saturating_mul(2))
            .min(count)
    } else {
        start
    };

    WindowRange {
        start,
        end,
        top_offset: start as f64 * item_height,
        total_height,
    }
}
