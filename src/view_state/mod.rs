//! Virtualization and selection state (pure).
//!
//! Everything here is computed from plain values and is testable without a
//! terminal: the window calculator, scroll/viewport geometry, and the
//! expansion selection.

pub mod selection;
pub mod types;
pub mod viewport;
pub mod visible_range;
pub mod window;

pub use selection::SelectionState;
pub use types::{InvalidItemHeight, ItemHeight};
pub use viewport::ViewportState;
pub use visible_range::WindowRange;
pub use window::compute_range;
