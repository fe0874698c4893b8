//! Timeline Viewer (tlv)
//!
//! TUI application for browsing large, date-ordered record catalogues.
//!
//! The crate follows a Pure Core / Impure Shell split: `filter`,
//! `debounce`, `view_state` and `state` are pure and driven by explicit
//! events and an injected clock, while `view`, `source` and `logging`
//! touch the terminal, the filesystem and the global subscriber.

pub mod config;
pub mod debounce;
pub mod filter;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
