//! Error types for the tlv application.
//!
//! This module defines the top of a hierarchical error taxonomy using `thiserror`.
//! Domain modules own their own error enums; [`AppError`] composes them via `From`
//! so the binary can propagate everything with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`LoadError`] - Catalogue loading failures (missing file, bad JSON, bad record)
//!   - [`ConfigError`] - Configuration file/env failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`TuiError`] - Terminal/TUI rendering failures
//!
//! # What is NOT an error
//!
//! The filtering and windowing core never fails. Unparseable record dates,
//! empty results, inverted date ranges, and degenerate viewports all resolve to
//! well-defined output values (empty sequences, empty ranges). Only the shell
//! around the core - loading, configuration, logging, the terminal - produces
//! `AppError`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::source::LoadError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All variants are fatal: the binary reports them on stderr and exits.
///
/// # Examples
///
/// ```no_run
/// use tlv::model::error::AppError;
/// use tlv::source::{load_catalogue, LoadError};
///
/// fn run_app() -> Result<(), AppError> {
///     // LoadError converts to AppError via From
///     let _store = load_catalogue("timeline-data.json")?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the catalogue.
    ///
    /// The viewer cannot proceed without records. The message carries the path
    /// or the offending record position.
    #[error("Failed to load catalogue: {0}")]
    Load(#[from] LoadError),

    /// Configuration could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Raised by the crossterm/ratatui layer (raw mode, alternate screen, draw).
    /// The terminal guard restores the terminal before this reaches `main`.
    #[error("{0}")]
    Terminal(#[from] TuiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn load_error_converts_into_app_error() {
        let err: AppError = LoadError::FileNotFound {
            path: PathBuf::from("/tmp/missing.json"),
        }
        .into();
        assert!(matches!(err, AppError::Load(_)));
        assert!(err.to_string().contains("/tmp/missing.json"));
    }

    #[test]
    fn config_error_converts_into_app_error() {
        let err: AppError = ConfigError::InvalidValue {
            field: "item_height".to_string(),
            reason: "must be positive".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("item_height"));
    }

    #[test]
    fn io_error_converts_into_terminal_variant() {
        let err: AppError = TuiError::from(std::io::Error::other("broken pipe")).into();
        assert!(matches!(err, AppError::Terminal(_)));
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn logging_error_converts_into_app_error() {
        let err: AppError = LoggingError::SubscriberAlreadySet.into();
        assert!(matches!(err, AppError::Logging(_)));
    }
}
