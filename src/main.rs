//! Timeline Viewer - Entry Point

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tlv::config::{resolve_config, CliOverrides, ConfigError};
use tlv::filter::FilterCriteria;
use tlv::model::AppError;
use tlv::view::{ColorConfig, ViewSettings};
use tlv::view_state::ItemHeight;
use tracing::info;

/// Timeline Viewer - TUI for browsing release timeline catalogues
#[derive(Parser, Debug)]
#[command(name = "tlv")]
#[command(version)]
#[command(about = "TUI application for filtering and scrolling large timeline catalogues")]
pub struct Args {
    /// Path to the JSON catalogue (falls back to `data_path` in the config file)
    pub file: Option<PathBuf>,

    /// Start with this search text applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show records in this category (repeatable)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Earliest date to show, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest date to show, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Rows per timeline card
    #[arg(long)]
    pub item_height: Option<f64>,

    /// Cards rendered beyond each edge of the viewport
    #[arg(long)]
    pub buffer: Option<usize>,

    /// Search debounce delay in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {raw:?}: {e}"))
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            item_height: self.item_height,
            buffer: self.buffer,
            debounce_ms: self.debounce_ms,
        }
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_categories(&self.categories)
            .with_date_range(self.from, self.to)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args.config.clone(), &args.overrides())?;

    tlv::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let path = args
        .file
        .clone()
        .or_else(|| config.data_path.clone())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "data_path".to_string(),
            reason: "no catalogue file given on the command line or in the config".to_string(),
        })?;

    let store = tlv::source::load_catalogue(&path)?;

    let item_height =
        ItemHeight::new(config.item_height).map_err(|e| ConfigError::InvalidValue {
            field: "item_height".to_string(),
            reason: e.to_string(),
        })?;

    let settings = ViewSettings {
        item_height,
        buffer: config.buffer,
        debounce: config.debounce,
        criteria: args.criteria(),
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    tlv::view::run_with_store(store, settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["tlv", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["tlv", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["tlv"]);
        assert_eq!(args.file, None);
        assert_eq!(args.search, None);
        assert!(args.categories.is_empty());
        assert_eq!(args.from, None);
        assert_eq!(args.to, None);
        assert_eq!(args.item_height, None);
        assert_eq!(args.buffer, None);
        assert_eq!(args.debounce_ms, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["tlv", "models.json"]);
        assert_eq!(args.file, Some(PathBuf::from("models.json")));
    }

    #[test]
    fn test_search_short_flag() {
        let args = Args::parse_from(["tlv", "-s", "bert"]);
        assert_eq!(args.search, Some("bert".to_string()));
        assert_eq!(args.criteria().search_text, "bert");
    }

    #[test]
    fn test_category_is_repeatable() {
        let args = Args::parse_from(["tlv", "-c", "text", "--category", "vision"]);
        assert_eq!(args.categories, vec!["text", "vision"]);
        let criteria = args.criteria();
        assert!(criteria.is_category_selected("text"));
        assert!(criteria.is_category_selected("vision"));
        assert!(!criteria.is_category_selected("audio"));
    }

    #[test]
    fn test_date_flags_parse() {
        let args = Args::parse_from(["tlv", "--from", "2020-01-01", "--to", "2021-06-30"]);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2021, 6, 30));
        assert!(args.criteria().has_date_bounds());
    }

    #[test]
    fn test_date_flag_rejects_garbage() {
        let result = Args::try_parse_from(["tlv", "--from", "last tuesday"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_date_flag_rejects_impossible_date() {
        assert!(Args::try_parse_from(["tlv", "--to", "2021-02-30"]).is_err());
    }

    #[test]
    fn test_virtualization_flags_become_overrides() {
        let args = Args::parse_from([
            "tlv",
            "--item-height",
            "6",
            "--buffer",
            "2",
            "--debounce-ms",
            "150",
        ]);
        assert_eq!(
            args.overrides(),
            CliOverrides {
                item_height: Some(6.0),
                buffer: Some(2),
                debounce_ms: Some(150),
            }
        );
    }

    #[test]
    fn test_buffer_rejects_negative() {
        assert!(Args::try_parse_from(["tlv", "--buffer", "-1"]).is_err());
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["tlv", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["tlv", "--config", "/tmp/tlv.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/tlv.toml")));
    }
}
