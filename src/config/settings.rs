//! User settings for the expense ledger
//!
//! Manages display preferences and the per-view search configuration.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::reports::{ReportGrouping, SearchFields};
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Grouping used by `report` when none is given
    #[serde(default)]
    pub default_grouping: ReportGrouping,

    /// Fields searched by the expense table view
    #[serde(default = "default_table_search_fields")]
    pub table_search_fields: SearchFields,

    /// Fields searched by the simple list view
    #[serde(default = "default_list_search_fields")]
    pub list_search_fields: SearchFields,

    /// Number of recent expenses on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Width of report bar charts, in characters
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_table_search_fields() -> SearchFields {
    SearchFields::DESCRIPTION_AND_CATEGORY
}

fn default_list_search_fields() -> SearchFields {
    SearchFields::NAME_ONLY
}

fn default_recent_count() -> usize {
    3
}

fn default_chart_width() -> usize {
    40
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_grouping: ReportGrouping::default(),
            table_search_fields: default_table_search_fields(),
            list_search_fields: default_list_search_fields(),
            recent_count: default_recent_count(),
            chart_width: default_chart_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        read_json_required(&settings_path).map_err(|e| {
            ExpenseError::Config(format!("Failed to load settings file: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.default_grouping, ReportGrouping::ByCategory);
        assert_eq!(settings.table_search_fields, SearchFields::DESCRIPTION_AND_CATEGORY);
        assert_eq!(settings.list_search_fields, SearchFields::NAME_ONLY);
        assert_eq!(settings.recent_count, 3);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_grouping: ReportGrouping::ByWeek,
            currency_symbol: "$".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_grouping, ReportGrouping::ByWeek);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"default_grouping": "by_month"}"#).unwrap();
        assert_eq!(loaded.default_grouping, ReportGrouping::ByMonth);
        assert_eq!(loaded.chart_width, 40);
        assert_eq!(loaded.list_search_fields, SearchFields::NAME_ONLY);
    }

    #[test]
    fn test_corrupt_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
