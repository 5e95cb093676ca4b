//! Dashboard configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vv_core::{AlertStatus, CategoryFilter, FilterParseError, FilterSelection};
use vv_payload::DEFAULT_ELEMENT;
use vv_pivot::DEFAULT_DOMAIN_PADDING;

use crate::error::AppResult;
use crate::view::ViewMode;

pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data matches the selected filters";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Startup settings for a dashboard session. Every field has a default, so
/// an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub initial_view: ViewMode,
    /// `all` or a category value.
    pub category: String,
    /// `all`, `alerts` or `normal`.
    pub alert_status: String,
    /// Envelope element holding the base64 text.
    pub data_element: String,
    /// Fraction of the value span added around each chart domain.
    pub domain_padding: f64,
    pub no_data_message: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewMode::Grid,
            category: "all".to_string(),
            alert_status: "all".to_string(),
            data_element: DEFAULT_ELEMENT.to_string(),
            domain_padding: DEFAULT_DOMAIN_PADDING,
            no_data_message: DEFAULT_NO_DATA_MESSAGE.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.domain_padding.is_finite() || self.domain_padding < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "domain_padding",
                value: self.domain_padding.to_string(),
                reason: "must be a finite, non-negative fraction".to_string(),
            });
        }

        if self.data_element.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data_element",
                value: self.data_element.clone(),
                reason: "element name must not be empty".to_string(),
            });
        }

        self.selection()?;
        Ok(())
    }

    /// Initial filter selection described by this config.
    pub fn selection(&self) -> Result<FilterSelection, ConfigError> {
        let category = self
            .category
            .parse::<CategoryFilter>()
            .map_err(|e| invalid_filter("category", &self.category, e))?;
        let alert_status = self
            .alert_status
            .parse::<AlertStatus>()
            .map_err(|e| invalid_filter("alert_status", &self.alert_status, e))?;
        Ok(FilterSelection {
            category,
            alert_status,
        })
    }
}

fn invalid_filter(field: &'static str, value: &str, err: FilterParseError) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        value: value.to_string(),
        reason: err.to_string(),
    }
}

/// Load and validate a config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<DashboardConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(DashboardConfig::from_yaml(&content)?)
}
