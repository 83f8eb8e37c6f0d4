//! Configuration stored in ~/.growth-tracker/config.json
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Only malformed JSON is reported as an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::types::GrowthPeriod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    #[serde(default = "default_quarter")]
    pub default_quarter: String,
    #[serde(default = "default_month")]
    pub default_month: String,
    #[serde(default = "default_fiscal_year")]
    pub default_fiscal_year: String,
    #[serde(default)]
    pub default_growth_period: GrowthPeriod,
    /// Alternate seed dataset. The embedded dataset is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<String>,
    /// Recompute latency budget; slower recomputes count as violations.
    #[serde(default = "default_recompute_budget_ms")]
    pub recompute_budget_ms: u64,
}

fn default_quarter() -> String {
    "Q4 FY25".to_string()
}

fn default_month() -> String {
    "Apr 2025".to_string()
}

fn default_fiscal_year() -> String {
    "FY25".to_string()
}

fn default_recompute_budget_ms() -> u64 {
    5
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_quarter: default_quarter(),
            default_month: default_month(),
            default_fiscal_year: default_fiscal_year(),
            default_growth_period: GrowthPeriod::default(),
            seed_path: None,
            recompute_budget_ms: default_recompute_budget_ms(),
        }
    }
}

/// ~/.growth-tracker/config.json, if a home directory can be found.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".growth-tracker").join("config.json"))
}

/// Load configuration from the default location.
pub fn load_config() -> Result<TrackerConfig, TrackerError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            log::warn!("Could not find home directory; using default config");
            Ok(TrackerConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<TrackerConfig, TrackerError> {
    if !path.exists() {
        log::debug!("No config at {}; using defaults", path.display());
        return Ok(TrackerConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| TrackerError::Config(format!("Failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| TrackerError::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.default_growth_period, GrowthPeriod::YoY);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"defaultMonth":"Mar 2025","defaultGrowthPeriod":"QoQ"}"#).unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_month, "Mar 2025");
        assert_eq!(config.default_growth_period, GrowthPeriod::QoQ);
        assert_eq!(config.default_quarter, "Q4 FY25");
        assert_eq!(config.recompute_budget_ms, 5);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ defaultMonth: ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
