//! Seed dataset: the fixed company list and its period-keyed side tables.
//!
//! The default dataset is embedded at compile time. Side-table rows are
//! aligned to the order of `records`; `RecordStore` turns that alignment into
//! an explicit id → row mapping once, at load.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::types::{AnnualFinancials, CompanyRecord, GrowthPeriod, Interaction, MetricSet, QuarterlyNotes};

const EMBEDDED_SEED: &str = include_str!("../fixtures/seed.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDataset {
    pub records: Vec<CompanyRecord>,
    /// Selectable quarter labels in display order.
    #[serde(default)]
    pub quarters: Vec<String>,
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub fiscal_years: Vec<String>,
    #[serde(default)]
    pub monthly: HashMap<String, Vec<MetricSet>>,
    #[serde(default)]
    pub growth: HashMap<GrowthPeriod, Vec<MetricSet>>,
    #[serde(default)]
    pub quarterly: HashMap<String, Vec<QuarterlyNotes>>,
    #[serde(default)]
    pub annual: HashMap<String, Vec<AnnualFinancials>>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Parse and validate the seed dataset compiled into the crate.
pub fn embedded_seed() -> Result<SeedDataset, TrackerError> {
    parse_seed(EMBEDDED_SEED)
}

/// Load a seed dataset from a JSON file.
pub fn load_seed_from_path(path: &Path) -> Result<SeedDataset, TrackerError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TrackerError::Io(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    parse_seed(&content)
}

pub fn parse_seed(json: &str) -> Result<SeedDataset, TrackerError> {
    let seed: SeedDataset =
        serde_json::from_str(json).map_err(|e| TrackerError::SeedParse(e.to_string()))?;
    validate_seed(&seed)?;
    Ok(seed)
}

/// Check ids are unique and every side table covers every seed record.
///
/// Tables may list periods that are not in the selectable label lists; those
/// rows are simply never reached.
pub fn validate_seed(seed: &SeedDataset) -> Result<(), TrackerError> {
    let mut seen = HashSet::new();
    for record in &seed.records {
        if record.id.trim().is_empty() {
            return Err(TrackerError::SeedInvariant(format!(
                "record '{}' has an empty id",
                record.name
            )));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(TrackerError::SeedInvariant(format!(
                "duplicate record id '{}'",
                record.id
            )));
        }
    }

    let needed = seed.records.len();
    let short = |table: &str, period: &str, len: usize| {
        TrackerError::SeedInvariant(format!(
            "{} table '{}' has {} rows, expected at least {}",
            table, period, len, needed
        ))
    };

    for (period, rows) in &seed.monthly {
        if rows.len() < needed {
            return Err(short("monthly", period, rows.len()));
        }
    }
    for (period, rows) in &seed.growth {
        if rows.len() < needed {
            return Err(short("growth", period.as_str(), rows.len()));
        }
    }
    for (period, rows) in &seed.quarterly {
        if rows.len() < needed {
            return Err(short("quarterly", period, rows.len()));
        }
    }
    for (period, rows) in &seed.annual {
        if rows.len() < needed {
            return Err(short("annual", period, rows.len()));
        }
    }
    if !seed.interactions.is_empty() && seed.interactions.len() < needed {
        return Err(short("interaction", "-", seed.interactions.len()));
    }
    Ok(())
}
