//! Record store: seed companies, the live (seed + user-added) sequence, and
//! the period-keyed side tables.
//!
//! Side tables are reached only through the id → row mapping built in
//! `from_seed`. Companies appended at runtime never get a row.

use std::collections::{HashMap, HashSet};

use crate::error::TrackerError;
use crate::seed::{validate_seed, SeedDataset};
use crate::types::{
    AnnualFinancials, CompanyRecord, FinancialDimension, GrowthPeriod, Interaction, MetricDimension,
    MetricSet, QuarterlyNotes,
};

#[derive(Debug, Clone)]
pub struct RecordStore {
    seed: Vec<CompanyRecord>,
    records: Vec<CompanyRecord>,
    rows: HashMap<String, usize>,
    ids: HashSet<String>,
    quarters: Vec<String>,
    months: Vec<String>,
    fiscal_years: Vec<String>,
    monthly: HashMap<String, Vec<MetricSet>>,
    growth: HashMap<GrowthPeriod, Vec<MetricSet>>,
    quarterly: HashMap<String, Vec<QuarterlyNotes>>,
    annual: HashMap<String, Vec<AnnualFinancials>>,
    interactions: Vec<Interaction>,
}

impl RecordStore {
    pub fn from_seed(seed: SeedDataset) -> Result<Self, TrackerError> {
        validate_seed(&seed)?;

        let rows: HashMap<String, usize> = seed
            .records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id.clone(), idx))
            .collect();
        let ids = rows.keys().cloned().collect();

        log::info!(
            "Loaded {} seed companies ({} months, {} quarters, {} fiscal years)",
            seed.records.len(),
            seed.months.len(),
            seed.quarters.len(),
            seed.fiscal_years.len()
        );

        Ok(Self {
            records: seed.records.clone(),
            seed: seed.records,
            rows,
            ids,
            quarters: seed.quarters,
            months: seed.months,
            fiscal_years: seed.fiscal_years,
            monthly: seed.monthly,
            growth: seed.growth,
            quarterly: seed.quarterly,
            annual: seed.annual,
            interactions: seed.interactions,
        })
    }

    /// The immutable seed sequence.
    pub fn seed(&self) -> &[CompanyRecord] {
        &self.seed
    }

    /// Seed records followed by every appended record, in insertion order.
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Position of a seed record, which is also its side-table row.
    /// `None` for records added at runtime or unknown ids.
    pub fn resolve_original_index(&self, id: &str) -> Option<usize> {
        self.rows.get(id).copied()
    }

    pub fn quarters(&self) -> &[String] {
        &self.quarters
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn fiscal_years(&self) -> &[String] {
        &self.fiscal_years
    }

    pub fn monthly_metrics(&self, month: &str, row: usize) -> Option<&MetricSet> {
        self.monthly.get(month).and_then(|rows| rows.get(row))
    }

    pub fn growth_metrics(&self, period: GrowthPeriod, row: usize) -> Option<&MetricSet> {
        self.growth.get(&period).and_then(|rows| rows.get(row))
    }

    /// Metric value for a seed row; 0 when the month or row is missing.
    pub fn monthly_value(&self, month: &str, row: usize, dim: MetricDimension) -> f64 {
        self.monthly_metrics(month, row)
            .map(|m| m.get(dim))
            .unwrap_or(0.0)
    }

    /// Growth percentage for a seed row; 0 when the period or row is missing.
    pub fn growth_value(&self, period: GrowthPeriod, row: usize, dim: MetricDimension) -> f64 {
        self.growth_metrics(period, row)
            .map(|m| m.get(dim))
            .unwrap_or(0.0)
    }

    pub fn annual_financials(&self, year: &str, row: usize) -> Option<&AnnualFinancials> {
        self.annual.get(year).and_then(|rows| rows.get(row))
    }

    pub fn annual_value(&self, year: &str, row: usize, dim: FinancialDimension) -> f64 {
        self.annual_financials(year, row)
            .map(|f| f.value(dim))
            .unwrap_or(0.0)
    }

    pub fn annual_growth(&self, year: &str, row: usize, dim: FinancialDimension) -> f64 {
        self.annual_financials(year, row)
            .map(|f| f.growth(dim))
            .unwrap_or(0.0)
    }

    /// Quarterly notes padded to display length, or placeholders on a miss.
    pub fn quarterly_notes(&self, quarter: &str, row: usize) -> QuarterlyNotes {
        self.quarterly
            .get(quarter)
            .and_then(|rows| rows.get(row))
            .map(QuarterlyNotes::normalized)
            .unwrap_or_else(QuarterlyNotes::placeholder)
    }

    pub fn interaction(&self, row: usize) -> Option<&Interaction> {
        self.interactions.get(row)
    }

    /// Append a record to the live sequence. Side tables are untouched.
    pub(crate) fn append(&mut self, record: CompanyRecord) {
        self.ids.insert(record.id.clone());
        self.records.push(record);
    }
}
