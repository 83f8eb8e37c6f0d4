//! Tracker dashboard: owns the live companies, filter state and period state.
//!
//! Every command mutates state and then recomputes the filtered view from
//! scratch, so `view()` is always consistent with the current inputs.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::evaluator::{evaluate, numeric_growth, numeric_value};
use crate::filters::{FilterChip, RangeFilterSet};
use crate::format::{fmt_growth, fmt_millions, fmt_num, is_positive, EMPTY_CELL};
use crate::latency::{RecomputeRollup, RecomputeTimer};
use crate::mutation::{add_company, NewCompanyForm};
use crate::period::PeriodSelector;
use crate::seed::{embedded_seed, load_seed_from_path};
use crate::store::RecordStore;
use crate::types::{
    CategoricalDimension, CompanyRecord, FinancialDimension, GrowthPeriod, Interaction,
    MetricDimension, NumericDimension, QuarterlyNotes, RangeField,
};

pub const DASHBOARD_TITLE: &str = "Growth Equity Fund Tracker";
pub const DASHBOARD_SUBTITLE: &str = "Portfolio intelligence & company monitoring dashboard";
pub const NO_MATCHES_MESSAGE: &str = "No companies match the active filters.";

/// A user command against the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum DashboardCommand {
    SelectQuarter {
        quarter: String,
    },
    SelectMonth {
        month: String,
    },
    #[serde(rename_all = "camelCase")]
    SelectFiscalYear {
        fiscal_year: String,
    },
    SetGrowthPeriod {
        metric: MetricDimension,
        period: GrowthPeriod,
    },
    SetCategorical {
        dimension: CategoricalDimension,
        #[serde(default)]
        value: Option<String>,
    },
    SetRange {
        dimension: NumericDimension,
        field: RangeField,
        #[serde(default)]
        text: String,
    },
    ClearAllFilters,
    AddCompany {
        form: NewCompanyForm,
    },
}

impl DashboardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardCommand::SelectQuarter { .. } => "select_quarter",
            DashboardCommand::SelectMonth { .. } => "select_month",
            DashboardCommand::SelectFiscalYear { .. } => "select_fiscal_year",
            DashboardCommand::SetGrowthPeriod { .. } => "set_growth_period",
            DashboardCommand::SetCategorical { .. } => "set_categorical",
            DashboardCommand::SetRange { .. } => "set_range",
            DashboardCommand::ClearAllFilters => "clear_all_filters",
            DashboardCommand::AddCompany { .. } => "add_company",
        }
    }
}

/// The filtered, ordered companies plus what the toolbar needs to know.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    pub records: Vec<CompanyRecord>,
    pub shown: usize,
    pub total: usize,
    pub has_active_filters: bool,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Message for the empty table, which always comes with a clear-all action.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_MATCHES_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCell {
    pub metric: MetricDimension,
    pub growth_period: GrowthPeriod,
    pub value: Option<f64>,
    pub display: String,
    pub growth: Option<f64>,
    pub growth_display: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialCell {
    pub dimension: FinancialDimension,
    pub value: Option<f64>,
    pub display: String,
    pub growth: Option<f64>,
    pub growth_display: String,
    pub positive: bool,
}

/// Everything the table shows for one company under the current periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRow {
    pub company: CompanyRecord,
    /// False for companies added at runtime, which have no side-table data.
    pub has_history: bool,
    pub metrics: Vec<MetricCell>,
    pub quarterly: QuarterlyNotes,
    pub financials: Vec<FinancialCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolbar {
    pub shown: usize,
    pub total: usize,
    pub summary: String,
    pub chips: Vec<FilterChip>,
    pub show_clear_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHeader {
    pub title: String,
    pub subtitle: String,
    pub company_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub header: DashboardHeader,
    pub toolbar: Toolbar,
    pub periods: PeriodSelector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub rows: Vec<TrackerRow>,
    pub recompute_timings: Vec<RecomputeRollup>,
}

pub struct TrackerDashboard {
    store: RecordStore,
    periods: PeriodSelector,
    filters: RangeFilterSet,
    view: FilteredView,
    timer: RecomputeTimer,
}

impl TrackerDashboard {
    pub fn new(store: RecordStore, periods: PeriodSelector) -> Self {
        Self::with_budget(store, periods, TrackerConfig::default().recompute_budget_ms)
    }

    fn with_budget(store: RecordStore, periods: PeriodSelector, budget_ms: u64) -> Self {
        let mut dashboard = Self {
            store,
            periods,
            filters: RangeFilterSet::new(),
            view: FilteredView {
                records: Vec::new(),
                shown: 0,
                total: 0,
                has_active_filters: false,
            },
            timer: RecomputeTimer::new(budget_ms),
        };
        dashboard.recompute("load");
        dashboard
    }

    /// Build from config: the configured seed file or the embedded dataset,
    /// with the configured default periods.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let seed = match config.seed_path.as_deref() {
            Some(path) => load_seed_from_path(std::path::Path::new(path))?,
            None => embedded_seed()?,
        };
        let store = RecordStore::from_seed(seed)?;
        Ok(Self::with_budget(
            store,
            PeriodSelector::from_config(config),
            config.recompute_budget_ms,
        ))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn periods(&self) -> &PeriodSelector {
        &self.periods
    }

    pub fn filters(&self) -> &RangeFilterSet {
        &self.filters
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn select_quarter(&mut self, quarter: impl Into<String>) {
        let quarter = quarter.into();
        warn_if_unknown("quarter", &quarter, self.store.quarters());
        self.periods.set_quarter(quarter);
        self.recompute("select_quarter");
    }

    pub fn select_month(&mut self, month: impl Into<String>) {
        let month = month.into();
        warn_if_unknown("month", &month, self.store.months());
        self.periods.set_month(month);
        self.recompute("select_month");
    }

    pub fn select_fiscal_year(&mut self, fiscal_year: impl Into<String>) {
        let fiscal_year = fiscal_year.into();
        warn_if_unknown("fiscal year", &fiscal_year, self.store.fiscal_years());
        self.periods.set_fiscal_year(fiscal_year);
        self.recompute("select_fiscal_year");
    }

    pub fn set_growth_period(&mut self, metric: MetricDimension, period: GrowthPeriod) {
        self.periods.set_growth_period(metric, period);
        self.recompute("set_growth_period");
    }

    pub fn set_categorical(&mut self, dim: CategoricalDimension, value: Option<String>) {
        self.filters.set_categorical(dim, value);
        self.recompute("set_categorical");
    }

    pub fn set_range(&mut self, dim: impl Into<NumericDimension>, field: RangeField, text: impl Into<String>) {
        self.filters.set_range(dim.into(), field, text);
        self.recompute("set_range");
    }

    pub fn clear_all_filters(&mut self) {
        self.filters.clear_all();
        self.recompute("clear_all_filters");
    }

    /// Add a company from the form. On a validation error nothing changes.
    pub fn add_company(&mut self, form: &NewCompanyForm) -> Result<CompanyRecord, TrackerError> {
        let record = add_company(&mut self.store, form)?;
        self.recompute("add_company");
        Ok(record)
    }

    pub fn apply(&mut self, command: DashboardCommand) -> Result<(), TrackerError> {
        log::debug!("Applying {}", command.name());
        match command {
            DashboardCommand::SelectQuarter { quarter } => self.select_quarter(quarter),
            DashboardCommand::SelectMonth { month } => self.select_month(month),
            DashboardCommand::SelectFiscalYear { fiscal_year } => self.select_fiscal_year(fiscal_year),
            DashboardCommand::SetGrowthPeriod { metric, period } => self.set_growth_period(metric, period),
            DashboardCommand::SetCategorical { dimension, value } => self.set_categorical(dimension, value),
            DashboardCommand::SetRange { dimension, field, text } => self.set_range(dimension, field, text),
            DashboardCommand::ClearAllFilters => self.clear_all_filters(),
            DashboardCommand::AddCompany { form } => {
                self.add_company(&form)?;
            }
        }
        Ok(())
    }

    fn recompute(&mut self, command: &str) {
        let started = Instant::now();
        let records = evaluate(&self.store, self.store.records(), &self.filters, &self.periods);
        self.view = FilteredView {
            shown: records.len(),
            total: self.store.len(),
            has_active_filters: self.filters.has_active_filters(),
            records,
        };
        let elapsed_us = started.elapsed().as_micros();
        self.timer.record(command, elapsed_us);
        log::debug!(
            "{}: showing {} of {} companies ({}us)",
            command,
            self.view.shown,
            self.view.total,
            elapsed_us
        );
    }

    // =========================================================================
    // Display
    // =========================================================================

    pub fn rows(&self) -> Vec<TrackerRow> {
        self.view.records.iter().map(|r| self.row_for(r)).collect()
    }

    fn row_for(&self, company: &CompanyRecord) -> TrackerRow {
        let row = self.store.resolve_original_index(&company.id);

        let metrics = MetricDimension::ALL
            .into_iter()
            .map(|metric| {
                let dim = NumericDimension::Metric(metric);
                let value = row.map(|r| numeric_value(&self.store, r, dim, &self.periods));
                let growth = row.map(|r| numeric_growth(&self.store, r, dim, &self.periods));
                MetricCell {
                    metric,
                    growth_period: self.periods.growth_period(metric),
                    value,
                    display: fmt_num(value),
                    growth,
                    growth_display: growth.map(fmt_growth).unwrap_or_else(|| EMPTY_CELL.to_string()),
                    positive: growth.map_or(true, is_positive),
                }
            })
            .collect();

        let financials = FinancialDimension::ALL
            .into_iter()
            .map(|fin| {
                let dim = NumericDimension::Financial(fin);
                let value = row.map(|r| numeric_value(&self.store, r, dim, &self.periods));
                let growth = row.map(|r| numeric_growth(&self.store, r, dim, &self.periods));
                FinancialCell {
                    dimension: fin,
                    value,
                    display: fmt_millions(value),
                    growth,
                    growth_display: growth.map(fmt_growth).unwrap_or_else(|| EMPTY_CELL.to_string()),
                    positive: growth.map_or(true, is_positive),
                }
            })
            .collect();

        TrackerRow {
            company: company.clone(),
            has_history: row.is_some(),
            metrics,
            quarterly: row
                .map(|r| self.store.quarterly_notes(self.periods.quarter(), r))
                .unwrap_or_else(QuarterlyNotes::placeholder),
            financials,
            interaction: row.and_then(|r| self.store.interaction(r)).cloned(),
        }
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar {
            shown: self.view.shown,
            total: self.view.total,
            summary: format!("Showing {} of {} companies", self.view.shown, self.view.total),
            chips: self.filters.active_chips(),
            show_clear_all: self.view.has_active_filters,
        }
    }

    pub fn header(&self) -> DashboardHeader {
        DashboardHeader {
            title: DASHBOARD_TITLE.to_string(),
            subtitle: DASHBOARD_SUBTITLE.to_string(),
            company_count: self.store.len(),
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            header: self.header(),
            toolbar: self.toolbar(),
            periods: self.periods.clone(),
            empty_message: self.view.empty_message().map(str::to_string),
            rows: self.rows(),
            recompute_timings: self.timer.rollups(),
        }
    }
}

fn warn_if_unknown(kind: &str, label: &str, known: &[String]) {
    if !known.iter().any(|k| k == label) {
        log::warn!("Unknown {} '{}'; lookups will fall back to defaults", kind, label);
    }
}
