//! Period selection: which quarter, month and fiscal year are on screen, and
//! the growth comparison window picked for each monthly metric.
//!
//! Pure state. Labels are not checked here; an unknown label just makes the
//! side-table lookups miss.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::TrackerConfig;
use crate::types::{GrowthPeriod, MetricDimension};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSelector {
    quarter: String,
    month: String,
    fiscal_year: String,
    growth_periods: BTreeMap<MetricDimension, GrowthPeriod>,
}

impl PeriodSelector {
    pub fn new(
        quarter: impl Into<String>,
        month: impl Into<String>,
        fiscal_year: impl Into<String>,
        growth_period: GrowthPeriod,
    ) -> Self {
        Self {
            quarter: quarter.into(),
            month: month.into(),
            fiscal_year: fiscal_year.into(),
            growth_periods: MetricDimension::ALL
                .into_iter()
                .map(|dim| (dim, growth_period))
                .collect(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(
            config.default_quarter.clone(),
            config.default_month.clone(),
            config.default_fiscal_year.clone(),
            config.default_growth_period,
        )
    }

    pub fn quarter(&self) -> &str {
        &self.quarter
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn fiscal_year(&self) -> &str {
        &self.fiscal_year
    }

    pub fn growth_period(&self, dim: MetricDimension) -> GrowthPeriod {
        self.growth_periods.get(&dim).copied().unwrap_or_default()
    }

    pub fn set_quarter(&mut self, quarter: impl Into<String>) {
        self.quarter = quarter.into();
    }

    pub fn set_month(&mut self, month: impl Into<String>) {
        self.month = month.into();
    }

    pub fn set_fiscal_year(&mut self, fiscal_year: impl Into<String>) {
        self.fiscal_year = fiscal_year.into();
    }

    /// Change the comparison window for one metric; other metrics keep theirs.
    pub fn set_growth_period(&mut self, dim: MetricDimension, period: GrowthPeriod) {
        self.growth_periods.insert(dim, period);
    }
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::from_config(&TrackerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PeriodSelector::default();
        assert_eq!(p.quarter(), "Q4 FY25");
        assert_eq!(p.month(), "Apr 2025");
        assert_eq!(p.fiscal_year(), "FY25");
        for dim in MetricDimension::ALL {
            assert_eq!(p.growth_period(dim), GrowthPeriod::YoY);
        }
    }

    #[test]
    fn test_growth_period_toggle_is_per_metric() {
        let mut p = PeriodSelector::default();
        p.set_growth_period(MetricDimension::WebTraffic, GrowthPeriod::MoM);
        assert_eq!(p.growth_period(MetricDimension::WebTraffic), GrowthPeriod::MoM);
        assert_eq!(p.growth_period(MetricDimension::LinkedinJobs), GrowthPeriod::YoY);
        assert_eq!(p.growth_period(MetricDimension::LinkedinFollowers), GrowthPeriod::YoY);
    }

    #[test]
    fn test_growth_periods_serialize_in_metric_order() {
        let mut p = PeriodSelector::default();
        p.set_growth_period(MetricDimension::WebTraffic, GrowthPeriod::MoM);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(
            r#""growthPeriods":{"linkedinFollowers":"YoY","linkedinHeadcount":"YoY","linkedinJobs":"YoY","webTraffic":"MoM"}"#
        ));
    }

    #[test]
    fn test_unknown_labels_are_accepted() {
        let mut p = PeriodSelector::default();
        p.set_month("Smarch 2025");
        assert_eq!(p.month(), "Smarch 2025");
    }
}
