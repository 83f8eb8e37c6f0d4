//! Range filter set: categorical equality filters and min/max text bounds on
//! each numeric dimension's value and growth percentage.
//!
//! Inputs are stored exactly as typed. They are only read as numbers when a
//! filter is evaluated, and anything that does not parse is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{CategoricalDimension, Dimension, NumericDimension, RangeField};

/// Raw min/max inputs for one numeric dimension. Empty means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeFilter {
    pub value_min: String,
    pub value_max: String,
    pub growth_min: String,
    pub growth_max: String,
}

impl RangeFilter {
    pub fn is_active(&self) -> bool {
        !self.value_min.is_empty()
            || !self.value_max.is_empty()
            || !self.growth_min.is_empty()
            || !self.growth_max.is_empty()
    }

    pub fn get(&self, field: RangeField) -> &str {
        match field {
            RangeField::ValueMin => &self.value_min,
            RangeField::ValueMax => &self.value_max,
            RangeField::GrowthMin => &self.growth_min,
            RangeField::GrowthMax => &self.growth_max,
        }
    }

    pub fn set(&mut self, field: RangeField, text: impl Into<String>) {
        let slot = match field {
            RangeField::ValueMin => &mut self.value_min,
            RangeField::ValueMax => &mut self.value_max,
            RangeField::GrowthMin => &mut self.growth_min,
            RangeField::GrowthMax => &mut self.growth_max,
        };
        *slot = text.into();
    }

    pub fn value_bounds(&self) -> Bounds {
        Bounds::parse(&self.value_min, &self.value_max)
    }

    pub fn growth_bounds(&self) -> Bounds {
        Bounds::parse(&self.growth_min, &self.growth_max)
    }
}

/// Parsed numeric bounds. A `None` side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn parse(min: &str, max: &str) -> Self {
        Self {
            min: parse_bound(min),
            max: parse_bound(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive on both sides.
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// Read a bound typed by the user. Blank or non-numeric text is `None`.
pub fn parse_bound(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Label/value pair for an active categorical filter, shown in the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChip {
    pub dimension: CategoricalDimension,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeFilterSet {
    categorical: HashMap<CategoricalDimension, String>,
    ranges: HashMap<NumericDimension, RangeFilter>,
}

impl RangeFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a label for a categorical dimension. `None` or an empty string
    /// removes the filter.
    pub fn set_categorical(&mut self, dim: CategoricalDimension, value: Option<String>) {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                self.categorical.insert(dim, v);
            }
            None => {
                self.categorical.remove(&dim);
            }
        }
    }

    pub fn categorical(&self, dim: CategoricalDimension) -> Option<&str> {
        self.categorical.get(&dim).map(String::as_str)
    }

    /// Store one raw range input verbatim.
    pub fn set_range(&mut self, dim: NumericDimension, field: RangeField, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            if let Some(filter) = self.ranges.get_mut(&dim) {
                filter.set(field, text);
                if !filter.is_active() {
                    self.ranges.remove(&dim);
                }
            }
            return;
        }
        self.ranges.entry(dim).or_default().set(field, text);
    }

    pub fn range(&self, dim: NumericDimension) -> Option<&RangeFilter> {
        self.ranges.get(&dim)
    }

    /// Reset every categorical and range input to unconstrained.
    pub fn clear_all(&mut self) {
        self.categorical.clear();
        self.ranges.clear();
    }

    pub fn is_active(&self, dim: impl Into<Dimension>) -> bool {
        match dim.into() {
            Dimension::Categorical(c) => self.categorical.contains_key(&c),
            Dimension::Numeric(n) => self.ranges.get(&n).is_some_and(RangeFilter::is_active),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.categorical.is_empty() || self.ranges.values().any(RangeFilter::is_active)
    }

    /// Active categorical filters in fixed dimension order.
    pub fn active_categorical(&self) -> impl Iterator<Item = (CategoricalDimension, &str)> {
        CategoricalDimension::ALL
            .into_iter()
            .filter_map(move |dim| self.categorical(dim).map(|v| (dim, v)))
    }

    /// Active range filters in fixed dimension order.
    pub fn active_ranges(&self) -> impl Iterator<Item = (NumericDimension, &RangeFilter)> {
        NumericDimension::all().filter_map(move |dim| {
            self.ranges
                .get(&dim)
                .filter(|f| f.is_active())
                .map(|f| (dim, f))
        })
    }

    pub fn active_chips(&self) -> Vec<FilterChip> {
        self.active_categorical()
            .map(|(dim, value)| FilterChip {
                dimension: dim,
                label: dim.label().to_string(),
                value: value.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinancialDimension, MetricDimension};

    const TRAFFIC: NumericDimension = NumericDimension::Metric(MetricDimension::WebTraffic);

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("   "), None);
        assert_eq!(parse_bound("400"), Some(400.0));
        assert_eq!(parse_bound("-12.5"), Some(-12.5));
        assert_eq!(parse_bound(" 1e3 "), Some(1000.0));
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("12abc"), None);
        assert_eq!(parse_bound("inf"), None);
        assert_eq!(parse_bound("NaN"), None);
    }

    #[test]
    fn test_non_finite_and_radix_bounds_are_ignored() {
        assert_eq!(parse_bound("Infinity"), None);
        assert_eq!(parse_bound("-Infinity"), None);
        assert_eq!(parse_bound("0x10"), None);
        assert_eq!(parse_bound(" \t "), None);
        assert!(Bounds::parse("", "-Infinity").is_unbounded());
    }

    #[test]
    fn test_bounds_inclusive_and_independent() {
        let both = Bounds::parse("10", "20");
        assert!(both.contains(10.0));
        assert!(both.contains(20.0));
        assert!(!both.contains(9.99));
        assert!(!both.contains(20.01));

        let min_only = Bounds::parse("10", "");
        assert!(min_only.contains(1e12));
        assert!(!min_only.contains(0.0));

        let max_only = Bounds::parse("", "10");
        assert!(max_only.contains(-1e12));

        let garbage = Bounds::parse("x", "y");
        assert!(garbage.is_unbounded());
        assert!(garbage.contains(f64::MAX));
    }

    #[test]
    fn test_set_range_stores_raw_text() {
        let mut set = RangeFilterSet::new();
        set.set_range(TRAFFIC, RangeField::ValueMin, "not a number");
        assert_eq!(set.range(TRAFFIC).unwrap().value_min, "not a number");
        assert!(set.is_active(TRAFFIC));
        assert!(set.range(TRAFFIC).unwrap().value_bounds().is_unbounded());
    }

    #[test]
    fn test_clearing_last_field_deactivates_dimension() {
        let mut set = RangeFilterSet::new();
        set.set_range(TRAFFIC, RangeField::GrowthMax, "50");
        set.set_range(TRAFFIC, RangeField::GrowthMax, "");
        assert!(!set.is_active(TRAFFIC));
        assert!(!set.has_active_filters());
    }

    #[test]
    fn test_categorical_empty_string_is_no_filter() {
        let mut set = RangeFilterSet::new();
        set.set_categorical(CategoricalDimension::Sector, Some("Fintech".into()));
        assert!(set.is_active(CategoricalDimension::Sector));
        set.set_categorical(CategoricalDimension::Sector, Some(String::new()));
        assert!(!set.is_active(CategoricalDimension::Sector));
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut set = RangeFilterSet::new();
        set.set_categorical(CategoricalDimension::Category, Some("Watchlist".into()));
        set.set_range(FinancialDimension::Revenue.into(), RangeField::ValueMax, "100");
        assert!(set.has_active_filters());
        set.clear_all();
        assert!(!set.has_active_filters());
        assert_eq!(set, RangeFilterSet::default());
    }

    #[test]
    fn test_active_chips_in_fixed_order() {
        let mut set = RangeFilterSet::new();
        set.set_categorical(CategoricalDimension::RevenueRange, Some("$250M+".into()));
        set.set_categorical(CategoricalDimension::Sector, Some("SaaS".into()));
        let chips = set.active_chips();
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].label, "Sector");
        assert_eq!(chips[0].value, "SaaS");
        assert_eq!(chips[1].label, "Revenue");
    }
}
