//! Filter evaluation over the live company sequence.
//!
//! A record passes when it survives every active check, in this order:
//! 1. categorical equality (exact, case-sensitive)
//! 2. side-table row resolution: companies with no row (added at runtime)
//!    pass every remaining numeric check unconditionally
//! 3. each numeric dimension's value bounds at the selected month/year
//! 4. each numeric dimension's growth bounds, monthly metrics using their own
//!    comparison window
//!
//! Seed rows with no entry for the selected period read as 0 and are filtered
//! on that 0. The output keeps the input order.

use crate::filters::{RangeFilter, RangeFilterSet};
use crate::period::PeriodSelector;
use crate::store::RecordStore;
use crate::types::{CompanyRecord, NumericDimension};

pub fn evaluate(
    store: &RecordStore,
    records: &[CompanyRecord],
    filters: &RangeFilterSet,
    periods: &PeriodSelector,
) -> Vec<CompanyRecord> {
    if !filters.has_active_filters() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| passes(store, r, filters, periods))
        .cloned()
        .collect()
}

pub fn passes(
    store: &RecordStore,
    record: &CompanyRecord,
    filters: &RangeFilterSet,
    periods: &PeriodSelector,
) -> bool {
    for (dim, wanted) in filters.active_categorical() {
        if dim.field(record) != wanted {
            return false;
        }
    }

    let Some(row) = store.resolve_original_index(&record.id) else {
        return true;
    };

    filters
        .active_ranges()
        .all(|(dim, range)| passes_range(store, row, dim, range, periods))
}

fn passes_range(
    store: &RecordStore,
    row: usize,
    dim: NumericDimension,
    range: &RangeFilter,
    periods: &PeriodSelector,
) -> bool {
    let value_bounds = range.value_bounds();
    if !value_bounds.is_unbounded() && !value_bounds.contains(numeric_value(store, row, dim, periods)) {
        return false;
    }
    let growth_bounds = range.growth_bounds();
    if !growth_bounds.is_unbounded() && !growth_bounds.contains(numeric_growth(store, row, dim, periods)) {
        return false;
    }
    true
}

/// The value a dimension shows for a seed row under the current periods.
pub fn numeric_value(
    store: &RecordStore,
    row: usize,
    dim: NumericDimension,
    periods: &PeriodSelector,
) -> f64 {
    match dim {
        NumericDimension::Metric(m) => store.monthly_value(periods.month(), row, m),
        NumericDimension::Financial(f) => store.annual_value(periods.fiscal_year(), row, f),
    }
}

/// The growth percentage a dimension shows for a seed row.
pub fn numeric_growth(
    store: &RecordStore,
    row: usize,
    dim: NumericDimension,
    periods: &PeriodSelector,
) -> f64 {
    match dim {
        NumericDimension::Metric(m) => store.growth_value(periods.growth_period(m), row, m),
        NumericDimension::Financial(f) => store.annual_growth(periods.fiscal_year(), row, f),
    }
}
