//! Growth tracker core: the seed company dataset, period-keyed side tables,
//! and the filter engine behind the portfolio dashboard.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod evaluator;
pub mod filters;
pub mod format;
pub mod latency;
pub mod mutation;
pub mod period;
pub mod seed;
pub mod store;
pub mod types;
