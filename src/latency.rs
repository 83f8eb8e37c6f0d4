//! Recompute timing for one dashboard session.
//!
//! Each command that triggers a recompute adds one sample under its command
//! name. Windows are bounded, so a long session keeps a fixed footprint.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;

const MAX_SAMPLES_PER_COMMAND: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeRollup {
    pub command: String,
    pub sample_count: usize,
    pub p50_us: u128,
    pub p95_us: u128,
    pub max_us: u128,
    pub over_budget: u64,
    pub last_recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct CommandWindow {
    samples_us: VecDeque<u128>,
    over_budget: u64,
    last_recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct RecomputeTimer {
    budget_us: u128,
    windows: BTreeMap<String, CommandWindow>,
}

impl RecomputeTimer {
    pub fn new(budget_ms: u64) -> Self {
        Self {
            budget_us: u128::from(budget_ms) * 1_000,
            windows: BTreeMap::new(),
        }
    }

    pub fn budget_us(&self) -> u128 {
        self.budget_us
    }

    pub fn record(&mut self, command: &str, elapsed_us: u128) {
        let window = self.windows.entry(command.to_string()).or_default();
        if elapsed_us > self.budget_us {
            window.over_budget += 1;
            log::warn!(
                "{} recompute took {}us (budget {}us)",
                command,
                elapsed_us,
                self.budget_us
            );
        }
        if window.samples_us.len() >= MAX_SAMPLES_PER_COMMAND {
            window.samples_us.pop_front();
        }
        window.samples_us.push_back(elapsed_us);
        window.last_recorded_at = Some(Utc::now());
    }

    /// One rollup per command, in command-name order.
    pub fn rollups(&self) -> Vec<RecomputeRollup> {
        self.windows
            .iter()
            .map(|(command, window)| {
                let mut values: Vec<u128> = window.samples_us.iter().copied().collect();
                values.sort_unstable();
                RecomputeRollup {
                    command: command.clone(),
                    sample_count: values.len(),
                    p50_us: percentile(&values, 50.0).unwrap_or(0),
                    p95_us: percentile(&values, 95.0).unwrap_or(0),
                    max_us: values.last().copied().unwrap_or(0),
                    over_budget: window.over_budget,
                    last_recorded_at: window.last_recorded_at.map(|dt| dt.to_rfc3339()),
                }
            })
            .collect()
    }
}

fn percentile(sorted: &[u128], p: f64) -> Option<u128> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    Some(sorted[rank.saturating_sub(1).min(n - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_small_samples() {
        assert_eq!(percentile(&[], 95.0), None);
        let values = vec![10_u128, 20, 30];
        assert_eq!(percentile(&values, 50.0), Some(20));
        assert_eq!(percentile(&values, 95.0), Some(30));
    }

    #[test]
    fn test_window_is_bounded() {
        let mut timer = RecomputeTimer::new(5);
        for us in 1..=300 {
            timer.record("set_range", us);
        }
        let rollups = timer.rollups();
        assert_eq!(rollups[0].sample_count, MAX_SAMPLES_PER_COMMAND);
        assert_eq!(rollups[0].max_us, 300);
        assert_eq!(rollups[0].over_budget, 0);
    }

    #[test]
    fn test_over_budget_counts_only_strict_excess() {
        let mut timer = RecomputeTimer::new(1);
        timer.record("select_month", 1_000);
        timer.record("select_month", 1_001);
        timer.record("add_company", 1);

        let rollups = timer.rollups();
        let names: Vec<&str> = rollups.iter().map(|r| r.command.as_str()).collect();
        assert_eq!(names, vec!["add_company", "select_month"]);
        assert_eq!(rollups[1].over_budget, 1);
        assert_eq!(rollups[0].over_budget, 0);
    }
}
