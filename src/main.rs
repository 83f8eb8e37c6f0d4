//! Tracker CLI: builds the dashboard from config and prints the current view
//! as JSON.
//!
//! Usage: `tracker [commands.json]` where the optional file holds an array of
//! dashboard commands applied in order, e.g.
//! `[{"command":"setRange","dimension":"webTraffic","field":"valueMin","text":"400"}]`.

use std::fs;

use growth_tracker_lib::config::{load_config, TrackerConfig};
use growth_tracker_lib::dashboard::{DashboardCommand, TrackerDashboard};
use growth_tracker_lib::error::TrackerErrorPayload;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("{}; using default config", e);
        TrackerConfig::default()
    });

    let mut dashboard = TrackerDashboard::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to load seed dataset: {e}"))?;

    if let Some(script_path) = std::env::args().nth(1) {
        let script = fs::read_to_string(&script_path)
            .map_err(|e| anyhow::anyhow!("Failed to read {script_path}: {e}"))?;
        let commands: Vec<DashboardCommand> = serde_json::from_str(&script)
            .map_err(|e| anyhow::anyhow!("Failed to parse {script_path}: {e}"))?;

        for command in commands {
            let name = command.name();
            if let Err(e) = dashboard.apply(command) {
                // Rejected commands leave state untouched; report and keep going.
                let payload = TrackerErrorPayload::from(&e);
                log::warn!("{} rejected: {}", name, e);
                eprintln!("{}", serde_json::to_string(&payload)?);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&dashboard.snapshot())?);

    Ok(())
}
