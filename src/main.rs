//! dose-trace - resolve the dispensing offsets of a KRL program to absolute positions.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dose_core::{build_plan, export_json, render_offsets_report, validate_plan, Config, TracingSink};

/// Environment variable holding the configuration path.
const CONFIG_ENV: &str = "DOSE_TRACE_CONFIG";
const DEFAULT_CONFIG: &str = "config.json";

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    info!("Processing: {}", config.src_path.display());

    let program = std::fs::read_to_string(&config.src_path)
        .with_context(|| format!("Failed to read {}", config.src_path.display()))?;
    let data = std::fs::read_to_string(&config.dat_path)
        .with_context(|| format!("Failed to read {}", config.dat_path.display()))?;

    let plan = build_plan(&program, &data, &config.naming, &mut TracingSink)
        .with_context(|| format!("Failed to resolve {}", config.src_path.display()))?;

    // Validate
    let validation = validate_plan(&plan);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    let stats = plan.stats();
    info!(
        "Resolved {} offset(s) (group A: {}, group B: {}), {} position(s), {} trajectory point(s)",
        stats.total_offsets,
        stats.group_a_count,
        stats.group_b_count,
        stats.total_positions,
        stats.trajectory_points
    );

    // Write output
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let export_path = config.export_path();
    std::fs::write(&export_path, export_json(&plan)?)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;
    info!("Generated: {}", export_path.display());

    let report_path = config.report_path();
    std::fs::write(&report_path, render_offsets_report(&plan, &config.naming)?)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    info!("Generated: {}", report_path.display());

    Ok(())
}
