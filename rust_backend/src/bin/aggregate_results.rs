//! Batch aggregation of validation result files.
//!
//! # Usage
//!
//! ```bash
//! aggregate-results results/*.json \
//!     --weights weights.yaml \
//!     --thresholds thresholds.toml \
//!     --output out/summary.json \
//!     --report out/report.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use qa_analytics::config::{load_weights_configuration, ThresholdConfig, WeightsSource};
use qa_analytics::io::ResultLoader;
use qa_analytics::{aggregate_analytics_results, create_summary_report};

#[derive(Debug, Parser)]
#[command(name = "aggregate-results", version, about = "Aggregate QA validation results by audit leader")]
struct Cli {
    /// Result files (JSON or YAML), each holding one document or an array
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Weights configuration (.json, .yaml, .yml or .toml)
    #[arg(long, env = "QA_ANALYTICS_WEIGHTS")]
    weights: Option<PathBuf>,

    /// Threshold configuration (.toml)
    #[arg(long, env = "QA_ANALYTICS_THRESHOLDS")]
    thresholds: Option<PathBuf>,

    /// Where to write the summary document
    #[arg(short, long, default_value = "analytics_summary.json")]
    output: PathBuf,

    /// Also write the leader report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let documents = ResultLoader::load_many(&cli.inputs)?;
    info!(
        "Loaded {} result documents from {} files",
        documents.len(),
        cli.inputs.len()
    );

    let loaded = load_weights_configuration(cli.weights.as_deref());
    match &loaded.source {
        WeightsSource::File(path) => info!("Using weights from {}", path.display()),
        WeightsSource::Fallback { path, reason } => {
            warn!("Ignoring weights file {} ({:?})", path.display(), reason)
        }
        WeightsSource::Defaults => info!("Using default weights"),
    }

    let thresholds = cli
        .thresholds
        .as_deref()
        .map(ThresholdConfig::from_file)
        .transpose()
        .context("Failed to load threshold configuration")?;

    let summary = aggregate_analytics_results(&documents, Some(loaded.weights), thresholds);

    let written = summary
        .export_to_file(&cli.output)
        .context("Failed to write summary")?;
    info!("Summary written to {}", written.display());

    if let Some(report_path) = &cli.report {
        let report = create_summary_report(&summary);
        if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write {}", report_path.display()))?;
        info!("Report written to {}", report_path.display());
    }

    Ok(())
}
