//! Dashboard report command.
//!
//! Loads a session CSV, computes the snapshot for one tier and renders it as
//! a Markdown dashboard and/or a JSON snapshot.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use tracing::info;

use crate::analytics::{compute_snapshot, report};
use crate::config::Config;
use crate::ingest;
use crate::tier::Tier;
use crate::{Error, Result};

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
    Both,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "both" => Ok(OutputFormat::Both),
            other => Err(Error::InvalidInput(format!(
                "unknown output format: {} (expected markdown, json or both)",
                other
            ))),
        }
    }
}

/// Report command arguments.
#[derive(Debug)]
pub struct ReportArgs {
    pub csv: PathBuf,
    pub tier: Tier,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Run the report command. Returns the number of records processed.
pub async fn run(args: ReportArgs, config: &Config) -> Result<u64> {
    let records = ingest::load_csv(&args.csv)?;
    info!(
        records = records.len(),
        tier = %args.tier,
        "Loaded session log"
    );

    let tier_config = config.tier_config(args.tier);
    let snapshot = compute_snapshot(&records, &tier_config)?;

    println!(
        "{} sessions | accuracy {:.1}% | escalation {:.1}% | avg response {:.2}s",
        snapshot.total_sessions,
        snapshot.accuracy_pct,
        snapshot.escalation_rate_pct,
        snapshot.avg_response_time_secs
    );
    if snapshot.below_threshold {
        println!(
            "⚠️  accuracy below the {} threshold of {:.1}%",
            args.tier, tier_config.accuracy_threshold
        );
    }

    if matches!(args.format, OutputFormat::Markdown | OutputFormat::Both) {
        let output_path = args.output.clone().unwrap_or_else(|| {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            config
                .report_dir
                .join(format!("dashboard_{}_{}.md", args.tier, timestamp))
        });
        report::write_markdown(&snapshot, &output_path).await?;
        println!("Dashboard written to {}", output_path.display());
    }

    if matches!(args.format, OutputFormat::Json | OutputFormat::Both) {
        println!("{}", report::to_json(&snapshot)?);
    }

    Ok(snapshot.total_sessions)
}
