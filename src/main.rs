//! AI Ops Monitor CLI - main entry point
//!
//! This is the unified CLI interface for session log analytics.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use aiops_monitor::commands::{self, OutputFormat, ReportArgs};
use aiops_monitor::tier::Tier;
use aiops_monitor::{telemetry, Config};

#[derive(Parser)]
#[command(name = "aiops_monitor")]
#[command(about = "AI Ops session analytics: KPIs, churn risk and dashboards", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to expose Prometheus metrics (e.g., 0.0.0.0:9898)
    #[arg(long, env = "METRICS_ADDR")]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a KPI snapshot from a session CSV and render the dashboard
    Report {
        /// Path to the session log CSV
        csv: PathBuf,

        /// Active pricing tier: starter | growth | enterprise
        #[arg(short, long, default_value = "starter")]
        tier: String,

        /// Path for the Markdown dashboard (default: timestamped file in the report dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: markdown | json | both
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },

    /// Parse a session CSV and print what the dashboard would see
    Validate {
        /// Path to the session log CSV
        csv: PathBuf,
    },

    /// Show the tier capability and pricing table
    Tiers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    if let Some(addr) = cli.metrics_addr.as_deref() {
        match addr.parse::<SocketAddr>() {
            Ok(addr) => telemetry::spawn_metrics_server(addr),
            Err(err) => warn!("Invalid metrics address {}: {}", addr, err),
        }
    }

    match cli.command {
        Commands::Report {
            csv,
            tier,
            output,
            format,
        } => {
            let args = ReportArgs {
                csv,
                tier: tier.parse::<Tier>()?,
                output,
                format: format.parse::<OutputFormat>()?,
            };
            run_counted("report", commands::report_run(args, &config)).await?;
        }
        Commands::Validate { csv } => {
            run_counted("validate", commands::validate_run(&csv)).await?;
        }
        Commands::Tiers => {
            let started = Instant::now();
            commands::tiers_run(&config);
            telemetry::record_command("tiers", started.elapsed(), true);
        }
    }

    Ok(())
}

/// Run a command that reports how many session records it processed,
/// recording duration, status and throughput metrics.
async fn run_counted<F>(name: &'static str, fut: F) -> aiops_monitor::Result<()>
where
    F: std::future::Future<Output = aiops_monitor::Result<u64>>,
{
    let started = Instant::now();
    let result = fut.await;
    telemetry::record_command(name, started.elapsed(), result.is_ok());

    let records = result?;
    telemetry::record_sessions_processed(records);
    Ok(())
}
