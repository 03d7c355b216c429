//! Mock session log generator.
//!
//! Usage:
//!   cargo run --bin generate_demo_data -- --records 500 --days 14 --output sessions.csv

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;

/// Error categories with sampling weights; "none" dominates like a real log.
const ERROR_TYPES: [(&str, u32); 5] = [
    ("none", 80),
    ("timeout", 8),
    ("intent_mismatch", 6),
    ("hallucination", 4),
    ("handoff_failure", 2),
];

const ONBOARDING_STEPS: [u32; 5] = [0, 1, 2, 3, 4];

#[derive(Parser, Debug)]
#[command(name = "generate_demo_data")]
#[command(about = "Generate a mock SaaS-bot session log CSV")]
struct Args {
    /// Number of session records to generate
    #[arg(long, default_value = "500")]
    records: usize,

    /// Spread records over this many days ending today
    #[arg(long, default_value = "14")]
    days: i64,

    /// Output CSV path
    #[arg(long, default_value = "sessions.csv")]
    output: PathBuf,
}

fn weighted_error_type(rng: &mut impl Rng) -> &'static str {
    let total: u32 = ERROR_TYPES.iter().map(|(_, w)| w).sum();
    let mut pick = rng.gen_range(0..total);
    for (error_type, weight) in ERROR_TYPES {
        if pick < weight {
            return error_type;
        }
        pick -= weight;
    }
    ERROR_TYPES[0].0
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = rand::thread_rng();

    let mut writer = csv::Writer::from_path(&args.output)?;
    writer.write_record([
        "timestamp",
        "error_type",
        "escalation_flag",
        "response_time",
        "onboarding_step",
    ])?;

    let start = Utc::now() - Duration::days(args.days);
    for _ in 0..args.records {
        let offset_secs = rng.gen_range(0..args.days.max(1) * 86_400);
        let timestamp = start + Duration::seconds(offset_secs);

        let error_type = weighted_error_type(&mut rng);
        // Errored sessions escalate far more often than clean ones.
        let escalation_chance = if error_type == "none" { 0.03 } else { 0.45 };
        let escalated = rng.gen_bool(escalation_chance);
        let response_time = rng.gen_range(0.3..4.5f64);
        let step = *ONBOARDING_STEPS.choose(&mut rng).unwrap_or(&0);

        writer.write_record([
            timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            error_type.to_string(),
            u8::from(escalated).to_string(),
            format!("{:.2}", response_time),
            step.to_string(),
        ])?;
    }

    writer.flush()?;
    println!(
        "Wrote {} mock sessions spanning {} days to {}",
        args.records,
        args.days,
        args.output.display()
    );

    Ok(())
}
