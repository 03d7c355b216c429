//! Tier overview command.
//!
//! Prints the plan table: price, thresholds and which analytics each tier
//! unlocks.

use crate::config::Config;
use crate::tier::{Capability, Tier};

fn capability_label(capability: Capability) -> &'static str {
    match capability {
        Capability::KpiOverview => "KPI overview",
        Capability::ErrorHistogram => "error histogram",
        Capability::DailyTrend => "daily accuracy trend",
        Capability::StepBreakdown => "step breakdown",
        Capability::ChurnRisk => "churn risk",
    }
}

/// Print the tier capability and pricing table.
pub fn run(config: &Config) {
    println!(
        "{:<12} {:>8} {:>12} {:>12}  {}",
        "Tier", "Price", "Threshold", "Review cost", "Analytics"
    );
    println!("{}", "-".repeat(78));

    for tier in Tier::ALL {
        let tier_config = config.tier_config(tier);
        let analytics = tier
            .capabilities()
            .iter()
            .map(|c| capability_label(*c))
            .collect::<Vec<_>>()
            .join(", ");

        println!(
            "{:<12} {:>7}$ {:>11.1}% {:>11.2}$  {}",
            tier.name(),
            tier.monthly_price_usd(),
            tier_config.accuracy_threshold,
            tier_config.review_cost,
            analytics
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_labels_are_distinct() {
        let labels: Vec<&str> = Tier::Enterprise
            .capabilities()
            .iter()
            .map(|c| capability_label(*c))
            .collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }

    #[test]
    fn test_run_does_not_panic() {
        run(&Config::defaults());
    }
}
