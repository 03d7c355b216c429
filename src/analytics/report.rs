//! Dashboard rendering for a metrics snapshot.
//!
//! The engine returns exact values; rounding to one decimal place happens
//! here, at the presentation edge.

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::analytics::engine::MetricsSnapshot;
use crate::Result;

/// Render a snapshot as a Markdown dashboard.
pub fn render_markdown(snapshot: &MetricsSnapshot) -> String {
    let mut lines = Vec::new();

    lines.push("# AI Ops Monitor Session Dashboard".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- Plan: {} (${}/month)",
        snapshot.tier,
        snapshot.tier.monthly_price_usd()
    ));
    lines.push(format!(
        "- Total Sessions: {} | Accuracy: {:.1}% | Escalation Rate: {:.1}% | Avg Response Time: {:.2}s",
        snapshot.total_sessions,
        snapshot.accuracy_pct,
        snapshot.escalation_rate_pct,
        snapshot.avg_response_time_secs
    ));
    lines.push(format!(
        "- Errored sessions: {} | Estimated monthly review loss: ${:.2}",
        snapshot.error_count, snapshot.estimated_monthly_loss_usd
    ));

    if snapshot.below_threshold {
        lines.push("- Health: ⚠️ Accuracy below plan threshold".to_string());
    } else {
        lines.push("- Health: ✅ System Operational".to_string());
    }
    lines.push(String::new());

    lines.push("## Error breakdown".to_string());
    lines.push("| Error type | Sessions |".to_string());
    lines.push("| --- | --- |".to_string());
    for entry in &snapshot.error_histogram {
        lines.push(format!("| {} | {} |", entry.error_type, entry.count));
    }
    lines.push(String::new());

    if let Some(trend) = &snapshot.daily_trend {
        lines.push("## Daily accuracy trend".to_string());
        lines.push("| Date | Sessions | Accuracy |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for day in trend {
            lines.push(format!(
                "| {} | {} | {:.1}% |",
                day.date, day.sessions, day.accuracy_pct
            ));
        }
        lines.push(String::new());
    }

    if let Some(steps) = &snapshot.step_accuracy {
        lines.push("## Onboarding step accuracy".to_string());
        lines.push("| Step | Sessions | Accuracy |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for step in steps {
            lines.push(format!(
                "| {} | {} | {:.1}% |",
                step.step, step.sessions, step.accuracy_pct
            ));
        }
        lines.push(String::new());
    }

    if let Some(churn) = &snapshot.churn_risk {
        lines.push("## Churn risk".to_string());
        lines.push(format!(
            "- Score: {}/100 ({})",
            churn.score,
            churn.band.label()
        ));
        for signal in &churn.signals {
            lines.push(format!("- +{}: {}", signal.points, signal.label));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Serialize a snapshot for a UI layer.
pub fn to_json(snapshot: &MetricsSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write the Markdown dashboard to disk.
pub async fn write_markdown(snapshot: &MetricsSnapshot, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::write(output_path, render_markdown(snapshot)).await?;
    info!("Saved dashboard to {}", output_path.display());

    Ok(())
}
