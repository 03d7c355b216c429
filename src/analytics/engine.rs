//! Session metrics engine: KPIs, health verdict, tier-gated views.
//!
//! Pure function of `(records, tier config) -> MetricsSnapshot`. The engine
//! performs no I/O and holds no state across calls; identical inputs yield
//! an identical snapshot.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::analytics::churn::{self, ChurnInputs, ChurnRisk};
use crate::session::SessionRecord;
use crate::tier::{Capability, Tier, TierConfig};
use crate::{Error, Result};

/// Error-type histogram entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorTypeCount {
    pub error_type: String,
    pub count: u64,
}

/// Accuracy over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAccuracy {
    pub date: NaiveDate,
    pub sessions: u64,
    pub accuracy_pct: f64,
}

/// Accuracy over one onboarding step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepAccuracy {
    pub step: u32,
    pub sessions: u64,
    pub accuracy_pct: f64,
}

/// Complete metrics output for one engine invocation.
///
/// A fresh value object per call. Optional views are present only when the
/// active tier unlocks them. Rounding is a presentation concern; every float
/// here is exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub tier: Tier,
    pub total_sessions: u64,
    pub accuracy_pct: f64,
    pub escalation_rate_pct: f64,
    pub avg_response_time_secs: f64,
    pub error_count: u64,
    pub below_threshold: bool,
    pub estimated_monthly_loss_usd: f64,
    pub error_histogram: Vec<ErrorTypeCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_trend: Option<Vec<DailyAccuracy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_accuracy: Option<Vec<StepAccuracy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub churn_risk: Option<ChurnRisk>,
}

/// Compute a metrics snapshot over a session dataset.
///
/// Fails with [`Error::InvalidInput`] on an empty dataset and propagates
/// per-record validation failures; no partial snapshot is returned.
pub fn compute_snapshot(records: &[SessionRecord], config: &TierConfig) -> Result<MetricsSnapshot> {
    if records.is_empty() {
        return Err(Error::InvalidInput(
            "session dataset is empty; KPI ratios are undefined".to_string(),
        ));
    }
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }

    let total = records.len() as u64;
    let correct = records.iter().filter(|r| r.is_correct()).count() as u64;
    let escalated = records.iter().filter(|r| r.escalation_flag).count() as u64;
    let error_count = total - correct;

    let accuracy_pct = correct as f64 / total as f64 * 100.0;
    let escalation_rate_pct = escalated as f64 / total as f64 * 100.0;
    let avg_response_time_secs =
        records.iter().map(|r| r.response_time).sum::<f64>() / total as f64;

    let tier = config.tier;
    let daily_trend = tier
        .has_capability(Capability::DailyTrend)
        .then(|| daily_accuracy_trend(records));
    let step_accuracy = tier
        .has_capability(Capability::StepBreakdown)
        .then(|| step_accuracy_breakdown(records));
    let churn_risk = tier.has_capability(Capability::ChurnRisk).then(|| {
        churn::assess(&ChurnInputs {
            accuracy_pct,
            escalation_rate_pct,
            avg_response_time_secs,
            step2_accuracy_pct: subset_accuracy(records, churn::CRITICAL_STEP),
        })
    });

    Ok(MetricsSnapshot {
        tier,
        total_sessions: total,
        accuracy_pct,
        escalation_rate_pct,
        avg_response_time_secs,
        error_count,
        below_threshold: accuracy_pct < config.accuracy_threshold,
        estimated_monthly_loss_usd: error_count as f64 * config.review_cost,
        error_histogram: error_histogram(records),
        daily_trend,
        step_accuracy,
        churn_risk,
    })
}

/// Count records per error type, ranked by count descending with ties broken
/// by first-seen order.
fn error_histogram(records: &[SessionRecord]) -> Vec<ErrorTypeCount> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        let entry = counts.entry(record.error_type.as_str()).or_insert((0, index));
        entry.0 += 1;
    }

    let mut histogram: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(error_type, (count, first_seen))| (error_type, count, first_seen))
        .collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    histogram
        .into_iter()
        .map(|(error_type, count, _)| ErrorTypeCount {
            error_type: error_type.to_string(),
            count,
        })
        .collect()
}

/// Per-calendar-day accuracy, ascending by date. Days with no records are
/// omitted, never interpolated.
fn daily_accuracy_trend(records: &[SessionRecord]) -> Vec<DailyAccuracy> {
    let mut daily_map: HashMap<NaiveDate, (u64, u64)> = HashMap::new();
    for record in records {
        let entry = daily_map.entry(record.timestamp.date_naive()).or_insert((0, 0));
        entry.0 += 1;
        if record.is_correct() {
            entry.1 += 1;
        }
    }

    let mut trend: Vec<DailyAccuracy> = daily_map
        .into_iter()
        .map(|(date, (sessions, correct))| DailyAccuracy {
            date,
            sessions,
            accuracy_pct: correct as f64 / sessions as f64 * 100.0,
        })
        .collect();
    trend.sort_by_key(|d| d.date);
    trend
}

/// Per-onboarding-step accuracy, ascending by step index.
fn step_accuracy_breakdown(records: &[SessionRecord]) -> Vec<StepAccuracy> {
    let mut step_map: HashMap<u32, (u64, u64)> = HashMap::new();
    for record in records {
        let entry = step_map.entry(record.onboarding_step).or_insert((0, 0));
        entry.0 += 1;
        if record.is_correct() {
            entry.1 += 1;
        }
    }

    let mut breakdown: Vec<StepAccuracy> = step_map
        .into_iter()
        .map(|(step, (sessions, correct))| StepAccuracy {
            step,
            sessions,
            accuracy_pct: correct as f64 / sessions as f64 * 100.0,
        })
        .collect();
    breakdown.sort_by_key(|s| s.step);
    breakdown
}

/// Accuracy over the subset at one onboarding step, `None` when the subset
/// is empty (the mean is undefined, not zero).
fn subset_accuracy(records: &[SessionRecord], step: u32) -> Option<f64> {
    let subset: Vec<&SessionRecord> = records
        .iter()
        .filter(|r| r.onboarding_step == step)
        .collect();
    if subset.is_empty() {
        return None;
    }
    let correct = subset.iter().filter(|r| r.is_correct()).count();
    Some(correct as f64 / subset.len() as f64 * 100.0)
}
