//! Churn-risk heuristic.
//!
//! Additive score in [0, 100]. Each signal is independent and cumulative;
//! the total is capped at 100. Band labels are for display only and are not
//! part of the numeric contract.

use serde::Serialize;

/// Accuracy below this adds [`LOW_ACCURACY_POINTS`].
pub const LOW_ACCURACY_PCT: f64 = 85.0;
/// Escalation rate above this adds [`HIGH_ESCALATION_POINTS`].
pub const HIGH_ESCALATION_PCT: f64 = 15.0;
/// Average response time above this (seconds) adds [`SLOW_RESPONSE_POINTS`].
pub const SLOW_RESPONSE_SECS: f64 = 2.5;
/// Onboarding step whose accuracy is checked separately.
pub const CRITICAL_STEP: u32 = 2;
/// Step accuracy below this adds [`WEAK_STEP_POINTS`].
pub const WEAK_STEP_ACCURACY_PCT: f64 = 80.0;

pub const LOW_ACCURACY_POINTS: u8 = 30;
pub const HIGH_ESCALATION_POINTS: u8 = 30;
pub const SLOW_RESPONSE_POINTS: u8 = 20;
pub const WEAK_STEP_POINTS: u8 = 20;

/// Display band for a churn score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskBand::Low,
            30..=59 => RiskBand::Moderate,
            _ => RiskBand::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "low risk",
            RiskBand::Moderate => "moderate risk",
            RiskBand::High => "high risk",
        }
    }
}

/// One triggered churn signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChurnSignal {
    pub label: &'static str,
    pub points: u8,
}

/// Churn-risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnRisk {
    pub score: u8,
    pub band: RiskBand,
    /// Signals that triggered, in evaluation order.
    pub signals: Vec<ChurnSignal>,
}

/// Aggregates the heuristic runs on.
#[derive(Debug, Clone, Copy)]
pub struct ChurnInputs {
    pub accuracy_pct: f64,
    pub escalation_rate_pct: f64,
    pub avg_response_time_secs: f64,
    /// Accuracy over the step-2 subset. `None` when no record has
    /// `onboarding_step == 2`; the signal is then skipped rather than
    /// treated as triggered.
    pub step2_accuracy_pct: Option<f64>,
}

/// Score churn risk from KPI aggregates.
pub fn assess(inputs: &ChurnInputs) -> ChurnRisk {
    let mut signals = Vec::new();

    if inputs.accuracy_pct < LOW_ACCURACY_PCT {
        signals.push(ChurnSignal {
            label: "overall accuracy below 85%",
            points: LOW_ACCURACY_POINTS,
        });
    }
    if inputs.escalation_rate_pct > HIGH_ESCALATION_PCT {
        signals.push(ChurnSignal {
            label: "escalation rate above 15%",
            points: HIGH_ESCALATION_POINTS,
        });
    }
    if inputs.avg_response_time_secs > SLOW_RESPONSE_SECS {
        signals.push(ChurnSignal {
            label: "average response time above 2.5s",
            points: SLOW_RESPONSE_POINTS,
        });
    }
    if let Some(step2) = inputs.step2_accuracy_pct {
        if step2 < WEAK_STEP_ACCURACY_PCT {
            signals.push(ChurnSignal {
                label: "onboarding step 2 accuracy below 80%",
                points: WEAK_STEP_POINTS,
            });
        }
    }

    let total: u32 = signals.iter().map(|s| s.points as u32).sum();
    let score = total.min(100) as u8;

    ChurnRisk {
        score,
        band: RiskBand::from_score(score),
        signals,
    }
}
