//! Pricing tiers and per-tier analytics capabilities
//!
//! Each tier carries an accuracy threshold for the health verdict and a
//! per-error review cost for the loss estimate. Which derived views a tier
//! unlocks is a capability-set lookup, not branching at call sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default accuracy threshold (percent) per tier.
pub const STARTER_ACCURACY_THRESHOLD: f64 = 80.0;
pub const GROWTH_ACCURACY_THRESHOLD: f64 = 85.0;
pub const ENTERPRISE_ACCURACY_THRESHOLD: f64 = 90.0;

/// Default review cost (USD per errored session) per tier.
pub const STARTER_REVIEW_COST: f64 = 2.0;
pub const GROWTH_REVIEW_COST: f64 = 1.5;
pub const ENTERPRISE_REVIEW_COST: f64 = 1.0;

/// Named pricing/feature plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Starter,
    Growth,
    Enterprise,
}

/// Analytics views a tier can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Capability {
    /// KPI tiles: totals, accuracy, escalation rate, response time.
    KpiOverview,
    /// Error-type histogram.
    ErrorHistogram,
    /// Daily accuracy trend.
    DailyTrend,
    /// Per-onboarding-step accuracy breakdown.
    StepBreakdown,
    /// Heuristic churn-risk score.
    ChurnRisk,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Starter, Tier::Growth, Tier::Enterprise];

    /// Analytics unlocked at this tier.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Tier::Starter => &[Capability::KpiOverview, Capability::ErrorHistogram],
            Tier::Growth => &[
                Capability::KpiOverview,
                Capability::ErrorHistogram,
                Capability::DailyTrend,
            ],
            Tier::Enterprise => &[
                Capability::KpiOverview,
                Capability::ErrorHistogram,
                Capability::DailyTrend,
                Capability::StepBreakdown,
                Capability::ChurnRisk,
            ],
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Monthly list price in USD, for report headers.
    pub fn monthly_price_usd(&self) -> u32 {
        match self {
            Tier::Starter => 29,
            Tier::Growth => 99,
            Tier::Enterprise => 249,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Starter => "Starter",
            Tier::Growth => "Growth",
            Tier::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(Tier::Starter),
            "growth" => Ok(Tier::Growth),
            "enterprise" => Ok(Tier::Enterprise),
            other => Err(Error::UnknownTier(other.to_string())),
        }
    }
}

/// Threshold configuration for one active tier.
///
/// Exactly one tier is active per computation; these are static lookup
/// values, not persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub tier: Tier,
    /// Accuracy percent below which the health verdict flips.
    pub accuracy_threshold: f64,
    /// USD cost of reviewing one errored session.
    pub review_cost: f64,
}

impl TierConfig {
    /// Built-in defaults for a tier.
    pub fn for_tier(tier: Tier) -> Self {
        let (accuracy_threshold, review_cost) = match tier {
            Tier::Starter => (STARTER_ACCURACY_THRESHOLD, STARTER_REVIEW_COST),
            Tier::Growth => (GROWTH_ACCURACY_THRESHOLD, GROWTH_REVIEW_COST),
            Tier::Enterprise => (ENTERPRISE_ACCURACY_THRESHOLD, ENTERPRISE_REVIEW_COST),
        };
        Self {
            tier,
            accuracy_threshold,
            review_cost,
        }
    }
}
