//! AI Ops Monitor Library
//!
//! This library provides tools to:
//! - Load SaaS-bot session logs from CSV
//! - Compute KPI snapshots: accuracy, escalation rate, response times
//! - Estimate monthly review loss per pricing tier
//! - Score churn risk with an additive heuristic (Enterprise)
//! - Render Markdown/JSON dashboards for a presentation layer
//! - Gate derived views by tier capability sets

pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod session;
pub mod telemetry;
pub mod tier;

// Re-export common types
pub use analytics::{compute_snapshot, ChurnRisk, MetricsSnapshot, RiskBand};
pub use config::Config;
pub use error::{Error, Result};
pub use session::SessionRecord;
pub use tier::{Capability, Tier, TierConfig};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
