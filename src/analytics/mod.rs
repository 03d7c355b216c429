//! Session analytics module
//!
//! Provides:
//! - KPI snapshot computation over session logs
//! - Churn-risk heuristic scoring
//! - Markdown/JSON dashboard rendering

pub mod churn;
pub mod engine;
pub mod report;

pub use churn::{ChurnRisk, ChurnSignal, RiskBand};
pub use engine::{compute_snapshot, DailyAccuracy, ErrorTypeCount, MetricsSnapshot, StepAccuracy};
pub use report::render_markdown;
