//! Session record model
//!
//! One record per logged bot interaction. Records are read-only input to the
//! metrics engine: nothing here creates, mutates or deletes them after load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Error type value that marks a successful session.
pub const ERROR_TYPE_NONE: &str = "none";

/// One logged interaction between an onboarding bot and a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session happened; used for trend bucketing.
    pub timestamp: DateTime<Utc>,
    /// `"none"` means success; any other value is an error category.
    pub error_type: String,
    /// Whether the session was escalated to a human.
    pub escalation_flag: bool,
    /// Bot response time in seconds.
    pub response_time: f64,
    /// Step index in the onboarding flow.
    pub onboarding_step: u32,
}

impl SessionRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        error_type: impl Into<String>,
        escalation_flag: bool,
        response_time: f64,
        onboarding_step: u32,
    ) -> Self {
        Self {
            timestamp,
            error_type: error_type.into(),
            escalation_flag,
            response_time,
            onboarding_step,
        }
    }

    /// Session completed without an error.
    pub fn is_correct(&self) -> bool {
        self.error_type == ERROR_TYPE_NONE
    }

    /// Check field constraints on an already-parsed record.
    ///
    /// `index` is the zero-based position in the dataset, used for error
    /// messages only.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.error_type.trim().is_empty() {
            return Err(Error::MissingField(format!("record {}: error_type", index)));
        }
        if !self.response_time.is_finite() || self.response_time < 0.0 {
            return Err(Error::MalformedField(format!(
                "record {}: response_time must be a finite value >= 0, got {}",
                index, self.response_time
            )));
        }
        Ok(())
    }
}
