//! Configuration for tier thresholds and report output
//!
//! Loads configuration from config.yml file. Values not present fall back to
//! compiled defaults; `AIOPS_REPORT_DIR` overrides the report directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tier::{Tier, TierConfig};
use crate::{Error, Result};

/// Default directory for rendered dashboards.
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    tiers: Option<HashMap<String, TierThresholds>>,
    report: Option<ReportSection>,
}

#[derive(Debug, Deserialize)]
struct TierThresholds {
    accuracy_threshold: Option<f64>,
    review_cost: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ReportSection {
    output_dir: Option<String>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub report_dir: PathBuf,
    overrides: HashMap<Tier, (Option<f64>, Option<f64>)>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults.
    /// `AIOPS_REPORT_DIR` takes precedence over the file value.
    pub fn new() -> Self {
        let mut config = Self::load_from_file(Path::new("config.yml"))
            .or_else(|_| Self::load_from_file(Path::new("../config.yml")))
            .unwrap_or_else(|_| Self::defaults());

        if let Ok(dir) = std::env::var("AIOPS_REPORT_DIR") {
            if !dir.trim().is_empty() {
                config.report_dir = PathBuf::from(dir);
            }
        }

        config
    }

    /// Compiled defaults, no file needed.
    pub fn defaults() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            overrides: HashMap::new(),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let yaml: YamlConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid config.yml: {}", e)))?;

        let mut overrides = HashMap::new();
        if let Some(tiers) = yaml.tiers {
            for (name, thresholds) in tiers {
                let tier: Tier = name
                    .parse()
                    .map_err(|_| Error::ConfigError(format!("unknown tier in config: {}", name)))?;
                overrides.insert(
                    tier,
                    (thresholds.accuracy_threshold, thresholds.review_cost),
                );
            }
        }

        let report_dir = yaml
            .report
            .and_then(|r| r.output_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));

        Ok(Self {
            report_dir,
            overrides,
        })
    }

    /// Threshold configuration for a tier, with config.yml overrides applied
    /// on top of the built-in defaults.
    pub fn tier_config(&self, tier: Tier) -> TierConfig {
        let mut config = TierConfig::for_tier(tier);
        if let Some((accuracy_threshold, review_cost)) = self.overrides.get(&tier) {
            if let Some(threshold) = accuracy_threshold {
                config.accuracy_threshold = *threshold;
            }
            if let Some(cost) = review_cost {
                config.review_cost = *cost;
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert_eq!(config.report_dir, PathBuf::from("reports"));
        assert_eq!(config.tier_config(Tier::Starter).accuracy_threshold, 80.0);
    }

    #[test]
    fn test_yaml_tier_override() {
        let config = Config::from_yaml_str(
            r#"
tiers:
  starter:
    accuracy_threshold: 75
  enterprise:
    review_cost: 0.5
"#,
        )
        .unwrap();

        let starter = config.tier_config(Tier::Starter);
        assert_eq!(starter.accuracy_threshold, 75.0);
        assert_eq!(starter.review_cost, 2.0); // default untouched

        let enterprise = config.tier_config(Tier::Enterprise);
        assert_eq!(enterprise.accuracy_threshold, 90.0);
        assert_eq!(enterprise.review_cost, 0.5);
    }

    #[test]
    fn test_yaml_report_dir() {
        let config = Config::from_yaml_str("report:\n  output_dir: dashboards\n").unwrap();
        assert_eq!(config.report_dir, PathBuf::from("dashboards"));
    }

    #[test]
    fn test_yaml_unknown_tier_rejected() {
        let err = Config::from_yaml_str("tiers:\n  platinum:\n    review_cost: 1\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.to_string().contains("platinum"));
    }

    #[test]
    fn test_yaml_invalid_syntax_rejected() {
        let err = Config::from_yaml_str("tiers: [not a map").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config.report_dir, PathBuf::from(DEFAULT_REPORT_DIR));
        assert_eq!(config.tier_config(Tier::Growth).accuracy_threshold, 85.0);
    }
}
