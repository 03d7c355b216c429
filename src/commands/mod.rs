//! Command implementations
//!
//! All CLI commands are implemented here.
//! Each module corresponds to a subcommand in the CLI.

pub mod report;
pub mod tiers;
pub mod validate;

// Re-export commonly used types
pub use report::{run as report_run, OutputFormat, ReportArgs};
pub use tiers::run as tiers_run;
pub use validate::run as validate_run;
