//! Session log validation command.
//!
//! Parses a CSV and prints what the dashboard would see: record count, date
//! range and the error categories present.

use std::collections::HashMap;
use std::path::Path;

use crate::ingest;
use crate::Result;

/// Run the validate command. Returns the number of records parsed.
pub async fn run(csv: &Path) -> Result<u64> {
    let records = ingest::load_csv(csv)?;

    println!("Validated {}: {} records", csv.display(), records.len());

    if records.is_empty() {
        println!("Dataset is empty; the report command will reject it.");
        return Ok(0);
    }

    if let (Some(first), Some(last)) = (
        records.iter().map(|r| r.timestamp).min(),
        records.iter().map(|r| r.timestamp).max(),
    ) {
        println!(
            "Date range: {} to {}",
            first.format("%Y-%m-%d %H:%M:%S"),
            last.format("%Y-%m-%d %H:%M:%S")
        );
    }

    let escalated = records.iter().filter(|r| r.escalation_flag).count();
    println!("Escalated sessions: {}", escalated);

    let mut error_types: HashMap<&str, usize> = HashMap::new();
    for record in &records {
        *error_types.entry(record.error_type.as_str()).or_default() += 1;
    }
    let mut sorted: Vec<_> = error_types.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("Error types:");
    for (error_type, count) in sorted {
        println!("  {:<20} {}", error_type, count);
    }

    Ok(records.len() as u64)
}
