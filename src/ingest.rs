//! CSV ingestion for session logs.
//!
//! Loads the dataset the dashboard reads: one row per session, keyed by a
//! `timestamp` column. Rows are validated as they are read; a bad row fails
//! the whole load, there are no partial datasets.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

use crate::session::SessionRecord;
use crate::{Error, Result};

/// Raw CSV row before field parsing.
///
/// Every column is optional here so missing values are reported per field
/// instead of as an opaque CSV error.
#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: Option<String>,
    error_type: Option<String>,
    escalation_flag: Option<String>,
    response_time: Option<String>,
    onboarding_step: Option<String>,
}

/// Load session records from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<SessionRecord>> {
    let file = File::open(path)?;
    read_records(file)
}

/// Read session records from any CSV source.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<SessionRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = row?;
        let record = parse_row(index, raw)?;
        record.validate(index)?;
        records.push(record);
    }

    Ok(records)
}

fn parse_row(index: usize, raw: RawRecord) -> Result<SessionRecord> {
    let timestamp_raw = required(index, "timestamp", raw.timestamp)?;
    let timestamp = parse_timestamp(&timestamp_raw).ok_or_else(|| {
        Error::MalformedField(format!(
            "record {}: timestamp `{}` is not a recognized date/time",
            index, timestamp_raw
        ))
    })?;

    let error_type = required(index, "error_type", raw.error_type)?;

    let flag_raw = required(index, "escalation_flag", raw.escalation_flag)?;
    let escalation_flag = parse_flag(&flag_raw).ok_or_else(|| {
        Error::MalformedField(format!(
            "record {}: escalation_flag `{}` is not 0/1/true/false",
            index, flag_raw
        ))
    })?;

    let rt_raw = required(index, "response_time", raw.response_time)?;
    let response_time: f64 = rt_raw.parse().map_err(|_| {
        Error::MalformedField(format!(
            "record {}: response_time `{}` is not a number",
            index, rt_raw
        ))
    })?;

    let step_raw = required(index, "onboarding_step", raw.onboarding_step)?;
    let onboarding_step: u32 = step_raw.parse().map_err(|_| {
        Error::MalformedField(format!(
            "record {}: onboarding_step `{}` is not a step index",
            index, step_raw
        ))
    })?;

    Ok(SessionRecord::new(
        timestamp,
        error_type,
        escalation_flag,
        response_time,
        onboarding_step,
    ))
}

fn required(index: usize, field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MissingField(format!("record {}: {}", index, field))),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    None
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "timestamp,error_type,escalation_flag,response_time,onboarding_step\n";

    fn read(rows: &str) -> Result<Vec<SessionRecord>> {
        read_records(Cursor::new(format!("{}{}", HEADER, rows)))
    }

    #[test]
    fn test_read_valid_rows() {
        let records = read(
            "2024-05-01 09:15:00,none,0,1.2,1\n\
             2024-05-01 10:00:00,timeout,1,3.4,2\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].is_correct());
        assert!(!records[1].is_correct());
        assert!(records[1].escalation_flag);
        assert_eq!(records[1].onboarding_step, 2);
    }

    #[test]
    fn test_timestamp_formats() {
        let records = read(
            "2024-05-01T09:15:00Z,none,0,1.0,0\n\
             2024-05-01 09:15:00,none,0,1.0,0\n\
             2024-05-01,none,0,1.0,0\n",
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, records[1].timestamp);
        assert_eq!(
            records[2].timestamp.date_naive(),
            records[0].timestamp.date_naive()
        );
    }

    #[test]
    fn test_boolean_escalation_flags() {
        let records = read(
            "2024-05-01,none,true,1.0,0\n\
             2024-05-01,none,FALSE,1.0,0\n",
        )
        .unwrap();
        assert!(records[0].escalation_flag);
        assert!(!records[1].escalation_flag);
    }

    #[test]
    fn test_missing_timestamp_reports_field_and_row() {
        let err = read(",none,0,1.0,0\n").unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
        assert!(err.to_string().contains("record 0"));
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn test_malformed_timestamp() {
        let err = read("yesterday,none,0,1.0,0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedField(_)));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_malformed_flag() {
        let err = read("2024-05-01,none,maybe,1.0,0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedField(_)));
        assert!(err.to_string().contains("escalation_flag"));
    }

    #[test]
    fn test_malformed_response_time() {
        let err = read("2024-05-01,none,0,fast,0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedField(_)));
    }

    #[test]
    fn test_negative_response_time_rejected_at_load() {
        let err = read("2024-05-01,none,0,-1.0,0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedField(_)));
    }

    #[test]
    fn test_bad_row_fails_whole_load() {
        let result = read(
            "2024-05-01,none,0,1.0,0\n\
             2024-05-02,none,0,1.0,not_a_step\n\
             2024-05-03,none,0,1.0,0\n",
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("record 1"));
    }

    #[test]
    fn test_empty_file_yields_empty_vec() {
        // Empty is the engine's concern; ingestion just returns no rows.
        let records = read("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_csv_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        std::fs::write(
            &path,
            format!("{}2024-05-01 09:00:00,none,0,1.0,1\n", HEADER),
        )
        .unwrap();

        let records = load_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_csv_missing_file_is_io_error() {
        let err = load_csv(Path::new("/nonexistent/sessions.csv")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
