//! On-disk row format.
//!
//! ```text
//! timestamp,target_url,status_code,response_time_ms,is_up
//! 2026-10-19T08:30:00.123Z,https://example.com,200,84.27,true
//! ```
//!
//! Column order and lexical forms are fixed; downstream readers depend on
//! them. Latency is always written with two decimals.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::probe::result::{format_timestamp, CheckResult};

/// Column names in file order.
pub const COLUMNS: [&str; 5] = [
    "timestamp",
    "target_url",
    "status_code",
    "response_time_ms",
    "is_up",
];

/// The header line without its terminator.
pub const HEADER_LINE: &str = "timestamp,target_url,status_code,response_time_ms,is_up";

#[derive(Serialize)]
struct Row<'a> {
    timestamp: String,
    target_url: &'a str,
    status_code: u16,
    response_time_ms: String,
    is_up: bool,
}

/// A row read back from the log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub target_url: String,
    pub status_code: u16,
    pub response_time_ms: f64,
    pub is_up: bool,
}

impl From<&CheckResult> for LogRecord {
    /// The record a result becomes once written, latency rounding included.
    fn from(result: &CheckResult) -> Self {
        Self {
            timestamp: result.timestamp(),
            target_url: result.target_url().to_string(),
            status_code: result.status_code(),
            response_time_ms: round_ms(result.response_time_ms()),
            is_up: result.is_up(),
        }
    }
}

fn deserialize_timestamp<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

fn format_ms(ms: f64) -> String {
    format!("{:.2}", ms)
}

/// Round latency exactly as the writer does.
pub fn round_ms(ms: f64) -> f64 {
    format_ms(ms).parse().unwrap_or(ms)
}

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, csv::Error> {
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Serialized header line, terminator included.
pub fn header_bytes() -> Result<Vec<u8>, csv::Error> {
    let mut wtr = writer();
    wtr.write_record(COLUMNS)?;
    finish(wtr)
}

/// Serialize one result as a terminated row.
pub fn serialize_row(result: &CheckResult) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = writer();
    wtr.serialize(Row {
        timestamp: format_timestamp(&result.timestamp()),
        target_url: result.target_url(),
        status_code: result.status_code(),
        response_time_ms: format_ms(result.response_time_ms()),
        is_up: result.is_up(),
    })?;
    finish(wtr)
}

/// Parse a single data row (no header).
pub fn parse_row(line: &str) -> Result<LogRecord, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());
    match rdr.deserialize().next() {
        Some(record) => record,
        None => Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "empty row").into()),
    }
}

/// Read every row of a log file, checking columns by name.
pub fn read_log(path: &Path) -> Result<Vec<LogRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    rdr.deserialize().collect()
}
