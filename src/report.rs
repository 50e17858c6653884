//! Machine-readable summary written to stdout.
//!
//! One JSON object per invocation, emitted whether or not the row reached
//! the log, so the outcome is observable even when persistence fails.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::probe::result::CheckResult;
use crate::status::Outcome;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,

    /// Absent when the input was rejected before probing.
    #[serde(flatten)]
    pub result: Option<CheckResult>,

    pub outcome: Outcome,
    pub log_path: String,
    pub recorded: bool,
    pub error: Option<String>,
}

impl RunReport {
    pub fn checked(
        run_id: Uuid,
        result: CheckResult,
        outcome: Outcome,
        log_path: &Path,
        error: Option<String>,
    ) -> Self {
        Self {
            run_id,
            result: Some(result),
            outcome,
            log_path: log_path.display().to_string(),
            recorded: error.is_none(),
            error,
        }
    }

    pub fn invalid_input(run_id: Uuid, log_path: &Path, error: String) -> Self {
        Self {
            run_id,
            result: None,
            outcome: Outcome::InvalidInput,
            log_path: log_path.display().to_string(),
            recorded: false,
            error: Some(error),
        }
    }

    /// Write the report as a single JSON line.
    pub fn emit<W: Write>(&self, mut out: W) -> io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
