//! Exit status contract.
//!
//! `0` means the target is up and the row was persisted. Anything else is
//! unhealthy from the scheduler's point of view, and each cause has its own
//! code so a recording failure is never mistaken for an outage.

use std::fmt;
use std::process::ExitCode;

use serde::Serialize;

use crate::probe::result::CheckResult;
use crate::record::recorder::RecorderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Target up, row appended.
    Healthy,
    /// Target down; takes precedence over any recorder outcome.
    Down,
    /// Configuration rejected before any request was made.
    InvalidInput,
    /// Target up, but the row could not be appended.
    RecordFailed,
}

impl Outcome {
    pub fn evaluate(result: &CheckResult, recorded: &Result<(), RecorderError>) -> Self {
        match (result.is_up(), recorded) {
            (false, _) => Outcome::Down,
            (true, Ok(())) => Outcome::Healthy,
            (true, Err(_)) => Outcome::RecordFailed,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Outcome::Healthy => 0,
            Outcome::Down => 1,
            Outcome::InvalidInput => 2,
            Outcome::RecordFailed => 3,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Healthy => "healthy",
            Outcome::Down => "down",
            Outcome::InvalidInput => "invalid_input",
            Outcome::RecordFailed => "record_failed",
        };
        f.write_str(s)
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}
