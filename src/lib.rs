//! Single-endpoint uptime probe with an append-only CSV log.

pub mod cli;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod probe;
pub mod record;
pub mod report;
pub mod status;

pub use config::schema::ProbeConfig;
pub use probe::{probe, CheckResult, Prober};
pub use record::{append, Recorder, RecorderError};
pub use status::Outcome;
