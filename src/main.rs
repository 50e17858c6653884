//! uptime-probe
//!
//! Probes one endpoint, appends the outcome to a CSV log and reports health
//! through the exit status.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv / config.toml
//!          │
//!          ▼
//!   ┌─────────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐
//!   │ cli+config  │───▶│  probe   │───▶│   record   │───▶│  status  │──▶ exit code
//!   │ (validate)  │    │ one GET  │    │ CSV append │    │ Outcome  │
//!   └─────────────┘    └──────────┘    └────────────┘    └──────────┘
//!                                                              │
//!                                                              ▼
//!                                                    report (JSON on stdout)
//! ```
//!
//! Exit codes: 0 healthy, 1 down, 2 invalid input, 3 log write failed.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use uuid::Uuid;

use uptime_probe::cli::Cli;
use uptime_probe::config::schema::ObservabilityConfig;
use uptime_probe::observability::init_logging;
use uptime_probe::pipeline;
use uptime_probe::report::RunReport;
use uptime_probe::status::Outcome;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let run_id = Uuid::new_v4();

    match pipeline::block_on(check(cli, run_id)) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to start async runtime");
            emit(&RunReport::invalid_input(run_id, Path::new(""), e.to_string()));
            Outcome::InvalidInput.into()
        }
    }
}

async fn check(cli: Cli, run_id: Uuid) -> Outcome {
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            emit(&RunReport::invalid_input(run_id, Path::new(""), e.to_string()));
            return Outcome::InvalidInput;
        }
    };

    init_logging(&config.observability);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "uptime-probe starting");

    let report = pipeline::run(&config, run_id).await;
    emit(&report);
    report.outcome
}

fn emit(report: &RunReport) {
    if let Err(e) = report.emit(std::io::stdout().lock()) {
        tracing::error!(error = %e, "Failed to write report to stdout");
    }
}
