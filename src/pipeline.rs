//! Probe → record → outcome.
//!
//! # Data Flow
//! ```text
//! ProbeConfig
//!     → validate (InvalidInput: stop, nothing touched)
//!     → Prober::probe (always yields a CheckResult)
//!     → Recorder::append (may fail, reported not swallowed)
//!     → Outcome::evaluate
//!     → RunReport
//! ```
//!
//! The runtime is single-threaded and is torn down without waiting for
//! blocking work (e.g. a stalled `getaddrinfo`), so the exit status arrives
//! within the probe timeout.

use std::future::Future;
use std::io;

use tokio::runtime::Builder;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::loader::ConfigError;
use crate::config::schema::ProbeConfig;
use crate::config::validation::validate_config;
use crate::probe::{Prober, TargetUrl};
use crate::record::Recorder;
use crate::report::RunReport;
use crate::status::Outcome;

/// Drive `future` on a current-thread runtime, then drop the runtime
/// without joining outstanding blocking tasks.
pub fn block_on<F: Future>(future: F) -> io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Run one complete check cycle.
pub async fn run(config: &ProbeConfig, run_id: Uuid) -> RunReport {
    let span = tracing::info_span!("check", %run_id, url = %config.probe.url);
    run_inner(config, run_id).instrument(span).await
}

async fn run_inner(config: &ProbeConfig, run_id: Uuid) -> RunReport {
    let log_path = &config.recorder.log_path;

    if let Err(errors) = validate_config(config) {
        let message = ConfigError::Validation(errors).to_string();
        tracing::error!(error = %message, "Invalid input, not probing");
        return RunReport::invalid_input(run_id, log_path, message);
    }

    let prepared = TargetUrl::parse(&config.probe.url)
        .map_err(|e| e.to_string())
        .and_then(|target| {
            Prober::new(&config.probe)
                .map(|prober| (target, prober))
                .map_err(|e| e.to_string())
        });
    let (target, prober) = match prepared {
        Ok(pair) => pair,
        Err(message) => {
            tracing::error!(error = %message, "Probe setup failed, not probing");
            return RunReport::invalid_input(run_id, log_path, message);
        }
    };

    let recorder = Recorder::new(&config.recorder);
    tracing::debug!(
        timeout_secs = prober.timeout().as_secs(),
        log_path = %recorder.path().display(),
        "Probing target"
    );

    let result = prober.probe(&target).await;
    tracing::info!(
        status_code = result.status_code(),
        response_time_ms = result.response_time_ms(),
        is_up = result.is_up(),
        "Check complete"
    );

    let recorded = recorder.append(&result);
    if let Err(e) = &recorded {
        tracing::error!(error = %e, path = %recorder.path().display(), "Failed to record check result");
    }

    let outcome = Outcome::evaluate(&result, &recorded);
    match outcome {
        Outcome::Healthy => tracing::info!(%outcome, "Target healthy"),
        _ => tracing::warn!(%outcome, "Target unhealthy or not recorded"),
    }

    RunReport::checked(
        run_id,
        result,
        outcome,
        log_path,
        recorded.err().map(|e| e.to_string()),
    )
}
