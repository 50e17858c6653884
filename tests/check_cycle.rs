//! End-to-end check cycles against mock backends.

use std::fs;
use std::path::Path;
use std::time::Duration;

use uptime_probe::config::ProbeConfig;
use uptime_probe::pipeline;
use uptime_probe::probe::probe;
use uptime_probe::record::{read_log, HEADER_LINE};
use uptime_probe::status::Outcome;
use uuid::Uuid;

mod common;
use common::MockResponse;

fn config_for(url: String, log_path: &Path) -> ProbeConfig {
    let mut config = ProbeConfig::default();
    config.probe.url = url;
    config.probe.timeout_secs = 5;
    config.recorder.log_path = log_path.to_path_buf();
    config
}

#[tokio::test]
async fn test_healthy_target_is_recorded() {
    let addr = common::start_mock_backend(200).await;
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("data/uptime.csv");
    let url = format!("http://{}/health", addr);

    let report = pipeline::run(&config_for(url.clone(), &log), Uuid::new_v4()).await;

    assert_eq!(report.outcome, Outcome::Healthy);
    assert!(report.recorded);
    let result = report.result.expect("checked report carries a result");
    assert_eq!(result.status_code(), 200);
    assert!(result.is_up());

    let content = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER_LINE);
    assert!(lines[1].contains(&format!(",{},200,", url)));
    assert!(lines[1].ends_with(",true"));
}

#[tokio::test]
async fn test_not_found_is_down_but_recorded() {
    let addr = common::start_mock_backend(404).await;
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("uptime.csv");

    let report = pipeline::run(&config_for(format!("http://{}/", addr), &log), Uuid::new_v4()).await;

    assert_eq!(report.outcome, Outcome::Down);
    assert_eq!(report.outcome.code(), 1);
    let records = read_log(&log).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status_code, 404);
    assert!(!records[0].is_up);
}

#[tokio::test]
async fn test_server_error_is_down() {
    let addr = common::start_mock_backend(503).await;
    let result = probe(&format!("http://{}/", addr), 5).await.unwrap();
    assert_eq!(result.status_code(), 503);
    assert!(!result.is_up());
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let addr = common::start_programmable_backend(|request| async move {
        if request.starts_with("GET /final ") {
            MockResponse::status(200)
        } else {
            MockResponse::redirect("/final")
        }
    })
    .await;

    let url = format!("http://{}/start", addr);
    let result = probe(&url, 5).await.unwrap();

    assert_eq!(result.status_code(), 200);
    assert!(result.is_up());
    assert_eq!(result.target_url(), url);
}

#[tokio::test]
async fn test_redirect_to_missing_page_reports_final_status() {
    let addr = common::start_programmable_backend(|request| async move {
        if request.starts_with("GET /gone ") {
            MockResponse::status(404)
        } else {
            MockResponse::redirect("/gone")
        }
    })
    .await;

    let result = probe(&format!("http://{}/", addr), 5).await.unwrap();
    assert_eq!(result.status_code(), 404);
    assert!(!result.is_up());
}

#[tokio::test]
async fn test_redirect_loop_is_absorbed() {
    let addr = common::start_programmable_backend(|_| async move { MockResponse::redirect("/") }).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(format!("http://{}/", addr), &dir.path().join("uptime.csv"));
    config.probe.max_redirects = 3;

    let report = pipeline::run(&config, Uuid::new_v4()).await;

    assert_eq!(report.outcome, Outcome::Down);
    assert_eq!(report.result.unwrap().status_code(), 0);
}

#[tokio::test]
async fn test_timeout_yields_sentinel() {
    let addr = common::start_silent_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("uptime.csv");
    let mut config = config_for(format!("http://{}/", addr), &log);
    config.probe.timeout_secs = 1;

    let report = pipeline::run(&config, Uuid::new_v4()).await;

    assert_eq!(report.outcome, Outcome::Down);
    let result = report.result.unwrap();
    assert_eq!(result.status_code(), 0);
    assert!(!result.is_up());
    // Latency is the elapsed time until the timeout fired.
    let floor = (Duration::from_secs(1) - common::TIMING_SLACK).as_secs_f64() * 1000.0;
    assert!(result.response_time_ms() >= floor);
    assert!(result.response_time_ms() < 3000.0);

    let records = read_log(&log).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status_code, 0);
}

#[tokio::test]
async fn test_connection_refused_yields_sentinel() {
    let url = format!("http://{}/", common::closed_port());
    let result = probe(&url, 5).await.unwrap();
    assert_eq!(result.status_code(), 0);
    assert!(!result.is_up());
}

#[tokio::test]
async fn test_headers_are_passed_through() {
    let addr = common::start_programmable_backend(|request| async move {
        let authorized = request
            .lines()
            .any(|line| line.eq_ignore_ascii_case("authorization: Bearer s3cret"));
        MockResponse::status(if authorized { 200 } else { 401 })
    })
    .await;
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("uptime.csv");

    let anonymous = pipeline::run(&config_for(format!("http://{}/", addr), &log), Uuid::new_v4()).await;
    assert_eq!(anonymous.result.unwrap().status_code(), 401);

    let mut config = config_for(format!("http://{}/", addr), &log);
    config
        .probe
        .headers
        .insert("Authorization".into(), "Bearer s3cret".into());
    let authorized = pipeline::run(&config, Uuid::new_v4()).await;
    assert_eq!(authorized.outcome, Outcome::Healthy);
}

#[tokio::test]
async fn test_repeated_runs_append_without_duplicate_header() {
    let addr = common::start_mock_backend(200).await;
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("uptime.csv");
    let config = config_for(format!("http://{}/", addr), &log);

    for _ in 0..3 {
        let report = pipeline::run(&config, Uuid::new_v4()).await;
        assert_eq!(report.outcome, Outcome::Healthy);
    }

    let content = fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert_eq!(content.matches(HEADER_LINE).count(), 1);

    let records = read_log(&log).unwrap();
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn test_record_failure_keeps_probe_outcome() {
    let addr = common::start_mock_backend(200).await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let report = pipeline::run(
        &config_for(format!("http://{}/", addr), &blocker.join("uptime.csv")),
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(report.outcome, Outcome::RecordFailed);
    assert_ne!(report.outcome.code(), Outcome::Down.code());
    assert!(!report.recorded);
    assert!(report.error.is_some());
    assert!(report.result.unwrap().is_up());
}
