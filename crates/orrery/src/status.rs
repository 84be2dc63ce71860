// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `orrery status` command implementation.
//!
//! Queries the API's root, liveness, and readiness endpoints and reports
//! what came back. An unreachable API is a report, not an error.

use orrery_client::CatalogueClient;
use orrery_core::OrreryError;
use serde::Serialize;

use crate::output::Output;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub base_url: String,
    pub reachable: bool,
    pub message: Option<String>,
    pub health: Option<String>,
    pub uptime_secs: Option<f64>,
    pub uptime_human: Option<String>,
    pub readiness: Option<String>,
    pub db: Option<String>,
    pub admin_key_configured: bool,
    pub errors: Vec<String>,
}

/// Format seconds into a human-readable duration string.
fn format_uptime(secs: f64) -> String {
    let secs = secs.max(0.0) as u64;
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub async fn collect_status(client: &CatalogueClient) -> StatusReport {
    let (root, health, readiness) = tokio::join!(client.root(), client.health(), client.readiness());

    let mut errors = Vec::new();
    let mut note = |label: &str, err: &OrreryError| errors.push(format!("{label}: {err}"));

    let message = root.map(|r| r.message).map_err(|e| note("root", &e)).ok();
    let health = health.map_err(|e| note("health", &e)).ok();
    let readiness = readiness.map_err(|e| note("readiness", &e)).ok();

    StatusReport {
        base_url: client.base_url().to_string(),
        reachable: message.is_some() || health.is_some() || readiness.is_some(),
        message,
        uptime_secs: health.as_ref().and_then(|h| h.uptime),
        uptime_human: health.as_ref().and_then(|h| h.uptime).map(format_uptime),
        health: health.map(|h| h.status),
        db: readiness.as_ref().and_then(|r| r.db.clone()),
        readiness: readiness.map(|r| r.status),
        admin_key_configured: client.admin_key().is_some(),
        errors,
    }
}

/// Run the `orrery status` command.
pub async fn run_status(client: &CatalogueClient, out: Output) -> Result<(), OrreryError> {
    let report = collect_status(client).await;
    if out.json {
        return out.print_json(&report);
    }

    out.heading("orrery status");
    println!("    API:       {}", report.base_url);
    if let Some(message) = &report.message {
        println!("    Message:   {message}");
    }

    match report.health.as_deref() {
        Some("ok") => {
            let uptime = report.uptime_human.as_deref().unwrap_or("unknown");
            println!("    Health:    {} (uptime: {uptime})", out.ok("ok"));
        }
        Some(other) => println!("    Health:    {}", out.fail(other)),
        None => println!("    Health:    {}", out.fail("unreachable")),
    }

    match report.readiness.as_deref() {
        Some("ready") => println!("    Readiness: {}", out.ok("ready")),
        Some(other) => println!("    Readiness: {}", out.fail(other)),
        None => println!("    Readiness: {}", out.fail("unreachable")),
    }
    if let Some(db) = &report.db {
        println!("    Database:  {db}");
    }

    let key = if report.admin_key_configured {
        "configured"
    } else {
        "not configured"
    };
    println!("    Admin key: {key}");

    for err in &report.errors {
        println!("    {}", out.dim(err));
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn format_uptime_minutes() {
        assert_eq!(format_uptime(120.0), "2m");
    }

    #[test]
    fn format_uptime_hours() {
        assert_eq!(format_uptime(3720.4), "1h 2m");
    }

    #[test]
    fn format_uptime_days() {
        assert_eq!(format_uptime(90060.0), "1d 1h 1m");
    }

    #[tokio::test]
    async fn status_reports_partial_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/system/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ok", "uptime": 3600.0})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/system/readiness"))
            .respond_with(ResponseTemplate::new(503).set_body_json(
                serde_json::json!({"status": "not_ready", "db": "down"}),
            ))
            .mount(&server)
            .await;

        let client = CatalogueClient::new(&server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retries(0, Duration::from_millis(1));
        let report = collect_status(&client).await;

        assert!(report.reachable);
        assert_eq!(report.health.as_deref(), Some("ok"));
        assert_eq!(report.uptime_human.as_deref(), Some("1h 0m"));
        assert!(report.readiness.is_none());
        assert!(report.message.is_none());
        assert_eq!(report.errors.len(), 2);
        assert!(!report.admin_key_configured);
    }

    #[test]
    fn status_report_serializes() {
        let report = StatusReport {
            base_url: "http://localhost:8000/".into(),
            reachable: false,
            message: None,
            health: None,
            uptime_secs: None,
            uptime_human: None,
            readiness: None,
            db: None,
            admin_key_configured: true,
            errors: vec!["health: http error".into()],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"reachable\":false"));
        assert!(json.contains("\"admin_key_configured\":true"));
    }
}
