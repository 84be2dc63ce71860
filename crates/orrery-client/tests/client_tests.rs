// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-level tests for the catalogue client against a wiremock server.

use std::time::Duration;

use orrery_client::CatalogueClient;
use orrery_core::types::{ChangeAction, DiscoveryChart, DiscoveryDataset, PlanetCreate, PlanetUpdate};
use orrery_core::{CatalogueSource, DiscoveryQuery, OrreryError, PlanetQuery};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogueClient {
    CatalogueClient::new(&server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_retries(1, Duration::from_millis(10))
}

fn admin_client_for(server: &MockServer) -> CatalogueClient {
    client_for(server).with_admin_key(Some("test-admin-key".into()))
}

fn planet_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "disc_method": "Transit",
        "disc_year": 2015,
        "orbperd": 33.0,
        "rade": 2.6,
        "masse": 8.6,
        "st_teff": 3457.0,
        "st_rad": 0.41,
        "st_mass": 0.36,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "is_deleted": false,
        "deleted_at": null
    })
}

#[tokio::test]
async fn health_probe_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/system/health"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "uptime": 12.5})))
        .mount(&server)
        .await;

    let health = client_for(&server).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.uptime, Some(12.5));
}

#[tokio::test]
async fn list_planets_sends_filters_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .and(query_param("limit", "8"))
        .and(query_param("offset", "0"))
        .and(query_param("sort_by", "created_at"))
        .and(query_param("sort_order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [planet_json(1, "K2-18 b")],
            "total": 1,
            "limit": 8,
            "offset": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_planets(&PlanetQuery::recently_created(8))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "K2-18 b");
    assert_eq!(page.items[0].disc_year, Some(2015));
}

#[tokio::test]
async fn planet_by_name_is_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/by-name/TOI%20700%20d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(planet_json(7, "TOI 700 d")))
        .mount(&server)
        .await;

    let planet = client_for(&server).planet_by_name("TOI 700 d").await.unwrap();
    assert_eq!(planet.id, 7);
}

#[tokio::test]
async fn not_found_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"Planet not found"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).planet_by_id(99).await.unwrap_err();
    match err {
        OrreryError::Api { status, url, body } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/planets/99"));
            assert!(body.contains("Planet not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_errors_are_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/count"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/planets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 5234})))
        .expect(1)
        .mount(&server)
        .await;

    let count = client_for(&server).planet_count().await.unwrap();
    assert_eq!(count.count, 5234);
}

#[tokio::test]
async fn retries_give_up_after_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/stats"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let err = client_for(&server).planet_stats().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/method-counts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).method_counts().await.unwrap_err();
    assert!(matches!(err, OrreryError::Decode { .. }));
}

#[tokio::test]
async fn admin_calls_without_key_never_hit_network() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.soft_delete_planet(3).await.unwrap_err();
    assert!(matches!(err, OrreryError::MissingCredential { .. }));
    let err = client.wipe_planets().await.unwrap_err();
    assert!(matches!(err, OrreryError::MissingCredential { operation: "wipe" }));
    let err = client.list_deleted_planets(10, 0).await.unwrap_err();
    assert!(matches!(err, OrreryError::MissingCredential { .. }));
}

#[tokio::test]
async fn soft_delete_sends_key_and_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/planets/3"))
        .and(header("x-api-key", "test-admin-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    admin_client_for(&server).soft_delete_planet(3).await.unwrap();
}

#[tokio::test]
async fn hard_delete_and_wipe_confirm() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/planets/admin/hard-delete/3"))
        .and(query_param("confirm", "true"))
        .and(header("x-api-key", "test-admin-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/planets/admin/delete-all"))
        .and(query_param("confirm", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client_for(&server);
    client.hard_delete_planet(3).await.unwrap();
    client.wipe_planets().await.unwrap();
}

#[tokio::test]
async fn restore_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/planets/3/restore"))
        .and(header("x-api-key", "test-admin-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "message": "restored"})))
        .mount(&server)
        .await;

    let out = admin_client_for(&server).restore_planet(3).await.unwrap();
    assert!(out.ok);
    assert_eq!(out.message, "restored");
}

#[tokio::test]
async fn create_posts_only_set_fields() {
    let server = MockServer::start().await;
    let mut created = planet_json(11, "Kepler-1b");
    created["changes"] = json!([{"field": "name", "before": null, "after": "Kepler-1b"}]);
    Mock::given(method("POST"))
        .and(path("/planets/"))
        .and(body_json(json!({"name": "Kepler-1b", "disc_year": 2009})))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;

    let payload = PlanetCreate {
        name: "Kepler-1b".into(),
        disc_year: Some(2009),
        ..Default::default()
    };
    let record = client_for(&server).create_planet(&payload).await.unwrap();
    assert_eq!(record.id, 11);
    assert_eq!(record.changes.len(), 1);
    assert_eq!(record.changes[0].after.as_str(), Some("Kepler-1b"));
}

#[tokio::test]
async fn create_without_name_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .create_planet(&PlanetCreate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OrreryError::InvalidArgument(_)));
}

#[tokio::test]
async fn patch_without_key_still_sends() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/planets/5"))
        .and(body_json(json!({"rade": 1.1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(planet_json(5, "Proxima b")))
        .expect(1)
        .mount(&server)
        .await;

    let update = PlanetUpdate {
        rade: Some(1.1),
        ..Default::default()
    };
    client_for(&server).patch_planet(5, &update).await.unwrap();
}

#[tokio::test]
async fn validation_error_body_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/planets/5"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "disc_year"], "msg": "Input should be a valid integer"}]
        })))
        .mount(&server)
        .await;

    let update = PlanetUpdate {
        name: Some("x".into()),
        ..Default::default()
    };
    let err = client_for(&server).patch_planet(5, &update).await.unwrap_err();
    assert_eq!(
        orrery_client::describe_error(&err),
        "Discovery Year: Input should be a valid integer"
    );
}

#[tokio::test]
async fn change_log_uses_key_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/change-logs"))
        .and(query_param("limit", "24"))
        .and(header_exists("x-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "planet_id": 42,
            "action": "update",
            "planet_name": "K2-18 b",
            "changes": [{"field": "disc_method", "before": "RV", "after": "Transit"}],
            "created_at": "2024-05-02T08:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = admin_client_for(&server).change_logs(24, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, ChangeAction::Update);
    assert_eq!(rows[0].changes[0].after.as_str(), Some("Transit"));
}

#[tokio::test]
async fn catalogue_source_passes_explicit_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/admin/deleted"))
        .and(query_param("limit", "12"))
        .and(query_param("offset", "0"))
        .and(header("x-api-key", "per-call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "name": "Gone b",
            "disc_method": null,
            "disc_year": 1999,
            "deleted_at": "2024-05-03T00:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let source: &dyn CatalogueSource = &client;
    let rows = source.list_deleted_planets(12, 0, "per-call").await.unwrap();
    assert_eq!(rows[0].name, "Gone b");
    assert_eq!(rows[0].disc_year, Some(1999));
    assert!(rows[0].rade.is_none());
}

#[tokio::test]
async fn discovery_dataset_decodes_tagged_union() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vis/discovery"))
        .and(query_param("chart", "year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": "year",
            "series": [{"disc_year": 1995, "count": 1}, {"disc_year": 2016, "count": 1505}]
        })))
        .mount(&server)
        .await;

    let dataset = client_for(&server)
        .discovery_dataset(&DiscoveryQuery::new(DiscoveryChart::Year))
        .await
        .unwrap();
    assert_eq!(dataset.chart(), DiscoveryChart::Year);
    match dataset {
        DiscoveryDataset::Year { series } => assert_eq!(series[1].count, 1505),
        other => panic!("unexpected dataset {other:?}"),
    }
}
