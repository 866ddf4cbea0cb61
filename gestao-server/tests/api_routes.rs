// gestao-server/tests/api_routes.rs
// Router tests through tower oneshot (no network)

use axum::Router;
use axum::body::Body;
use gestao_server::{Config, ServerState, build_app};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

async fn app(dir: &TempDir) -> Router {
    let config = Config::with_overrides(dir.path(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    build_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn entry_body(name: &str, hours: f64) -> Value {
    json!({"name": name, "reason": "Projeto X", "type": "extra", "date": "2024-06-01", "hours": hours})
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn create_list_delete_entry() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let (status, created) = send(&app, "POST", "/api/entries", Some(entry_body("Ana", 3.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["date"], json!("2024-06-01"));
    assert_eq!(created["type"], json!("extra"));

    let (_, second) = send(&app, "POST", "/api/entries", Some(entry_body("Bruno", 1.0))).await;
    assert_eq!(second["id"], json!(2));

    let (status, list) = send(&app, "GET", "/api/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);

    let (status, removed) = send(&app, "DELETE", "/api/entries/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["name"], json!("Ana"));

    let (status, body) = send(&app, "DELETE", "/api/entries/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Not found"));

    let (_, list) = send(&app, "GET", "/api/entries", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_entry_payloads_are_rejected() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let cases = [
        json!({"reason": "x", "date": "2024-06-01", "hours": 1}),
        json!({"name": "Ana", "date": "2024-06-01", "hours": 1}),
        json!({"name": "Ana", "reason": "x", "hours": 1}),
        json!({"name": "Ana", "reason": "x", "date": "2024-06-01", "hours": "1"}),
        json!({"name": "Ana", "reason": "x", "date": "2024-06-01"}),
        json!({"name": "Ana", "reason": "x", "date": "2024-06-01", "hours": 1, "type": "bonus"}),
    ];
    for case in cases {
        let (status, body) = send(&app, "POST", "/api/entries", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {case}");
        assert_eq!(body["error"], json!("Invalid payload"));
    }

    let (_, list) = send(&app, "GET", "/api/entries", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_type_defaults_to_extra() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let body = json!({"name": "Ana", "reason": "x", "date": "2024-06-01T00:00:00.000Z", "hours": 2});
    let (status, created) = send(&app, "POST", "/api/entries", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], json!("extra"));
    assert_eq!(created["date"], json!("2024-06-01"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/entries")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vacations_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let body = json!({"name": " Ana ", "startDate": "2024-07-01", "endDate": "2024-07-10"});
    let (status, created) = send(&app, "POST", "/api/vacations", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["name"], json!("Ana"));
    assert_eq!(created["notes"], json!(""));

    let body = json!({"name": "Bruno", "startDate": "2024-08-01", "endDate": "2024-08-02", "notes": "praia"});
    send(&app, "POST", "/api/vacations", Some(body)).await;

    let (_, list) = send(&app, "GET", "/api/vacations", None).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana", "Bruno"]);

    let (status, _) = send(&app, "DELETE", "/api/vacations/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", "/api/vacations/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_vacations_are_rejected() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir).await;

    let cases = [
        json!({"startDate": "2024-07-01", "endDate": "2024-07-10"}),
        json!({"name": "Ana", "endDate": "2024-07-10"}),
        json!({"name": "Ana", "startDate": "2024-07-01"}),
        json!({"name": "Ana", "startDate": "2024-07-10", "endDate": "2024-07-01"}),
    ];
    for case in cases {
        let (status, _) = send(&app, "POST", "/api/vacations", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {case}");
    }
}

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    {
        let app = app(&dir).await;
        send(&app, "POST", "/api/entries", Some(entry_body("Ana", 3.0))).await;
    }

    let app = app(&dir).await;
    let (_, list) = send(&app, "GET", "/api/entries", None).await;
    assert_eq!(list[0]["name"], json!("Ana"));

    let (_, next) = send(&app, "POST", "/api/entries", Some(entry_body("Bruno", 1.0))).await;
    assert_eq!(next["id"], json!(2));
}

#[tokio::test]
async fn legacy_document_with_bad_records_keeps_serving() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("db.json"),
        json!({
            "seq": {"entries": 3, "vacations": 0},
            "entries": [
                {"id": 3, "name": "Bruno", "reason": "x", "type": "extra", "date": null, "hours": 1},
                {"id": 2, "name": "Ana", "reason": "y", "type": "desconto", "date": "2024-06-02T00:00:00.000Z", "hours": -1}
            ],
            "vacations": []
        })
        .to_string(),
    )
    .unwrap();
    let app = app(&dir).await;

    let (status, list) = send(&app, "GET", "/api/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["date"], json!("2024-06-02"));

    let (status, created) = send(&app, "POST", "/api/entries", Some(entry_body("Carla", 2.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(4));

    let (status, _) = send(&app, "DELETE", "/api/entries/2", None).await;
    assert_eq!(status, StatusCode::OK);
}
