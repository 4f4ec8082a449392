use axum::body::to_bytes;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use praieira_api::{create_app, AppState};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt;

// Each test gets its own in-memory database; a single pooled connection keeps
// every query on the same database.
async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn test_app() -> Router {
    create_app(AppState::new(test_db().await, None))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_donation_ledger() {
    let app = test_app().await;

    let response = app.oneshot(get("/donations")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["donations"], json!([]));
    assert_eq!(json["totalAmount"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_create_donation_with_defaults() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post("/donations", json!({"amount": 50})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["amount"].as_f64().unwrap(), 50.0);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["donorName"], Value::Null);
    assert_eq!(created["donorEmail"], Value::Null);
    assert_eq!(created["pixKey"], "blocopraieira@gmail.com");
    assert!(created["id"].as_str().is_some());

    // The record shows up first in the ledger, but a pending donation does
    // not move the completed total.
    let response = app.oneshot(get("/donations")).await.unwrap();
    let ledger = body_json(response).await;
    assert_eq!(ledger["donations"][0]["id"], created["id"]);
    assert_eq!(ledger["totalAmount"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_create_donation_with_donor_details() {
    let app = test_app().await;

    let response = app
        .oneshot(post(
            "/donations",
            json!({
                "amount": "25.5",
                "donorName": "João",
                "donorEmail": "joao@example.com",
                "pixKey": "custom@key"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["amount"].as_f64().unwrap(), 25.5);
    assert_eq!(created["donorName"], "João");
    assert_eq!(created["donorEmail"], "joao@example.com");
    assert_eq!(created["pixKey"], "custom@key");
}

#[tokio::test]
async fn test_create_donation_rejects_invalid_amounts() {
    let app = test_app().await;

    for body in [
        json!({"amount": -5}),
        json!({"amount": 0}),
        json!({"amount": "not a number"}),
        json!({}),
    ] {
        let response = app.clone().oneshot(post("/donations", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Valid amount is required");
    }

    // Nothing was written
    let response = app.oneshot(get("/donations")).await.unwrap();
    let ledger = body_json(response).await;
    assert_eq!(ledger["donations"], json!([]));
}

#[tokio::test]
async fn test_configured_pix_key_is_used_as_fallback() {
    let app = create_app(AppState::new(
        test_db().await,
        Some("configured@key".to_string()),
    ));

    let response = app
        .oneshot(post("/donations", json!({"amount": 10})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["pixKey"], "configured@key");
}

#[tokio::test]
async fn test_create_member_and_list_grouped() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/members",
            json!({"name": "Ana", "instrument": "CAIXA"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let ana = body_json(response).await;
    assert_eq!(ana["name"], "Ana");
    assert_eq!(ana["instrument"], "CAIXA");
    assert_eq!(ana["isActive"], true);
    assert_eq!(ana["role"], Value::Null);
    assert!(ana["id"].as_str().is_some());

    let response = app
        .clone()
        .oneshot(post(
            "/members",
            json!({"name": "Bia", "instrument": "SURDO", "role": "Diretora"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/members")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let grouped = body_json(response).await;
    assert_eq!(grouped["CAIXA"][0]["name"], "Ana");
    assert_eq!(grouped["SURDO"][0]["name"], "Bia");
    assert_eq!(grouped["SURDO"][0]["role"], "Diretora");
}

#[tokio::test]
async fn test_create_member_requires_name_and_instrument() {
    let app = test_app().await;

    for body in [
        json!({"instrument": "CAIXA"}),
        json!({"name": "Ana"}),
        json!({"name": "", "instrument": "CAIXA"}),
        json!({}),
    ] {
        let response = app.clone().oneshot(post("/members", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Name and instrument are required");
    }

    // Nothing was written
    let response = app.oneshot(get("/members")).await.unwrap();
    let grouped = body_json(response).await;
    assert_eq!(grouped, json!({}));
}

#[tokio::test]
async fn test_create_member_rejects_unknown_instrument() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/members",
            json!({"name": "Zé", "instrument": "TRIANGLE"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Unknown instrument: TRIANGLE");

    let response = app.oneshot(get("/members")).await.unwrap();
    let grouped = body_json(response).await;
    assert_eq!(grouped, json!({}));
}
