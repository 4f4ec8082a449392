use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use praieira_api::error::AppError;
use sea_orm::DbErr;
use serde_json::Value;

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error = AppError::validation("Valid amount is required");
    assert_eq!(error.to_string(), "Invalid request: Valid amount is required");

    let error = AppError::database(
        "Failed to fetch donations",
        DbErr::Custom("connection refused".to_string()),
    );
    assert_eq!(
        error.to_string(),
        "Failed to fetch donations: Custom Error: connection refused"
    );
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_validation_error_response() {
    let error = AppError::validation("Name and instrument are required");
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "Name and instrument are required");
}

#[tokio::test]
async fn test_database_error_response_hides_the_cause() {
    let error = AppError::database(
        "Failed to create donation",
        DbErr::Custom("connection refused".to_string()),
    );
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The public body carries the generic message only; the cause stays in
    // the server log.
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "Failed to create donation");
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));
}
