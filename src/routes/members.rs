use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::entities::member;
use crate::error::AppError;
use crate::services::members::{self, CreateMember};
use crate::AppState;

/// List active members grouped by instrument section
#[utoipa::path(
    get,
    path = "/members",
    responses(
        (status = 200, description = "Active members keyed by section, names ascending within each", body = BTreeMap<String, Vec<member::Model>>),
        (status = 500, description = "Persistence failure")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_members(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let grouped = members::list_grouped(&state.db).await?;
    Ok((StatusCode::OK, Json(grouped)))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member registered", body = member::Model),
        (status = 400, description = "Missing name or instrument"),
        (status = 500, description = "Persistence failure")
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateMember>,
) -> Result<impl IntoResponse, AppError> {
    let member = members::create(&state.db, payload).await?;
    tracing::info!(member_id = %member.id, "member registered");
    Ok((StatusCode::CREATED, Json(member)))
}
