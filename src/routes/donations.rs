use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::donation;
use crate::error::AppError;
use crate::services::donations::{self, CreateDonation};
use crate::AppState;

/// Payload of the public donation ledger.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationsResponse {
    /// Most recent donations, newest first (at most 50)
    pub donations: Vec<donation::Model>,
    /// Sum of all completed donation amounts
    pub total_amount: f64,
}

/// List recent donations together with the completed total
#[utoipa::path(
    get,
    path = "/donations",
    responses(
        (status = 200, description = "Recent donations and the completed total", body = DonationsResponse),
        (status = 500, description = "Persistence failure")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_donations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Two independent queries; the ledger is a display aggregate, so they do
    // not need to be transactionally consistent with each other.
    let donations = donations::list_recent(&state.db).await?;
    let total_amount = donations::completed_total(&state.db).await?;

    Ok((
        StatusCode::OK,
        Json(DonationsResponse {
            donations,
            total_amount,
        }),
    ))
}

/// Record a new donation
#[utoipa::path(
    post,
    path = "/donations",
    request_body = CreateDonation,
    responses(
        (status = 201, description = "Donation recorded", body = donation::Model),
        (status = 400, description = "Missing or non-positive amount"),
        (status = 500, description = "Persistence failure")
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create_donation(
    State(state): State<AppState>,
    Json(payload): Json<CreateDonation>,
) -> Result<impl IntoResponse, AppError> {
    let donation = donations::create(&state.db, state.pix_key.as_deref(), payload).await?;
    tracing::info!(donation_id = %donation.id, amount = donation.amount, "donation recorded");
    Ok((StatusCode::CREATED, Json(donation)))
}
