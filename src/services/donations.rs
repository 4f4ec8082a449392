use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::donation::{self, DonationStatus};
use crate::error::AppError;

/// PIX key used when neither the request nor the environment provides one.
pub const DEFAULT_PIX_KEY: &str = "blocopraieira@gmail.com";

/// Upper bound on the public donation feed.
const RECENT_LIMIT: u64 = 50;

/// Payload for `POST /donations`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonation {
    /// Donation amount in BRL; a JSON number or a numeric string
    #[serde(default)]
    #[schema(value_type = f64)]
    pub amount: Value,
    /// Donor display name; omit to donate anonymously
    #[serde(default)]
    pub donor_name: Option<String>,
    /// Donor contact email
    #[serde(default)]
    pub donor_email: Option<String>,
    /// Destination PIX key; defaults to the configured one
    #[serde(default)]
    pub pix_key: Option<String>,
}

/// The most recent donations, newest first, capped at 50 records.
pub async fn list_recent(db: &DatabaseConnection) -> Result<Vec<donation::Model>, AppError> {
    donation::Entity::find()
        .order_by_desc(donation::Column::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(db)
        .await
        .map_err(|e| AppError::database("Failed to fetch donations", e))
}

#[derive(FromQueryResult)]
struct AmountSum {
    total: Option<f64>,
}

/// Sum of the amounts already confirmed by the payment side, zero when no
/// donation has completed yet. Pending and failed records never count.
pub async fn completed_total(db: &DatabaseConnection) -> Result<f64, AppError> {
    let row = donation::Entity::find()
        .select_only()
        .column_as(donation::Column::Amount.sum(), "total")
        .filter(donation::Column::Status.eq(DonationStatus::Completed))
        .into_model::<AmountSum>()
        .one(db)
        .await
        .map_err(|e| AppError::database("Failed to fetch donations", e))?;

    Ok(row.and_then(|r| r.total).unwrap_or(0.0))
}

/// Record a new donation. The amount must coerce to a finite number greater
/// than zero; nothing is written otherwise.
pub async fn create(
    db: &DatabaseConnection,
    configured_pix_key: Option<&str>,
    input: CreateDonation,
) -> Result<donation::Model, AppError> {
    let amount = match coerce_amount(&input.amount) {
        Some(a) if a > 0.0 => a,
        _ => return Err(AppError::validation("Valid amount is required")),
    };

    let record = donation::ActiveModel {
        id: Set(Uuid::new_v4()),
        amount: Set(amount),
        donor_name: Set(input.donor_name.filter(|s| !s.is_empty())),
        donor_email: Set(input.donor_email.filter(|s| !s.is_empty())),
        pix_key: Set(resolve_pix_key(
            input.pix_key.as_deref(),
            configured_pix_key,
        )),
        status: Set(DonationStatus::Pending),
        created_at: Set(Utc::now()),
    };

    record
        .insert(db)
        .await
        .map_err(|e| AppError::database("Failed to create donation", e))
}

/// Accepts a JSON number or a numeric string, the tolerance the public
/// donation form relies on.
fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Three-tier PIX key resolution: the request field, then the key configured
/// in the environment, then the bloco's own address. Blank values count as
/// absent at every tier.
pub fn resolve_pix_key(requested: Option<&str>, configured: Option<&str>) -> String {
    for tier in [requested, configured] {
        match tier {
            Some(key) if !key.trim().is_empty() => return key.trim().to_string(),
            _ => {}
        }
    }
    DEFAULT_PIX_KEY.to_string()
}
