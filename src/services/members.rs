use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::member::{self, Instrument};
use crate::error::AppError;

/// Payload for `POST /members`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    /// Member name as it should appear in the roster
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form role within the section, e.g. "Diretora"
    #[serde(default)]
    pub role: Option<String>,
    /// Instrument section, e.g. "CAIXA"
    #[serde(default)]
    pub instrument: Option<String>,
}

/// Active members grouped by instrument section. Sections come out in the
/// enum's declared order, names ascending within each.
pub async fn list_grouped(
    db: &DatabaseConnection,
) -> Result<BTreeMap<Instrument, Vec<member::Model>>, AppError> {
    let members = member::Entity::find()
        .filter(member::Column::IsActive.eq(true))
        .order_by_asc(member::Column::Name)
        .all(db)
        .await
        .map_err(|e| AppError::database("Failed to fetch members", e))?;

    Ok(group_by_instrument(members))
}

/// Single pass over name-sorted rows; the map's key order (the enum `Ord`)
/// gives the section order, insertion order gives the name order.
pub fn group_by_instrument(
    members: Vec<member::Model>,
) -> BTreeMap<Instrument, Vec<member::Model>> {
    let mut grouped: BTreeMap<Instrument, Vec<member::Model>> = BTreeMap::new();
    for member in members {
        grouped.entry(member.instrument).or_default().push(member);
    }
    grouped
}

/// Register a new member. Name and instrument are required; the member starts
/// active with `joined_at` set to now.
pub async fn create(
    db: &DatabaseConnection,
    input: CreateMember,
) -> Result<member::Model, AppError> {
    let name = match input.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return Err(AppError::validation("Name and instrument are required")),
    };
    let instrument = match input.instrument.as_deref().map(str::trim) {
        Some(i) if !i.is_empty() => Instrument::try_from_value(&i.to_string())
            .map_err(|_| AppError::validation(format!("Unknown instrument: {}", i)))?,
        _ => return Err(AppError::validation("Name and instrument are required")),
    };

    let record = member::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        role: Set(input.role.filter(|r| !r.is_empty())),
        instrument: Set(instrument),
        is_active: Set(true),
        joined_at: Set(Utc::now()),
    };

    record
        .insert(db)
        .await
        .map_err(|e| AppError::database("Failed to create member", e))
}
