use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Instrument sections of the bloco. `Ord` follows the declaration order,
/// which is the order sections appear in the roster (mestres first).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    #[sea_orm(string_value = "MESTRES")]
    Mestres,
    #[sea_orm(string_value = "HARMONIA")]
    Harmonia,
    #[sea_orm(string_value = "CAIXA")]
    Caixa,
    #[sea_orm(string_value = "REPINIQUE")]
    Repinique,
    #[sea_orm(string_value = "SURDO")]
    Surdo,
    #[sea_orm(string_value = "XEQUERE_GANZA")]
    XequereGanza,
    #[sea_orm(string_value = "TAMBORIM")]
    Tamborim,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "members")]
#[serde(rename_all = "camelCase")]
#[schema(as = Member)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub instrument: Instrument,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
