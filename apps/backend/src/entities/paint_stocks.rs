use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed eight-color palette. Colors never change mid-game; the hex
/// values live in `domain::palette`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "paint_color")]
#[serde(rename_all = "lowercase")]
pub enum PaintColor {
    #[sea_orm(string_value = "indigo")]
    Indigo,
    #[sea_orm(string_value = "teal")]
    Teal,
    #[sea_orm(string_value = "saffron")]
    Saffron,
    #[sea_orm(string_value = "coral")]
    Coral,
    #[sea_orm(string_value = "vermillion")]
    Vermillion,
    #[sea_orm(string_value = "slate")]
    Slate,
    #[sea_orm(string_value = "plum")]
    Plum,
    #[sea_orm(string_value = "cream")]
    Cream,
}

/// One agent's stock of one color. Quantity is kept non-negative by the
/// economy guards; rows are created lazily on first grant.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "paint_stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub agent_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub color: PaintColor,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
