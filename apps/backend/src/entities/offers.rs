use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::paint_stocks::PaintColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "offer_kind")]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    #[sea_orm(string_value = "sell_tile")]
    SellTile,
    #[sea_orm(string_value = "buy_tile")]
    BuyTile,
    #[sea_orm(string_value = "sell_paint")]
    SellPaint,
    #[sea_orm(string_value = "buy_paint")]
    BuyPaint,
}

/// Terminal states are final: an accepted or cancelled offer never
/// reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "offer_status")]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Marketplace offer row. The tile_* and paint_* columns are populated
/// according to `kind`; `domain::offers::OfferSpec` is the typed view.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub game_id: i64,
    pub agent_id: i64,
    pub kind: OfferKind,
    pub status: OfferStatus,
    pub tile_x: Option<i32>,
    pub tile_y: Option<i32>,
    pub paint_color: Option<PaintColor>,
    pub paint_quantity: Option<i32>,
    pub price: i64,
    pub accepted_by: Option<i64>,
    pub created_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
