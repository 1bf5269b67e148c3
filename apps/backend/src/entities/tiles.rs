use sea_orm::entity::prelude::*;
use serde::Serialize;

use super::paint_stocks::PaintColor;

/// One cell of a game's grid. Every tile has an owner from the moment
/// the game starts; `color` is `None` while unpainted.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub x: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub y: i32,
    pub owner_id: i64,
    pub color: Option<PaintColor>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
