use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::entities::paint_stocks::PaintColor;
use crate::entities::tiles;
use crate::errors::{DomainError, NotFoundKind};

/// Seeds the whole grid in one batch from `(x, y, owner_id)` triples.
pub async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    assignments: &[(i32, i32, i64)],
) -> Result<(), DomainError> {
    if assignments.is_empty() {
        return Ok(());
    }
    let rows = assignments.iter().map(|&(x, y, owner_id)| tiles::ActiveModel {
        game_id: Set(game_id),
        x: Set(x),
        y: Set(y),
        owner_id: Set(owner_id),
        color: Set(None),
    });
    tiles::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    x: i32,
    y: i32,
) -> Result<Option<tiles::Model>, DomainError> {
    let tile = tiles::Entity::find()
        .filter(tiles::Column::GameId.eq(game_id))
        .filter(tiles::Column::X.eq(x))
        .filter(tiles::Column::Y.eq(y))
        .one(conn)
        .await?;
    Ok(tile)
}

pub async fn require<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    x: i32,
    y: i32,
) -> Result<tiles::Model, DomainError> {
    find(conn, game_id, x, y).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Tile, format!("tile ({x}, {y}) not found"))
    })
}

pub async fn set_color<C: ConnectionTrait>(
    conn: &C,
    tile: tiles::Model,
    color: Option<PaintColor>,
) -> Result<(), DomainError> {
    let mut active: tiles::ActiveModel = tile.into();
    active.color = Set(color);
    active.update(conn).await?;
    Ok(())
}

pub async fn set_owner<C: ConnectionTrait>(
    conn: &C,
    tile: tiles::Model,
    owner_id: i64,
) -> Result<(), DomainError> {
    let mut active: tiles::ActiveModel = tile.into();
    active.owner_id = Set(owner_id);
    active.update(conn).await?;
    Ok(())
}

pub async fn list_by_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<tiles::Model>, DomainError> {
    let tiles = tiles::Entity::find()
        .filter(tiles::Column::GameId.eq(game_id))
        .order_by_asc(tiles::Column::Y)
        .order_by_asc(tiles::Column::X)
        .all(conn)
        .await?;
    Ok(tiles)
}

pub async fn list_by_owner<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    owner_id: i64,
) -> Result<Vec<tiles::Model>, DomainError> {
    let tiles = tiles::Entity::find()
        .filter(tiles::Column::GameId.eq(game_id))
        .filter(tiles::Column::OwnerId.eq(owner_id))
        .order_by_asc(tiles::Column::Y)
        .order_by_asc(tiles::Column::X)
        .all(conn)
        .await?;
    Ok(tiles)
}

pub async fn count_painted<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    let count = tiles::Entity::find()
        .filter(tiles::Column::GameId.eq(game_id))
        .filter(tiles::Column::Color.is_not_null())
        .count(conn)
        .await?;
    Ok(count)
}

pub async fn count_unpainted<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    let count = tiles::Entity::find()
        .filter(tiles::Column::GameId.eq(game_id))
        .filter(tiles::Column::Color.is_null())
        .count(conn)
        .await?;
    Ok(count)
}

pub async fn delete_by_game<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<(), DomainError> {
    tiles::Entity::delete_many()
        .filter(tiles::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(())
}
