use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};
use time::OffsetDateTime;

use crate::entities::games::{self, GamePhase};
use crate::errors::{DomainError, NotFoundKind};

/// The most recently created game, which is the "current" one.
pub async fn find_latest<C: ConnectionTrait>(conn: &C) -> Result<Option<games::Model>, DomainError> {
    let game = games::Entity::find()
        .order_by_desc(games::Column::Id)
        .one(conn)
        .await?;
    Ok(game)
}

pub async fn find_waiting<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<games::Model>, DomainError> {
    let game = games::Entity::find()
        .filter(games::Column::Phase.eq(GamePhase::Waiting))
        .order_by_desc(games::Column::Id)
        .one(conn)
        .await?;
    Ok(game)
}

pub async fn require<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DomainError> {
    games::Entity::find_by_id(game_id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found")))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    grid_size: i32,
) -> Result<games::Model, DomainError> {
    let game = games::ActiveModel {
        phase: Set(GamePhase::Waiting),
        grid_size: Set(grid_size),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(game)
}

pub async fn set_phase<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    phase: GamePhase,
) -> Result<(), DomainError> {
    let game = require(conn, game_id).await?;
    let mut active: games::ActiveModel = game.into();
    active.phase = Set(phase);
    active.update(conn).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<(), DomainError> {
    games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(())
}
