use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use time::OffsetDateTime;

use crate::entities::agents;
use crate::errors::{ConflictKind, DomainError, NotFoundKind};

pub const STARTING_COINS: i64 = 1000;

/// Inserts a new agent. A unique-constraint violation on
/// `(game_id, name)` surfaces as a name-taken conflict.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    name: &str,
    token: &str,
) -> Result<agents::Model, DomainError> {
    let result = agents::ActiveModel {
        game_id: Set(game_id),
        name: Set(name.to_string()),
        token: Set(token.to_string()),
        coins: Set(STARTING_COINS),
        is_done: Set(false),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await;

    match result {
        Ok(agent) => Ok(agent),
        Err(err) => match DomainError::from(err) {
            DomainError::Conflict(ConflictKind::Other, _) => Err(DomainError::conflict(
                ConflictKind::NameTaken,
                format!("name '{name}' is already taken in this game"),
            )),
            other => Err(other),
        },
    }
}

pub async fn find_by_token<C: ConnectionTrait>(
    conn: &C,
    token: &str,
) -> Result<Option<agents::Model>, DomainError> {
    let agent = agents::Entity::find()
        .filter(agents::Column::Token.eq(token))
        .one(conn)
        .await?;
    Ok(agent)
}

pub async fn require<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
) -> Result<agents::Model, DomainError> {
    agents::Entity::find_by_id(agent_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Agent, format!("agent {agent_id} not found"))
        })
}

pub async fn list_by_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<agents::Model>, DomainError> {
    let agents = agents::Entity::find()
        .filter(agents::Column::GameId.eq(game_id))
        .order_by_asc(agents::Column::Id)
        .all(conn)
        .await?;
    Ok(agents)
}

pub async fn count_by_game<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<u64, DomainError> {
    let count = agents::Entity::find()
        .filter(agents::Column::GameId.eq(game_id))
        .count(conn)
        .await?;
    Ok(count)
}

/// id -> name for every agent in the game, for labeling views.
pub async fn names_by_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<HashMap<i64, String>, DomainError> {
    Ok(list_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect())
}

pub async fn set_done<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
    is_done: bool,
) -> Result<(), DomainError> {
    let agent = require(conn, agent_id).await?;
    if agent.is_done == is_done {
        return Ok(());
    }
    let mut active: agents::ActiveModel = agent.into();
    active.is_done = Set(is_done);
    active.update(conn).await?;
    Ok(())
}

pub async fn add_coins<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
    delta: i64,
) -> Result<(), DomainError> {
    let agent = require(conn, agent_id).await?;
    let balance = agent.coins + delta;
    let mut active: agents::ActiveModel = agent.into();
    active.coins = Set(balance);
    active.update(conn).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, agent_id: i64) -> Result<(), DomainError> {
    agents::Entity::delete_by_id(agent_id).exec(conn).await?;
    Ok(())
}

pub async fn delete_by_game<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<(), DomainError> {
    agents::Entity::delete_many()
        .filter(agents::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(())
}
