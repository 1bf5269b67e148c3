use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};
use time::OffsetDateTime;

use crate::entities::chat_messages;
use crate::errors::DomainError;

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    content: &str,
) -> Result<chat_messages::Model, DomainError> {
    let message = chat_messages::ActiveModel {
        game_id: Set(game_id),
        agent_id: Set(agent_id),
        content: Set(content.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(message)
}

/// Oldest first.
pub async fn list_by_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<chat_messages::Model>, DomainError> {
    let messages = chat_messages::Entity::find()
        .filter(chat_messages::Column::GameId.eq(game_id))
        .order_by_asc(chat_messages::Column::Id)
        .all(conn)
        .await?;
    Ok(messages)
}

pub async fn delete_by_game<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<(), DomainError> {
    chat_messages::Entity::delete_many()
        .filter(chat_messages::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(())
}
