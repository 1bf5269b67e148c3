//! In-game chat.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;

use crate::entities::chat_messages;
use crate::errors::DomainError;
use crate::repos;
use crate::services::economy;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessageView {
    pub id: i64,
    pub agent: String,
    pub agent_id: i64,
    pub content: String,
    pub created_at: String,
}

impl ChatMessageView {
    fn from_model(message: chat_messages::Model, names: &HashMap<i64, String>) -> Self {
        let agent = names.get(&message.agent_id).cloned().unwrap_or_default();
        let created_at = message.created_at.format(&Rfc3339).unwrap_or_default();
        Self {
            id: message.id,
            agent,
            agent_id: message.agent_id,
            content: message.content,
            created_at,
        }
    }
}

pub struct ChatService;

impl ChatService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_messages<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<Vec<ChatMessageView>, DomainError> {
        let names = repos::agents::names_by_game(conn, game_id).await?;
        let messages = repos::chat::list_by_game(conn, game_id).await?;
        Ok(messages
            .into_iter()
            .map(|m| ChatMessageView::from_model(m, &names))
            .collect())
    }

    /// Posts a message; chat only flows while the game is running.
    pub async fn post_message<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        agent_name: &str,
        content: &str,
    ) -> Result<ChatMessageView, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        let message = repos::chat::create(conn, game_id, agent_id, content).await?;
        let created_at = message.created_at.format(&Rfc3339).unwrap_or_default();
        Ok(ChatMessageView {
            id: message.id,
            agent: agent_name.to_string(),
            agent_id,
            content: message.content,
            created_at,
        })
    }
}

impl Default for ChatService {
    fn default() -> Self {
        Self::new()
    }
}
