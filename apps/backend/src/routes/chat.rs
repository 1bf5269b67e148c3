//! In-game chat endpoints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::txn::{with_txn, with_write_txn};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentAgent, ValidatedJson};
use crate::services::chat::ChatService;
use crate::state::app_state::AppState;
use crate::ws::events::GameEvent;

pub const MAX_MESSAGE_LEN: usize = 500;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub content: String,
}

async fn get_chat(
    state: web::Data<AppState>,
    agent: CurrentAgent,
) -> Result<HttpResponse, AppError> {
    let messages = with_txn(&state, move |txn| {
        Box::pin(async move {
            let messages = ChatService::new().list_messages(txn, agent.game_id).await?;
            Ok(messages)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(messages))
}

async fn post_chat(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    body: ValidatedJson<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let content = body.into_inner().content;
    if content.is_empty() || content.len() > MAX_MESSAGE_LEN {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            format!("content must be 1..={MAX_MESSAGE_LEN} characters"),
        ));
    }

    let game_id = agent.game_id;
    let agent_id = agent.id;
    let agent_name = agent.name.clone();
    let message = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let message = ChatService::new()
                .post_message(txn, game_id, agent_id, &agent_name, &content)
                .await?;
            Ok(message)
        })
    })
    .await?;

    state.hub().broadcast(&GameEvent::ChatMessage {
        id: message.id,
        agent_id: message.agent_id,
        agent: message.agent.clone(),
        content: message.content.clone(),
    });

    Ok(HttpResponse::Ok().json(message))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::get().to(get_chat))
        .route("/chat", web::post().to(post_chat));
}
