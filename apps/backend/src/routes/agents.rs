//! Registration, inventory, done declarations, and agent admin.

use actix_web::{web, HttpResponse};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::db::txn::{with_txn, with_write_txn};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentAgent, ValidatedJson};
use crate::services::agents::AgentService;
use crate::state::app_state::AppState;
use crate::ws::events::GameEvent;

pub const MAX_NAME_LEN: usize = 32;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct TileSummary {
    x: i32,
    y: i32,
    color: Option<String>,
}

#[derive(Debug, Serialize)]
struct InventoryResponse {
    agent_id: i64,
    name: String,
    coins: i64,
    paint: BTreeMap<String, i32>,
    tiles: Vec<TileSummary>,
    is_done: bool,
}

pub(super) fn inventory_response(
    snapshot: crate::services::agents::InventorySnapshot,
) -> impl Serialize {
    InventoryResponse {
        agent_id: snapshot.agent.id,
        name: snapshot.agent.name.clone(),
        coins: snapshot.agent.coins,
        paint: snapshot
            .paint
            .into_iter()
            .map(|(color, quantity)| (color.to_value(), quantity))
            .collect(),
        tiles: snapshot
            .tiles
            .into_iter()
            .map(|t| TileSummary {
                x: t.x,
                y: t.y,
                color: t.color.map(|c| c.to_value()),
            })
            .collect(),
        is_done: snapshot.agent.is_done,
    }
}

async fn register(
    state: web::Data<AppState>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let trimmed = name.trim().to_string();
    // Characters, not bytes: a 32-char multibyte name is fine.
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            format!("name must be 1..={MAX_NAME_LEN} characters"),
        ));
    }

    let agent = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let agent = AgentService::new().register(txn, &trimmed).await?;
            Ok(agent)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "agent_id": agent.id,
        "name": agent.name,
        "token": agent.token,
    })))
}

async fn get_inventory(
    state: web::Data<AppState>,
    agent: CurrentAgent,
) -> Result<HttpResponse, AppError> {
    let snapshot = with_txn(&state, move |txn| {
        Box::pin(async move {
            let snapshot = AgentService::new()
                .inventory(txn, agent.game_id, agent.id)
                .await?;
            Ok(snapshot)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(inventory_response(snapshot)))
}

async fn declare_done(
    state: web::Data<AppState>,
    agent: CurrentAgent,
) -> Result<HttpResponse, AppError> {
    let game_id = agent.game_id;
    let agent_id = agent.id;
    let outcome = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let outcome = AgentService::new().declare_done(txn, game_id, agent_id).await?;
            Ok(outcome)
        })
    })
    .await?;

    state.hub().broadcast(&GameEvent::AgentDone {
        agent_id: agent.id,
        agent: agent.name.clone(),
    });
    if outcome.finished {
        state.hub().broadcast(&GameEvent::GameFinished { game_id });
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "done" })))
}

async fn remove_agent(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let agent_id = path.into_inner();
    with_write_txn(&state, move |txn| {
        Box::pin(async move {
            AgentService::new().remove_agent(txn, agent_id).await?;
            Ok(())
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted", "agent_id": agent_id })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/inventory", web::get().to(get_inventory))
        .route("/done", web::post().to(declare_done))
        .route("/admin/agents/{agent_id}", web::delete().to(remove_agent));
}
