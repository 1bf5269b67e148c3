//! Public read-only endpoints for spectator UIs. No auth: these expose
//! the latest game regardless of who asks.

use actix_web::{web, HttpResponse};
use sea_orm::ConnectionTrait;

use crate::db::txn::with_txn;
use crate::entities::games;
use crate::error::AppError;
use crate::errors::{DomainError, NotFoundKind};
use crate::repos;
use crate::routes::agents::inventory_response;
use crate::services::agents::AgentService;
use crate::services::chat::ChatService;
use crate::services::games::GameService;
use crate::services::marketplace::MarketplaceService;
use crate::state::app_state::AppState;

async fn latest_game<C: ConnectionTrait>(conn: &C) -> Result<games::Model, DomainError> {
    repos::games::find_latest(conn)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "no game found"))
}

async fn public_grid(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let grid = with_txn(&state, |txn| {
        Box::pin(async move {
            let game = latest_game(txn).await?;
            let grid = GameService::new().fetch_grid(txn, game.id).await?;
            Ok(grid)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(grid))
}

async fn public_marketplace(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let offers = with_txn(&state, |txn| {
        Box::pin(async move {
            let game = latest_game(txn).await?;
            let offers = MarketplaceService::new().list_offers(txn, game.id).await?;
            Ok(offers)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(offers))
}

async fn public_chat(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let messages = with_txn(&state, |txn| {
        Box::pin(async move {
            let game = latest_game(txn).await?;
            let messages = ChatService::new().list_messages(txn, game.id).await?;
            Ok(messages)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(messages))
}

async fn public_inventories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let snapshots = with_txn(&state, |txn| {
        Box::pin(async move {
            let game = latest_game(txn).await?;
            let service = AgentService::new();
            let agents = repos::agents::list_by_game(txn, game.id).await?;
            let mut snapshots = Vec::with_capacity(agents.len());
            for agent in agents {
                snapshots.push(service.inventory(txn, game.id, agent.id).await?);
            }
            Ok(snapshots)
        })
    })
    .await?;

    let body: Vec<_> = snapshots.into_iter().map(inventory_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/grid/public", web::get().to(public_grid))
        .route("/marketplace/public", web::get().to(public_marketplace))
        .route("/chat/public", web::get().to(public_chat))
        .route("/inventories/public", web::get().to(public_inventories));
}
