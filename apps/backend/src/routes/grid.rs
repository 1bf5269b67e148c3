//! Grid reads and painting.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::txn::{with_txn, with_write_txn};
use crate::entities::paint_stocks::PaintColor;
use crate::error::AppError;
use crate::extractors::{CurrentAgent, ValidatedJson};
use crate::services::games::GameService;
use crate::services::painting::PaintingService;
use crate::state::app_state::AppState;
use crate::ws::events::GameEvent;

#[derive(Debug, Deserialize)]
pub struct PaintRequest {
    pub x: i32,
    pub y: i32,
    pub color: PaintColor,
}

#[derive(Debug, Deserialize)]
pub struct UnpaintRequest {
    pub x: i32,
    pub y: i32,
}

async fn get_grid(
    state: web::Data<AppState>,
    agent: CurrentAgent,
) -> Result<HttpResponse, AppError> {
    let grid = with_txn(&state, move |txn| {
        Box::pin(async move {
            let grid = GameService::new().fetch_grid(txn, agent.game_id).await?;
            Ok(grid)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(grid))
}

async fn paint_tile(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    body: ValidatedJson<PaintRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let (x, y, color) = (req.x, req.y, req.color);
    let game_id = agent.game_id;
    let agent_id = agent.id;
    with_write_txn(&state, move |txn| {
        Box::pin(async move {
            PaintingService::new()
                .paint(txn, game_id, agent_id, x, y, color)
                .await?;
            Ok(())
        })
    })
    .await?;

    state.hub().broadcast(&GameEvent::TilePainted {
        x,
        y,
        color,
        agent_id: agent.id,
        agent: agent.name.clone(),
    });

    Ok(HttpResponse::Ok().json(json!({
        "status": "painted",
        "x": x,
        "y": y,
        "color": color,
    })))
}

async fn unpaint_tile(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    body: ValidatedJson<UnpaintRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let (x, y) = (req.x, req.y);
    let game_id = agent.game_id;
    let agent_id = agent.id;
    let returned = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let returned = PaintingService::new()
                .unpaint(txn, game_id, agent_id, x, y)
                .await?;
            Ok(returned)
        })
    })
    .await?;

    state.hub().broadcast(&GameEvent::TileUnpainted {
        x,
        y,
        agent_id: agent.id,
        agent: agent.name.clone(),
    });

    Ok(HttpResponse::Ok().json(json!({
        "status": "unpainted",
        "x": x,
        "y": y,
        "color_returned": returned,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/grid", web::get().to(get_grid))
        .route("/paint", web::post().to(paint_tile))
        .route("/unpaint", web::post().to(unpaint_tile));
}
