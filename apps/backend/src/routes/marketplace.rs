//! Marketplace endpoints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::txn::{with_txn, with_write_txn};
use crate::domain::offers::OfferSpec;
use crate::entities::offers::OfferKind;
use crate::entities::paint_stocks::PaintColor;
use crate::error::AppError;
use crate::extractors::{CurrentAgent, ValidatedJson};
use crate::services::marketplace::MarketplaceService;
use crate::state::app_state::AppState;
use crate::ws::events::GameEvent;

#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    pub offer_type: OfferKind,
    #[serde(default)]
    pub tile_x: Option<i32>,
    #[serde(default)]
    pub tile_y: Option<i32>,
    #[serde(default)]
    pub paint_color: Option<PaintColor>,
    #[serde(default)]
    pub paint_quantity: Option<i32>,
    pub price: i64,
}

async fn get_marketplace(
    state: web::Data<AppState>,
    agent: CurrentAgent,
) -> Result<HttpResponse, AppError> {
    let offers = with_txn(&state, move |txn| {
        Box::pin(async move {
            let offers = MarketplaceService::new()
                .list_offers(txn, agent.game_id)
                .await?;
            Ok(offers)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(offers))
}

async fn post_offer(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    body: ValidatedJson<OfferRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let spec = OfferSpec::from_parts(
        req.offer_type,
        req.tile_x,
        req.tile_y,
        req.paint_color,
        req.paint_quantity,
    )
    .map_err(AppError::from)?;
    let price = req.price;
    let game_id = agent.game_id;
    let agent_id = agent.id;

    let view = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let service = MarketplaceService::new();
            let offer = service
                .create_offer(txn, game_id, agent_id, spec, price)
                .await?;
            let view = service.view_offer(txn, offer).await?;
            Ok(view)
        })
    })
    .await?;

    state
        .hub()
        .broadcast(&GameEvent::OfferPosted { offer: view.clone() });
    Ok(HttpResponse::Ok().json(view))
}

async fn accept_offer(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let offer_id = path.into_inner();
    let game_id = agent.game_id;
    let accepter_id = agent.id;

    let trade = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let trade = MarketplaceService::new()
                .accept_offer(txn, game_id, offer_id, accepter_id)
                .await?;
            Ok(trade)
        })
    })
    .await?;

    state.hub().broadcast(&GameEvent::OfferAccepted {
        offer_id: trade.offer.id,
        accepted_by_id: agent.id,
        accepted_by: agent.name.clone(),
    });

    Ok(HttpResponse::Ok().json(json!({ "status": "accepted", "offer_id": offer_id })))
}

async fn cancel_offer(
    state: web::Data<AppState>,
    agent: CurrentAgent,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let offer_id = path.into_inner();
    let game_id = agent.game_id;
    let agent_id = agent.id;

    with_write_txn(&state, move |txn| {
        Box::pin(async move {
            MarketplaceService::new()
                .cancel_offer(txn, game_id, offer_id, agent_id)
                .await?;
            Ok(())
        })
    })
    .await?;

    state
        .hub()
        .broadcast(&GameEvent::OfferCancelled { offer_id });
    Ok(HttpResponse::Ok().json(json!({ "status": "cancelled", "offer_id": offer_id })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/marketplace", web::get().to(get_marketplace))
        .route("/marketplace", web::post().to(post_offer))
        .route("/marketplace/{offer_id}/accept", web::post().to(accept_offer))
        .route("/marketplace/{offer_id}", web::delete().to(cancel_offer));
}
