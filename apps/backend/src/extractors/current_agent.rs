//! Resolves the bearer token to the agent it belongs to.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::auth_token::parse_bearer;
use crate::repos;
use crate::state::app_state::AppState;

/// The authenticated agent, loaded per request. Coins and done status
/// are a snapshot from extraction time; anything that depends on fresh
/// balances re-reads inside its transaction.
#[derive(Debug, Clone)]
pub struct CurrentAgent {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub coins: i64,
    pub is_done: bool,
}

impl FromRequest for CurrentAgent {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = parse_bearer(&req)?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("application state not configured"))?;
            let db = require_db(state)?;
            let agent = repos::agents::find_by_token(db, &token)
                .await
                .map_err(AppError::from)?
                .ok_or_else(AppError::unauthorized_invalid_token)?;
            Ok(CurrentAgent {
                id: agent.id,
                game_id: agent.game_id,
                name: agent.name,
                coins: agent.coins,
                is_done: agent.is_done,
            })
        })
    }
}
