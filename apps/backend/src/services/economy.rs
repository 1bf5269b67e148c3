//! Shared economy guards.
//!
//! "Available" always means on-hand minus whatever is committed to the
//! agent's own open offers. Every spend check in the crate goes through
//! these helpers, and callers run them inside the serialized write
//! transaction so a passed check cannot be invalidated before the write
//! lands.

use sea_orm::ConnectionTrait;

use crate::entities::games::{self, GamePhase};
use crate::entities::offers::OfferKind;
use crate::entities::paint_stocks::PaintColor;
use crate::errors::{ConflictKind, DomainError, PhaseKind};
use crate::repos;

/// Loads the game and rejects anything but the running phase.
pub async fn require_running_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DomainError> {
    let game = repos::games::require(conn, game_id).await?;
    if game.phase != GamePhase::Running {
        return Err(DomainError::phase(
            PhaseKind::GameNotRunning,
            "game is not running",
        ));
    }
    Ok(game)
}

/// Coins on hand minus coins committed to open buy offers.
pub async fn available_coins<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
) -> Result<i64, DomainError> {
    let agent = repos::agents::require(conn, agent_id).await?;
    let locked = repos::offers::locked_coins(conn, game_id, agent_id).await?;
    Ok(agent.coins - locked)
}

/// Paint on hand minus paint committed to open sell_paint offers.
pub async fn available_paint<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    color: PaintColor,
) -> Result<i32, DomainError> {
    let stock = repos::paint::quantity(conn, agent_id, color).await?;
    let locked = repos::offers::locked_paint(conn, game_id, agent_id, color).await?;
    Ok(stock - locked)
}

/// Rejects the action if the agent holds an open tile offer on this
/// tile; a committed tile cannot be repainted or unpainted out from
/// under the offer.
pub async fn require_tile_unlocked<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    x: i32,
    y: i32,
) -> Result<(), DomainError> {
    let locked = repos::offers::open_tile_offer_exists(
        conn,
        game_id,
        agent_id,
        x,
        y,
        &[OfferKind::SellTile, OfferKind::BuyTile],
    )
    .await?;
    if locked {
        return Err(DomainError::conflict(
            ConflictKind::TileLocked,
            format!("tile ({x}, {y}) is locked in a marketplace offer"),
        ));
    }
    Ok(())
}

/// Any successful action by a done agent puts them back to work.
pub async fn revoke_done<C: ConnectionTrait>(conn: &C, agent_id: i64) -> Result<(), DomainError> {
    repos::agents::set_done(conn, agent_id, false).await
}
