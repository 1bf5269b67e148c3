//! Painting and unpainting tiles.

use sea_orm::{ActiveEnum, ConnectionTrait};

use crate::entities::paint_stocks::PaintColor;
use crate::errors::{DomainError, ForbiddenKind, ValidationKind};
use crate::repos;
use crate::services::economy;

pub struct PaintingService;

impl PaintingService {
    pub fn new() -> Self {
        Self
    }

    /// Paints an owned, unlocked tile, spending one unit of `color`.
    /// Repainting first refunds the old color, so repaints never leak
    /// paint out of the economy.
    pub async fn paint<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        x: i32,
        y: i32,
        color: PaintColor,
    ) -> Result<(), DomainError> {
        economy::require_running_game(conn, game_id).await?;
        let tile = repos::tiles::require(conn, game_id, x, y).await?;
        if tile.owner_id != agent_id {
            return Err(not_tile_owner(x, y));
        }
        economy::require_tile_unlocked(conn, game_id, agent_id, x, y).await?;

        let available = economy::available_paint(conn, game_id, agent_id, color).await?;
        if available < 1 {
            return Err(DomainError::validation(
                ValidationKind::InsufficientPaint,
                format!("no {} paint available", color.to_value()),
            ));
        }

        if let Some(old) = tile.color {
            repos::paint::add(conn, agent_id, old, 1).await?;
        }
        repos::tiles::set_color(conn, tile, Some(color)).await?;
        repos::paint::add(conn, agent_id, color, -1).await?;
        economy::revoke_done(conn, agent_id).await?;
        Ok(())
    }

    /// Clears an owned, painted, unlocked tile and refunds the paint.
    /// Returns the color that was refunded.
    pub async fn unpaint<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        x: i32,
        y: i32,
    ) -> Result<PaintColor, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        let tile = repos::tiles::require(conn, game_id, x, y).await?;
        if tile.owner_id != agent_id {
            return Err(not_tile_owner(x, y));
        }
        let old = tile.color.ok_or_else(|| {
            DomainError::validation(ValidationKind::TileNotPainted, "tile is not painted")
        })?;
        economy::require_tile_unlocked(conn, game_id, agent_id, x, y).await?;

        repos::paint::add(conn, agent_id, old, 1).await?;
        repos::tiles::set_color(conn, tile, None).await?;
        economy::revoke_done(conn, agent_id).await?;
        Ok(old)
    }
}

fn not_tile_owner(x: i32, y: i32) -> DomainError {
    DomainError::forbidden(
        ForbiddenKind::NotTileOwner,
        format!("you don't own tile ({x}, {y})"),
    )
}

impl Default for PaintingService {
    fn default() -> Self {
        Self::new()
    }
}
