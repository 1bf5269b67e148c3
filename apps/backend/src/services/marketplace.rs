//! Marketplace offers: create, accept, cancel, list.
//!
//! Creation locks the poster's side of the trade (coins for buy offers,
//! paint for sell_paint, the tile for tile offers); settlement checks
//! the accepter's side and moves both legs atomically. All three
//! mutations run inside the serialized write transaction, so no check
//! here can be invalidated by a concurrent request.

use sea_orm::{ActiveEnum, ConnectionTrait};
use serde::Serialize;
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;

use crate::domain::offers::OfferSpec;
use crate::entities::offers::{self, OfferKind, OfferStatus};
use crate::entities::paint_stocks::PaintColor;
use crate::errors::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};
use crate::repos;
use crate::services::economy;

/// An offer as clients see it, with agent names resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferView {
    pub id: i64,
    pub agent: String,
    pub agent_id: i64,
    pub offer_type: OfferKind,
    pub status: OfferStatus,
    pub tile_x: Option<i32>,
    pub tile_y: Option<i32>,
    pub paint_color: Option<PaintColor>,
    pub paint_quantity: Option<i32>,
    pub price: i64,
    pub accepted_by: Option<String>,
    pub created_at: String,
}

impl OfferView {
    fn from_model(offer: offers::Model, names: &HashMap<i64, String>) -> Self {
        let agent = names.get(&offer.agent_id).cloned().unwrap_or_default();
        let accepted_by = offer
            .accepted_by
            .and_then(|id| names.get(&id).cloned());
        let created_at = offer
            .created_at
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            id: offer.id,
            agent,
            agent_id: offer.agent_id,
            offer_type: offer.kind,
            status: offer.status,
            tile_x: offer.tile_x,
            tile_y: offer.tile_y,
            paint_color: offer.paint_color,
            paint_quantity: offer.paint_quantity,
            price: offer.price,
            accepted_by,
            created_at,
        }
    }
}

#[derive(Debug)]
pub struct AcceptedTrade {
    pub offer: offers::Model,
}

pub struct MarketplaceService;

impl MarketplaceService {
    pub fn new() -> Self {
        Self
    }

    /// All offers in the game, newest first.
    pub async fn list_offers<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<Vec<OfferView>, DomainError> {
        let names = repos::agents::names_by_game(conn, game_id).await?;
        let offers = repos::offers::list_by_game(conn, game_id).await?;
        Ok(offers
            .into_iter()
            .map(|offer| OfferView::from_model(offer, &names))
            .collect())
    }

    pub async fn view_offer<C: ConnectionTrait>(
        &self,
        conn: &C,
        offer: offers::Model,
    ) -> Result<OfferView, DomainError> {
        let names = repos::agents::names_by_game(conn, offer.game_id).await?;
        Ok(OfferView::from_model(offer, &names))
    }

    /// Posts an offer after verifying the poster can cover their side.
    pub async fn create_offer<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        spec: OfferSpec,
        price: i64,
    ) -> Result<offers::Model, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        if price <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidOffer,
                "price must be positive",
            ));
        }

        match spec {
            OfferSpec::SellTile { x, y } => {
                let tile = repos::tiles::require(conn, game_id, x, y).await?;
                if tile.owner_id != agent_id {
                    return Err(DomainError::forbidden(
                        ForbiddenKind::NotTileOwner,
                        format!("you don't own tile ({x}, {y})"),
                    ));
                }
                let listed = repos::offers::open_tile_offer_exists(
                    conn,
                    game_id,
                    agent_id,
                    x,
                    y,
                    &[OfferKind::SellTile],
                )
                .await?;
                if listed {
                    return Err(DomainError::conflict(
                        ConflictKind::TileAlreadyListed,
                        format!("tile ({x}, {y}) is already listed for sale"),
                    ));
                }
            }
            OfferSpec::BuyTile { x, y } => {
                let tile = repos::tiles::require(conn, game_id, x, y).await?;
                if tile.owner_id == agent_id {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidOffer,
                        format!("you already own tile ({x}, {y})"),
                    ));
                }
                self.require_coins(conn, game_id, agent_id, price).await?;
            }
            OfferSpec::SellPaint { color, quantity } => {
                self.require_paint(conn, game_id, agent_id, color, quantity)
                    .await?;
            }
            OfferSpec::BuyPaint { .. } => {
                self.require_coins(conn, game_id, agent_id, price).await?;
            }
        }

        let offer = repos::offers::create(conn, game_id, agent_id, spec, price).await?;
        economy::revoke_done(conn, agent_id).await?;
        Ok(offer)
    }

    /// Settles an open offer posted by someone else. Both legs of the
    /// trade move here, or the whole transaction rolls back.
    pub async fn accept_offer<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        offer_id: i64,
        accepter_id: i64,
    ) -> Result<AcceptedTrade, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        let offer = repos::offers::require(conn, game_id, offer_id).await?;
        if offer.status != OfferStatus::Open {
            return Err(DomainError::conflict(
                ConflictKind::OfferNotOpen,
                "offer is no longer open",
            ));
        }
        if offer.agent_id == accepter_id {
            return Err(DomainError::conflict(
                ConflictKind::OwnOffer,
                "cannot accept your own offer",
            ));
        }

        let poster_id = offer.agent_id;
        let spec = OfferSpec::from_row(&offer)?;
        match spec {
            OfferSpec::SellTile { x, y } => {
                self.require_coins(conn, game_id, accepter_id, offer.price)
                    .await?;
                let tile = repos::tiles::require(conn, game_id, x, y).await?;
                repos::agents::add_coins(conn, accepter_id, -offer.price).await?;
                repos::agents::add_coins(conn, poster_id, offer.price).await?;
                repos::tiles::set_owner(conn, tile, accepter_id).await?;
            }
            OfferSpec::BuyTile { x, y } => {
                let tile = repos::tiles::require(conn, game_id, x, y).await?;
                if tile.owner_id != accepter_id {
                    return Err(DomainError::forbidden(
                        ForbiddenKind::NotTileOwner,
                        format!("you don't own tile ({x}, {y})"),
                    ));
                }
                let locked = repos::offers::open_tile_offer_exists(
                    conn,
                    game_id,
                    accepter_id,
                    x,
                    y,
                    &[OfferKind::SellTile],
                )
                .await?;
                if locked {
                    return Err(DomainError::conflict(
                        ConflictKind::TileLocked,
                        format!("tile ({x}, {y}) is locked in your own offer"),
                    ));
                }
                repos::agents::add_coins(conn, poster_id, -offer.price).await?;
                repos::agents::add_coins(conn, accepter_id, offer.price).await?;
                repos::tiles::set_owner(conn, tile, poster_id).await?;
            }
            OfferSpec::SellPaint { color, quantity } => {
                self.require_coins(conn, game_id, accepter_id, offer.price)
                    .await?;
                repos::agents::add_coins(conn, accepter_id, -offer.price).await?;
                repos::agents::add_coins(conn, poster_id, offer.price).await?;
                repos::paint::add(conn, poster_id, color, -quantity).await?;
                repos::paint::add(conn, accepter_id, color, quantity).await?;
            }
            OfferSpec::BuyPaint { color, quantity } => {
                self.require_paint(conn, game_id, accepter_id, color, quantity)
                    .await?;
                repos::agents::add_coins(conn, poster_id, -offer.price).await?;
                repos::agents::add_coins(conn, accepter_id, offer.price).await?;
                repos::paint::add(conn, accepter_id, color, -quantity).await?;
                repos::paint::add(conn, poster_id, color, quantity).await?;
            }
        }

        let offer = repos::offers::mark_accepted(conn, offer, accepter_id).await?;
        // Settlement changes both inventories, so both sides go back to
        // work, not just the accepter.
        economy::revoke_done(conn, accepter_id).await?;
        economy::revoke_done(conn, poster_id).await?;
        Ok(AcceptedTrade { offer })
    }

    /// Withdraws the caller's own open offer, releasing whatever it
    /// locked.
    pub async fn cancel_offer<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        offer_id: i64,
        agent_id: i64,
    ) -> Result<offers::Model, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        let offer = repos::offers::require(conn, game_id, offer_id).await?;
        if offer.agent_id != agent_id {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotYourOffer,
                "not your offer",
            ));
        }
        if offer.status != OfferStatus::Open {
            return Err(DomainError::conflict(
                ConflictKind::OfferNotOpen,
                "offer is not open",
            ));
        }
        repos::offers::mark_cancelled(conn, offer).await
    }

    async fn require_coins<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        price: i64,
    ) -> Result<(), DomainError> {
        let available = economy::available_coins(conn, game_id, agent_id).await?;
        if available < price {
            return Err(DomainError::validation(
                ValidationKind::InsufficientCoins,
                format!("insufficient coins (available: {available})"),
            ));
        }
        Ok(())
    }

    async fn require_paint<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
        color: PaintColor,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let available = economy::available_paint(conn, game_id, agent_id, color).await?;
        if available < quantity {
            return Err(DomainError::validation(
                ValidationKind::InsufficientPaint,
                format!(
                    "insufficient {} paint (available: {available})",
                    color.to_value()
                ),
            ));
        }
        Ok(())
    }
}

impl Default for MarketplaceService {
    fn default() -> Self {
        Self::new()
    }
}
