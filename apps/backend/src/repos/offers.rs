use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};
use time::OffsetDateTime;

use crate::domain::offers::OfferSpec;
use crate::entities::offers::{self, OfferKind, OfferStatus};
use crate::entities::paint_stocks::PaintColor;
use crate::errors::{DomainError, NotFoundKind};

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    spec: OfferSpec,
    price: i64,
) -> Result<offers::Model, DomainError> {
    let (tile_x, tile_y) = match spec.tile() {
        Some((x, y)) => (Some(x), Some(y)),
        None => (None, None),
    };
    let (paint_color, paint_quantity) = match spec.paint() {
        Some((color, quantity)) => (Some(color), Some(quantity)),
        None => (None, None),
    };
    let offer = offers::ActiveModel {
        game_id: Set(game_id),
        agent_id: Set(agent_id),
        kind: Set(spec.kind()),
        status: Set(OfferStatus::Open),
        tile_x: Set(tile_x),
        tile_y: Set(tile_y),
        paint_color: Set(paint_color),
        paint_quantity: Set(paint_quantity),
        price: Set(price),
        accepted_by: Set(None),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(offer)
}

pub async fn require<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    offer_id: i64,
) -> Result<offers::Model, DomainError> {
    offers::Entity::find_by_id(offer_id)
        .filter(offers::Column::GameId.eq(game_id))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Offer, format!("offer {offer_id} not found"))
        })
}

/// Newest first, ties broken by id.
pub async fn list_by_game<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<offers::Model>, DomainError> {
    let offers = offers::Entity::find()
        .filter(offers::Column::GameId.eq(game_id))
        .order_by_desc(offers::Column::CreatedAt)
        .order_by_desc(offers::Column::Id)
        .all(conn)
        .await?;
    Ok(offers)
}

async fn open_by_agent<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    kinds: &[OfferKind],
) -> Result<Vec<offers::Model>, DomainError> {
    let offers = offers::Entity::find()
        .filter(offers::Column::GameId.eq(game_id))
        .filter(offers::Column::AgentId.eq(agent_id))
        .filter(offers::Column::Status.eq(OfferStatus::Open))
        .filter(offers::Column::Kind.is_in(kinds.iter().copied()))
        .all(conn)
        .await?;
    Ok(offers)
}

/// Coins committed to the agent's open buy offers.
pub async fn locked_coins<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
) -> Result<i64, DomainError> {
    let open = open_by_agent(
        conn,
        game_id,
        agent_id,
        &[OfferKind::BuyTile, OfferKind::BuyPaint],
    )
    .await?;
    Ok(open.iter().map(|o| o.price).sum())
}

/// Units of `color` committed to the agent's open sell_paint offers.
pub async fn locked_paint<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    color: PaintColor,
) -> Result<i32, DomainError> {
    let open = open_by_agent(conn, game_id, agent_id, &[OfferKind::SellPaint]).await?;
    Ok(open
        .iter()
        .filter(|o| o.paint_color == Some(color))
        .filter_map(|o| o.paint_quantity)
        .sum())
}

/// Whether the agent has an open offer of one of `kinds` on this tile.
pub async fn open_tile_offer_exists<C: ConnectionTrait>(
    conn: &C,
    game_id: i64,
    agent_id: i64,
    x: i32,
    y: i32,
    kinds: &[OfferKind],
) -> Result<bool, DomainError> {
    let open = open_by_agent(conn, game_id, agent_id, kinds).await?;
    Ok(open
        .iter()
        .any(|o| o.tile_x == Some(x) && o.tile_y == Some(y)))
}

pub async fn mark_accepted<C: ConnectionTrait>(
    conn: &C,
    offer: offers::Model,
    accepted_by: i64,
) -> Result<offers::Model, DomainError> {
    let mut active: offers::ActiveModel = offer.into();
    active.status = Set(OfferStatus::Accepted);
    active.accepted_by = Set(Some(accepted_by));
    let updated = active.update(conn).await?;
    Ok(updated)
}

pub async fn mark_cancelled<C: ConnectionTrait>(
    conn: &C,
    offer: offers::Model,
) -> Result<offers::Model, DomainError> {
    let mut active: offers::ActiveModel = offer.into();
    active.status = Set(OfferStatus::Cancelled);
    let updated = active.update(conn).await?;
    Ok(updated)
}

pub async fn delete_by_game<C: ConnectionTrait>(conn: &C, game_id: i64) -> Result<(), DomainError> {
    offers::Entity::delete_many()
        .filter(offers::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(())
}
