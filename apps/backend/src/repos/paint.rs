use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

use crate::entities::paint_stocks::{self, PaintColor};
use crate::errors::{DomainError, InfraErrorKind};

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
    color: PaintColor,
) -> Result<Option<paint_stocks::Model>, DomainError> {
    let stock = paint_stocks::Entity::find_by_id((agent_id, color))
        .one(conn)
        .await?;
    Ok(stock)
}

/// Stock on hand; a missing row reads as zero.
pub async fn quantity<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
    color: PaintColor,
) -> Result<i32, DomainError> {
    Ok(find(conn, agent_id, color).await?.map_or(0, |s| s.quantity))
}

/// Adjusts one stock by `delta`, creating the row on first grant.
/// Callers check availability first; a result below zero means a guard
/// was skipped, and the transaction is aborted.
pub async fn add<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
    color: PaintColor,
    delta: i32,
) -> Result<(), DomainError> {
    match find(conn, agent_id, color).await? {
        Some(stock) => {
            let quantity = stock.quantity + delta;
            if quantity < 0 {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("paint stock for agent {agent_id} would go negative"),
                ));
            }
            let mut active: paint_stocks::ActiveModel = stock.into();
            active.quantity = Set(quantity);
            active.update(conn).await?;
        }
        None => {
            if delta < 0 {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("paint stock for agent {agent_id} would go negative"),
                ));
            }
            paint_stocks::ActiveModel {
                agent_id: Set(agent_id),
                color: Set(color),
                quantity: Set(delta),
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}

/// Seeds starting stocks from `(agent_id, color, quantity)` grants.
pub async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    grants: &[(i64, PaintColor, i32)],
) -> Result<(), DomainError> {
    if grants.is_empty() {
        return Ok(());
    }
    let rows = grants
        .iter()
        .map(|&(agent_id, color, quantity)| paint_stocks::ActiveModel {
            agent_id: Set(agent_id),
            color: Set(color),
            quantity: Set(quantity),
        });
    paint_stocks::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

pub async fn list_by_agent<C: ConnectionTrait>(
    conn: &C,
    agent_id: i64,
) -> Result<Vec<paint_stocks::Model>, DomainError> {
    let stocks = paint_stocks::Entity::find()
        .filter(paint_stocks::Column::AgentId.eq(agent_id))
        .all(conn)
        .await?;
    Ok(stocks)
}

pub async fn delete_by_agents<C: ConnectionTrait>(
    conn: &C,
    agent_ids: &[i64],
) -> Result<(), DomainError> {
    if agent_ids.is_empty() {
        return Ok(());
    }
    paint_stocks::Entity::delete_many()
        .filter(paint_stocks::Column::AgentId.is_in(agent_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(())
}
