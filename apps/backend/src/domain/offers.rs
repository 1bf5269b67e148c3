//! Typed view of a marketplace offer's kind-specific fields.

use crate::entities::offers::{self, OfferKind};
use crate::entities::paint_stocks::PaintColor;
use crate::errors::{DomainError, InfraErrorKind, ValidationKind};

/// What an offer is about, with exactly the fields its kind needs.
/// The flat nullable columns on the `offers` table are only ever read
/// and written through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSpec {
    SellTile { x: i32, y: i32 },
    BuyTile { x: i32, y: i32 },
    SellPaint { color: PaintColor, quantity: i32 },
    BuyPaint { color: PaintColor, quantity: i32 },
}

impl OfferSpec {
    /// Builds a spec from the flat request fields, rejecting requests
    /// where the kind and the populated fields disagree.
    pub fn from_parts(
        kind: OfferKind,
        tile_x: Option<i32>,
        tile_y: Option<i32>,
        paint_color: Option<PaintColor>,
        paint_quantity: Option<i32>,
    ) -> Result<Self, DomainError> {
        match kind {
            OfferKind::SellTile | OfferKind::BuyTile => {
                let (x, y) = match (tile_x, tile_y) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        return Err(DomainError::validation(
                            ValidationKind::InvalidOffer,
                            "tile offers require tile_x and tile_y",
                        ))
                    }
                };
                Ok(match kind {
                    OfferKind::SellTile => OfferSpec::SellTile { x, y },
                    _ => OfferSpec::BuyTile { x, y },
                })
            }
            OfferKind::SellPaint | OfferKind::BuyPaint => {
                let (color, quantity) = match (paint_color, paint_quantity) {
                    (Some(c), Some(q)) => (c, q),
                    _ => {
                        return Err(DomainError::validation(
                            ValidationKind::InvalidOffer,
                            "paint offers require paint_color and paint_quantity",
                        ))
                    }
                };
                if quantity < 1 {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidOffer,
                        "paint_quantity must be at least 1",
                    ));
                }
                Ok(match kind {
                    OfferKind::SellPaint => OfferSpec::SellPaint { color, quantity },
                    _ => OfferSpec::BuyPaint { color, quantity },
                })
            }
        }
    }

    /// Reconstructs the spec from a stored row. A row whose columns do
    /// not match its kind indicates corruption, not caller error.
    pub fn from_row(offer: &offers::Model) -> Result<Self, DomainError> {
        Self::from_parts(
            offer.kind,
            offer.tile_x,
            offer.tile_y,
            offer.paint_color,
            offer.paint_quantity,
        )
        .map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("offer {} has fields inconsistent with its kind", offer.id),
            )
        })
    }

    pub fn kind(&self) -> OfferKind {
        match self {
            OfferSpec::SellTile { .. } => OfferKind::SellTile,
            OfferSpec::BuyTile { .. } => OfferKind::BuyTile,
            OfferSpec::SellPaint { .. } => OfferKind::SellPaint,
            OfferSpec::BuyPaint { .. } => OfferKind::BuyPaint,
        }
    }

    pub fn tile(&self) -> Option<(i32, i32)> {
        match *self {
            OfferSpec::SellTile { x, y } | OfferSpec::BuyTile { x, y } => Some((x, y)),
            _ => None,
        }
    }

    pub fn paint(&self) -> Option<(PaintColor, i32)> {
        match *self {
            OfferSpec::SellPaint { color, quantity } | OfferSpec::BuyPaint { color, quantity } => {
                Some((color, quantity))
            }
            _ => None,
        }
    }
}
