//! Domain-level error taxonomy.
//!
//! Services and repos speak [`DomainError`]; the HTTP layer converts it
//! into an `AppError` (and from there into a problem-details response).
//! Keeping the domain taxonomy separate from HTTP status codes lets the
//! game rules stay ignorant of the transport.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    InvalidInput,
    InvalidOffer,
    InsufficientCoins,
    InsufficientPaint,
    TileNotPainted,
    NotEnoughAgents,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenKind {
    NotTileOwner,
    NotYourOffer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Game,
    Agent,
    Tile,
    Offer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    NameTaken,
    GameFull,
    GameAlreadyWaiting,
    TileLocked,
    TileAlreadyListed,
    OfferNotOpen,
    OwnOffer,
    Other,
}

/// Lifecycle-phase violations: the operation exists but the game is not
/// in the phase that permits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseKind {
    GameNotRunning,
    GameNotWaiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfraErrorKind {
    DbUnavailable,
    DataCorruption,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation failed: {1}")]
    Validation(ValidationKind, String),
    #[error("forbidden: {1}")]
    Forbidden(ForbiddenKind, String),
    #[error("not found: {1}")]
    NotFound(NotFoundKind, String),
    #[error("conflict: {1}")]
    Conflict(ConflictKind, String),
    #[error("wrong game phase: {1}")]
    Phase(PhaseKind, String),
    #[error("infrastructure error: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn phase(kind: PhaseKind, detail: impl Into<String>) -> Self {
        Self::Phase(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<DbErr> for DomainError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                DomainError::Conflict(ConflictKind::Other, msg)
            }
            _ => match err {
                DbErr::RecordNotFound(msg) => DomainError::NotFound(NotFoundKind::Game, msg),
                DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                    DomainError::Infra(InfraErrorKind::DbUnavailable, "database unavailable".into())
                }
                other => DomainError::Infra(InfraErrorKind::Other, other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_preserve_kind_and_detail() {
        let err = DomainError::conflict(ConflictKind::TileLocked, "tile (3, 4) has an open offer");
        assert_eq!(
            err,
            DomainError::Conflict(ConflictKind::TileLocked, "tile (3, 4) has an open offer".into())
        );
        assert!(err.to_string().contains("tile (3, 4)"));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err: DomainError = DbErr::RecordNotFound("games".into()).into();
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }
}
