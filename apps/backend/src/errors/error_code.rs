//! Closed set of machine-readable error codes.
//!
//! Every error surfaced over HTTP carries one of these codes in its
//! problem-details body, so clients can branch on the code instead of
//! parsing the human-readable detail string.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    // Auth
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidToken,
    // Permission
    Forbidden,
    NotTileOwner,
    NotYourOffer,
    // Validation
    ValidationError,
    BadRequest,
    InvalidOffer,
    InsufficientCoins,
    InsufficientPaint,
    TileNotPainted,
    NotEnoughAgents,
    // Not found
    NotFound,
    GameNotFound,
    AgentNotFound,
    TileNotFound,
    OfferNotFound,
    // Conflict
    Conflict,
    NameTaken,
    GameFull,
    GameAlreadyWaiting,
    TileLocked,
    TileAlreadyListed,
    OfferNotOpen,
    OwnOffer,
    // Lifecycle state
    GameNotRunning,
    GameNotWaiting,
    // Infrastructure
    DbError,
    DbUnavailable,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            ErrorCode::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotTileOwner => "NOT_TILE_OWNER",
            ErrorCode::NotYourOffer => "NOT_YOUR_OFFER",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidOffer => "INVALID_OFFER",
            ErrorCode::InsufficientCoins => "INSUFFICIENT_COINS",
            ErrorCode::InsufficientPaint => "INSUFFICIENT_PAINT",
            ErrorCode::TileNotPainted => "TILE_NOT_PAINTED",
            ErrorCode::NotEnoughAgents => "NOT_ENOUGH_AGENTS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::GameNotFound => "GAME_NOT_FOUND",
            ErrorCode::AgentNotFound => "AGENT_NOT_FOUND",
            ErrorCode::TileNotFound => "TILE_NOT_FOUND",
            ErrorCode::OfferNotFound => "OFFER_NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::NameTaken => "NAME_TAKEN",
            ErrorCode::GameFull => "GAME_FULL",
            ErrorCode::GameAlreadyWaiting => "GAME_ALREADY_WAITING",
            ErrorCode::TileLocked => "TILE_LOCKED",
            ErrorCode::TileAlreadyListed => "TILE_ALREADY_LISTED",
            ErrorCode::OfferNotOpen => "OFFER_NOT_OPEN",
            ErrorCode::OwnOffer => "OWN_OFFER",
            ErrorCode::GameNotRunning => "GAME_NOT_RUNNING",
            ErrorCode::GameNotWaiting => "GAME_NOT_WAITING",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
