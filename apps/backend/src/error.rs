//! HTTP-facing error type and problem-details rendering.
//!
//! `AppError` is the single error type handlers return. It renders as an
//! RFC 7807 `application/problem+json` body carrying a machine-readable
//! `code` and the request's `trace_id`, which is also echoed in the
//! `x-trace-id` response header.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::errors::{
    ConflictKind, DomainError, ErrorCode, ForbiddenKind, InfraErrorKind, NotFoundKind, PhaseKind,
    ValidationKind,
};
use crate::web::trace_ctx;

const ERROR_TYPE_BASE: &str = "https://mural.example/errors";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {detail}")]
    Validation { code: ErrorCode, detail: String },

    #[error("unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },

    #[error("forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },

    #[error("not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },

    #[error("conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },

    #[error("wrong game phase: {detail}")]
    Phase { code: ErrorCode, detail: String },

    #[error("database error: {detail}")]
    Db { detail: String },

    #[error("database unavailable")]
    DbUnavailable,

    #[error("configuration error: {detail}")]
    Config { detail: String },

    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn validation(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::BadRequest,
            detail: detail.into(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedMissingBearer,
            detail: "missing or malformed Authorization header".into(),
        }
    }

    pub fn unauthorized_invalid_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidToken,
            detail: "unknown agent token".into(),
        }
    }

    pub fn forbidden(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn phase(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Phase {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Phase { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Phase { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail.clone(),
            // Internal details stay out of the response body.
            AppError::Db { .. } => "database error".into(),
            AppError::DbUnavailable => "database unavailable".into(),
        }
    }
}

/// RFC 7807 problem-details payload, extended with `code` and `trace_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// "TILE_LOCKED" -> "Tile Locked", for the problem-details title.
fn humanize_code(code: ErrorCode) -> String {
    code.as_str()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::Phase { .. } => StatusCode::CONFLICT,
            AppError::DbUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let code = self.code();
        let trace_id = trace_ctx::trace_id().unwrap_or_default();

        if status.is_server_error() {
            error!(code = code.as_str(), trace_id = %trace_id, error = %self, "request failed");
        }

        let body = ProblemDetails {
            type_: format!("{ERROR_TYPE_BASE}/{}", code.as_str()),
            title: humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidInput => ErrorCode::ValidationError,
                    ValidationKind::InvalidOffer => ErrorCode::InvalidOffer,
                    ValidationKind::InsufficientCoins => ErrorCode::InsufficientCoins,
                    ValidationKind::InsufficientPaint => ErrorCode::InsufficientPaint,
                    ValidationKind::TileNotPainted => ErrorCode::TileNotPainted,
                    ValidationKind::NotEnoughAgents => ErrorCode::NotEnoughAgents,
                };
                AppError::Validation { code, detail }
            }
            DomainError::Forbidden(kind, detail) => {
                let code = match kind {
                    ForbiddenKind::NotTileOwner => ErrorCode::NotTileOwner,
                    ForbiddenKind::NotYourOffer => ErrorCode::NotYourOffer,
                };
                AppError::Forbidden { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Agent => ErrorCode::AgentNotFound,
                    NotFoundKind::Tile => ErrorCode::TileNotFound,
                    NotFoundKind::Offer => ErrorCode::OfferNotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::NameTaken => ErrorCode::NameTaken,
                    ConflictKind::GameFull => ErrorCode::GameFull,
                    ConflictKind::GameAlreadyWaiting => ErrorCode::GameAlreadyWaiting,
                    ConflictKind::TileLocked => ErrorCode::TileLocked,
                    ConflictKind::TileAlreadyListed => ErrorCode::TileAlreadyListed,
                    ConflictKind::OfferNotOpen => ErrorCode::OfferNotOpen,
                    ConflictKind::OwnOffer => ErrorCode::OwnOffer,
                    ConflictKind::Other => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Phase(kind, detail) => {
                let code = match kind {
                    PhaseKind::GameNotRunning => ErrorCode::GameNotRunning,
                    PhaseKind::GameNotWaiting => ErrorCode::GameNotWaiting,
                };
                AppError::Phase { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable,
                InfraErrorKind::DataCorruption | InfraErrorKind::Other => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(err))
    }
}
