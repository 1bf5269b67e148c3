pub mod domain;
pub mod error_code;

pub use domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, PhaseKind,
    ValidationKind,
};
pub use error_code::ErrorCode;
