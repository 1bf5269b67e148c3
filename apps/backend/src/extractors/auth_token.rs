//! Bearer token extraction from the Authorization header.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The raw bearer token, not yet checked against any agent.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

pub fn parse_bearer(req: &HttpRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;
    Ok(token.to_string())
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_bearer(req).map(AuthToken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn accepts_well_formed_bearer() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc123"))
            .to_http_request();
        assert_eq!(parse_bearer(&req).unwrap(), "abc123");
    }

    #[test]
    fn rejects_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert!(parse_bearer(&req).is_err());
    }

    #[test]
    fn rejects_wrong_scheme_and_empty_token() {
        for header in ["Basic abc123", "Bearer ", "Bearer"] {
            let req = TestRequest::default()
                .insert_header(("Authorization", header))
                .to_http_request();
            assert!(parse_bearer(&req).is_err(), "header {header:?} accepted");
        }
    }
}
