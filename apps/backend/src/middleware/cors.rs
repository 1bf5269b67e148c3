//! CORS policy.
//!
//! `CORS_ALLOWED_ORIGINS` is a comma-separated origin list; unset means
//! allow any origin, which suits local agent development.

use actix_cors::Cors;

pub const ENV_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

pub fn cors_middleware() -> Cors {
    let cors = match std::env::var(ENV_ALLOWED_ORIGINS) {
        Ok(origins) if !origins.trim().is_empty() => {
            let mut cors = Cors::default();
            for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                cors = cors.allowed_origin(origin);
            }
            cors
        }
        _ => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method()
        .allow_any_header()
        .expose_headers(["x-request-id", "x-trace-id"])
        .max_age(3600)
}
