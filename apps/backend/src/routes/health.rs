use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;

async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
