use actix_web::{web, App, HttpServer};
use tracing::info;

use mural_backend::config::db::DbProfile;
use mural_backend::infra::state::build_state;
use mural_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use mural_backend::routes;
use mural_backend::telemetry::init_telemetry;

const ENV_HOST: &str = "MURAL_HOST";
const ENV_PORT: &str = "MURAL_PORT";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    let host = std::env::var(ENV_HOST).unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var(ENV_PORT)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let state = build_state()
        .with_db(DbProfile::Prod)
        .build()
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let data = web::Data::new(state);

    info!(host = %host, port, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
