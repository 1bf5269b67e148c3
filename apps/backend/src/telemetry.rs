//! Tracing subscriber setup for the server binary.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Installs a JSON-formatted subscriber. `RUST_LOG` overrides the
/// default filter.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .init();
}
