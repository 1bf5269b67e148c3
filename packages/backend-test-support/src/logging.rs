//! Idempotent tracing setup for the test suites.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a quiet, capture-friendly subscriber once per process.
///
/// Safe to call from every test binary's `ctor`. Verbosity comes from
/// `TEST_LOG` if set, then `RUST_LOG`, and defaults to `warn` so
/// passing runs stay silent.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // with_test_writer so cargo/nextest capture per-test output;
        // timestamps dropped to keep output stable across runs.
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
