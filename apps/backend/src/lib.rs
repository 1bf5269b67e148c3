//! Server-side authority for a collaborative tile-painting economy.
//!
//! Agents register into a game, receive a rectangular region of the
//! grid and a starting paint allocation, then paint, trade, and chat
//! until everyone declares done and the grid is fully painted.

pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod web;
pub mod ws;

pub use error::AppError;
pub use state::app_state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
