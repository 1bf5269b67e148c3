pub mod agents;
pub mod chat;
pub mod game;
pub mod grid;
pub mod health;
pub mod marketplace;
pub mod viewer;

use actix_web::web;

use crate::ws::session;

/// Wires every route into the app. The websocket upgrade lives here too
/// so the whole surface is visible in one place.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    game::configure_routes(cfg);
    agents::configure_routes(cfg);
    grid::configure_routes(cfg);
    marketplace::configure_routes(cfg);
    chat::configure_routes(cfg);
    viewer::configure_routes(cfg);
    cfg.route("/ws", web::get().to(session::upgrade));
}
