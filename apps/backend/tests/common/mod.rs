//! Shared fixtures for integration tests.
//!
//! Every test gets its own private in-memory database, migrated to the
//! current schema.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::DatabaseConnection;

use mural_backend::config::db::DbProfile;
use mural_backend::entities::{agents, games};
use mural_backend::infra::state::build_state;
use mural_backend::services::agents::AgentService;
use mural_backend::services::games::GameService;
use mural_backend::AppState;

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

pub async fn test_state() -> AppState {
    build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("failed to build test state")
}

pub fn conn(state: &AppState) -> &DatabaseConnection {
    state.db().expect("test state always has a database")
}

pub struct TestGame {
    pub state: AppState,
    pub game: games::Model,
    pub agents: Vec<agents::Model>,
}

/// A running game on a small grid with `n` registered agents and a
/// seeded paint allocation.
pub async fn running_game(n: usize, grid_size: i32) -> TestGame {
    let state = test_state().await;
    let db = conn(&state);

    GameService::new()
        .create_game(db, grid_size)
        .await
        .expect("create_game");
    let mut agents = Vec::with_capacity(n);
    for i in 0..n {
        let agent = AgentService::new()
            .register(db, &format!("agent-{i}"))
            .await
            .expect("register");
        agents.push(agent);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let started = GameService::new()
        .start_game(db, &mut rng)
        .await
        .expect("start_game");

    TestGame {
        game: started.game,
        agents,
        state,
    }
}
