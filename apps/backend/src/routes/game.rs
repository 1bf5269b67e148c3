//! Game lifecycle endpoints.

use actix_web::{web, HttpResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;

use crate::db::txn::{with_txn, with_write_txn};
use crate::entities::games::GamePhase;
use crate::error::AppError;
use crate::services::games::{GameService, DEFAULT_GRID_SIZE};
use crate::state::app_state::AppState;
use crate::ws::events::{AgentBrief, GameEvent};

pub const ENV_GRID_SIZE: &str = "MURAL_GRID_SIZE";

#[derive(Debug, Serialize)]
struct AgentStatus {
    id: i64,
    name: String,
    coins: i64,
    is_done: bool,
}

#[derive(Debug, Serialize)]
struct GameStatusResponse {
    status: String,
    grid_size: i32,
    agents: Vec<AgentStatus>,
    total_painted: u64,
    total_tiles: i64,
    all_done: bool,
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Waiting => "waiting",
        GamePhase::Running => "running",
        GamePhase::Finished => "finished",
    }
}

fn configured_grid_size() -> i32 {
    std::env::var(ENV_GRID_SIZE)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_GRID_SIZE)
}

async fn create_game(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let grid_size = configured_grid_size();
    let game = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let game = GameService::new().create_game(txn, grid_size).await?;
            Ok(game)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "waiting", "game_id": game.id })))
}

async fn game_status(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let status = with_txn(&state, |txn| {
        Box::pin(async move {
            let status = GameService::new().status(txn).await?;
            Ok(status)
        })
    })
    .await?;

    let response = match status {
        None => GameStatusResponse {
            status: "no_game".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            agents: Vec::new(),
            total_painted: 0,
            total_tiles: 0,
            all_done: false,
        },
        Some(s) => GameStatusResponse {
            status: phase_label(s.game.phase).to_string(),
            grid_size: s.game.grid_size,
            agents: s
                .agents
                .into_iter()
                .map(|a| AgentStatus {
                    id: a.id,
                    name: a.name,
                    coins: a.coins,
                    is_done: a.is_done,
                })
                .collect(),
            total_painted: s.painted,
            total_tiles: s.total_tiles,
            all_done: s.all_done,
        },
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn start_game(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut rng = StdRng::from_os_rng();
    let started = with_write_txn(&state, move |txn| {
        Box::pin(async move {
            let started = GameService::new().start_game(txn, &mut rng).await?;
            Ok(started)
        })
    })
    .await?;

    let agent_count = started.agents.len();
    state.hub().broadcast(&GameEvent::GameStarted {
        game_id: started.game.id,
        grid_size: started.game.grid_size,
        agents: started
            .agents
            .into_iter()
            .map(|a| AgentBrief {
                id: a.id,
                name: a.name,
            })
            .collect(),
    });

    Ok(HttpResponse::Ok().json(json!({
        "status": "running",
        "agents": agent_count,
        "grid_size": started.game.grid_size,
    })))
}

async fn reset_game(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reset = with_write_txn(&state, |txn| {
        Box::pin(async move {
            let reset = GameService::new().reset_game(txn).await?;
            Ok(reset)
        })
    })
    .await?;

    match reset {
        Some(game_id) => {
            state.hub().broadcast(&GameEvent::GameReset { game_id });
            Ok(HttpResponse::Ok().json(json!({ "status": "reset" })))
        }
        None => Ok(HttpResponse::Ok().json(json!({ "status": "nothing_to_reset" }))),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/game/create", web::post().to(create_game))
        .route("/game/status", web::get().to(game_status))
        .route("/game/start", web::post().to(start_game))
        .route("/game/reset", web::post().to(reset_game));
}
