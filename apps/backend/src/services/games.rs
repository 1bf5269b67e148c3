//! Game lifecycle: create, start, status, reset.

use rand::Rng;
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::allocation::{distribute_paint, distribute_tiles};
use crate::entities::games::{self, GamePhase};
use crate::entities::paint_stocks::PaintColor;
use crate::entities::{agents, tiles};
use crate::errors::{ConflictKind, DomainError, NotFoundKind, PhaseKind, ValidationKind};
use crate::repos;

pub const MIN_AGENTS: usize = 2;
pub const MAX_AGENTS: u64 = 8;
pub const DEFAULT_GRID_SIZE: i32 = 32;

#[derive(Debug)]
pub struct StartedGame {
    pub game: games::Model,
    pub agents: Vec<agents::Model>,
}

pub struct GameStatus {
    pub game: games::Model,
    pub agents: Vec<agents::Model>,
    pub painted: u64,
    pub total_tiles: i64,
    pub all_done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub x: i32,
    pub y: i32,
    pub owner: String,
    pub owner_id: i64,
    pub color: Option<PaintColor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    pub grid_size: i32,
    pub tiles: Vec<TileView>,
}

/// Game lifecycle service.
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Opens a new game in the waiting phase. Only one game may be
    /// waiting at a time.
    pub async fn create_game<C: ConnectionTrait>(
        &self,
        conn: &C,
        grid_size: i32,
    ) -> Result<games::Model, DomainError> {
        if repos::games::find_waiting(conn).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyWaiting,
                "a game is already waiting for players",
            ));
        }
        repos::games::create(conn, grid_size).await
    }

    /// Starts the waiting game: partitions the grid among the
    /// registered agents, grants starting paint, and flips the phase
    /// to running.
    pub async fn start_game<C: ConnectionTrait>(
        &self,
        conn: &C,
        rng: &mut impl Rng,
    ) -> Result<StartedGame, DomainError> {
        let game = match repos::games::find_latest(conn).await? {
            Some(game) => game,
            None => {
                return Err(DomainError::phase(
                    PhaseKind::GameNotWaiting,
                    "no game in waiting state",
                ))
            }
        };
        match game.phase {
            GamePhase::Running => {
                return Err(DomainError::phase(
                    PhaseKind::GameNotWaiting,
                    "game is already running",
                ))
            }
            GamePhase::Finished => {
                return Err(DomainError::phase(
                    PhaseKind::GameNotWaiting,
                    "no game in waiting state",
                ))
            }
            GamePhase::Waiting => {}
        }

        let agents = repos::agents::list_by_game(conn, game.id).await?;
        if agents.len() < MIN_AGENTS {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughAgents,
                format!("need at least {MIN_AGENTS} agents to start"),
            ));
        }
        let agent_ids: Vec<i64> = agents.iter().map(|a| a.id).collect();

        let assignments = distribute_tiles(game.grid_size, &agent_ids);
        repos::tiles::insert_many(conn, game.id, &assignments).await?;

        let grants = distribute_paint(&agent_ids, game.grid_size, rng);
        repos::paint::insert_many(conn, &grants).await?;

        repos::games::set_phase(conn, game.id, GamePhase::Running).await?;
        let game = repos::games::require(conn, game.id).await?;
        Ok(StartedGame { game, agents })
    }

    /// Snapshot of the current game, or `None` if no game exists yet.
    pub async fn status<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Option<GameStatus>, DomainError> {
        let game = match repos::games::find_latest(conn).await? {
            Some(game) => game,
            None => return Ok(None),
        };
        let agents = repos::agents::list_by_game(conn, game.id).await?;
        let painted = repos::tiles::count_painted(conn, game.id).await?;
        let total_tiles = (game.grid_size as i64) * (game.grid_size as i64);
        let all_done = !agents.is_empty()
            && agents.iter().all(|a| a.is_done)
            && painted as i64 == total_tiles;
        Ok(Some(GameStatus {
            game,
            agents,
            painted,
            total_tiles,
            all_done,
        }))
    }

    /// Wipes the current game and everything attached to it. Returns
    /// the deleted game's id, or `None` if there was nothing to reset.
    pub async fn reset_game<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Option<i64>, DomainError> {
        let game = match repos::games::find_latest(conn).await? {
            Some(game) => game,
            None => return Ok(None),
        };
        let agent_ids: Vec<i64> = repos::agents::list_by_game(conn, game.id)
            .await?
            .iter()
            .map(|a| a.id)
            .collect();

        repos::chat::delete_by_game(conn, game.id).await?;
        repos::offers::delete_by_game(conn, game.id).await?;
        repos::tiles::delete_by_game(conn, game.id).await?;
        repos::paint::delete_by_agents(conn, &agent_ids).await?;
        repos::agents::delete_by_game(conn, game.id).await?;
        repos::games::delete(conn, game.id).await?;
        Ok(Some(game.id))
    }

    /// Full grid state for a game, with owner names resolved.
    pub async fn fetch_grid<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<GridView, DomainError> {
        let game = repos::games::require(conn, game_id).await?;
        let names = repos::agents::names_by_game(conn, game_id).await?;
        let tiles = repos::tiles::list_by_game(conn, game_id).await?;
        let tiles = tiles
            .into_iter()
            .map(|tile: tiles::Model| {
                let owner = names
                    .get(&tile.owner_id)
                    .cloned()
                    .ok_or_else(|| tile_owner_missing(&tile))?;
                Ok(TileView {
                    x: tile.x,
                    y: tile.y,
                    owner,
                    owner_id: tile.owner_id,
                    color: tile.color,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(GridView {
            grid_size: game.grid_size,
            tiles,
        })
    }
}

fn tile_owner_missing(tile: &tiles::Model) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Agent,
        format!("owner of tile ({}, {}) not found", tile.x, tile.y),
    )
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
