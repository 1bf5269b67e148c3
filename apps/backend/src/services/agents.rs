//! Agent registration, inventory, done declarations, admin removal.

use sea_orm::ConnectionTrait;

use crate::entities::games::GamePhase;
use crate::entities::paint_stocks::PaintColor;
use crate::entities::{agents, tiles};
use crate::errors::{ConflictKind, DomainError, PhaseKind};
use crate::repos;
use crate::services::economy;
use crate::services::games::MAX_AGENTS;
use crate::utils::credential;

pub struct InventorySnapshot {
    pub agent: agents::Model,
    pub paint: Vec<(PaintColor, i32)>,
    pub tiles: Vec<tiles::Model>,
}

#[derive(Debug)]
pub struct DoneOutcome {
    /// Set when this declaration completed the game: every agent done
    /// and every tile painted.
    pub finished: bool,
}

pub struct AgentService;

impl AgentService {
    pub fn new() -> Self {
        Self
    }

    /// Registers an agent into the waiting game, minting its token.
    pub async fn register<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<agents::Model, DomainError> {
        let game = repos::games::find_waiting(conn).await?.ok_or_else(|| {
            DomainError::phase(
                PhaseKind::GameNotWaiting,
                "no game waiting for players; create one first",
            )
        })?;

        let count = repos::agents::count_by_game(conn, game.id).await?;
        if count >= MAX_AGENTS {
            return Err(DomainError::conflict(
                ConflictKind::GameFull,
                format!("game is full (max {MAX_AGENTS} agents)"),
            ));
        }

        let token = credential::mint_token();
        repos::agents::create(conn, game.id, name, &token).await
    }

    /// Removes an agent before the game starts. Running and finished
    /// games keep their rosters.
    pub async fn remove_agent<C: ConnectionTrait>(
        &self,
        conn: &C,
        agent_id: i64,
    ) -> Result<(), DomainError> {
        let agent = repos::agents::require(conn, agent_id).await?;
        let game = repos::games::require(conn, agent.game_id).await?;
        if game.phase != GamePhase::Waiting {
            return Err(DomainError::phase(
                PhaseKind::GameNotWaiting,
                "cannot remove agents after the game has started",
            ));
        }
        repos::agents::delete(conn, agent_id).await
    }

    /// Fresh snapshot of an agent's coins, paint, and owned tiles.
    pub async fn inventory<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
    ) -> Result<InventorySnapshot, DomainError> {
        let agent = repos::agents::require(conn, agent_id).await?;
        let paint = repos::paint::list_by_agent(conn, agent_id)
            .await?
            .into_iter()
            .map(|s| (s.color, s.quantity))
            .collect();
        let tiles = repos::tiles::list_by_owner(conn, game_id, agent_id).await?;
        Ok(InventorySnapshot {
            agent,
            paint,
            tiles,
        })
    }

    /// Marks the agent done and finishes the game if that was the last
    /// missing condition. `finished` is only re-evaluated here: a fully
    /// painted grid alone never ends the game.
    pub async fn declare_done<C: ConnectionTrait>(
        &self,
        conn: &C,
        game_id: i64,
        agent_id: i64,
    ) -> Result<DoneOutcome, DomainError> {
        economy::require_running_game(conn, game_id).await?;
        repos::agents::set_done(conn, agent_id, true).await?;

        let all_done = repos::agents::list_by_game(conn, game_id)
            .await?
            .iter()
            .all(|a| a.is_done);
        if !all_done {
            return Ok(DoneOutcome { finished: false });
        }
        let unpainted = repos::tiles::count_unpainted(conn, game_id).await?;
        if unpainted > 0 {
            return Ok(DoneOutcome { finished: false });
        }
        repos::games::set_phase(conn, game_id, GamePhase::Finished).await?;
        Ok(DoneOutcome { finished: true })
    }
}

impl Default for AgentService {
    fn default() -> Self {
        Self::new()
    }
}
