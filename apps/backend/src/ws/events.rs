//! Events fanned out to every websocket subscriber.
//!
//! Serialized with a `type` tag so clients can dispatch without
//! inspecting the payload shape.

use serde::Serialize;

use crate::entities::paint_stocks::PaintColor;
use crate::services::marketplace::OfferView;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentBrief {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        game_id: i64,
        grid_size: i32,
        agents: Vec<AgentBrief>,
    },
    GameFinished {
        game_id: i64,
    },
    GameReset {
        game_id: i64,
    },
    TilePainted {
        x: i32,
        y: i32,
        color: PaintColor,
        agent_id: i64,
        agent: String,
    },
    TileUnpainted {
        x: i32,
        y: i32,
        agent_id: i64,
        agent: String,
    },
    OfferPosted {
        offer: OfferView,
    },
    OfferAccepted {
        offer_id: i64,
        accepted_by_id: i64,
        accepted_by: String,
    },
    OfferCancelled {
        offer_id: i64,
    },
    AgentDone {
        agent_id: i64,
        agent: String,
    },
    ChatMessage {
        id: i64,
        agent_id: i64,
        agent: String,
        content: String,
    },
}
