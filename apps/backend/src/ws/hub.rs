//! Broadcast hub for live game events.
//!
//! Sessions register their actix recipient on connect and are evicted
//! on disconnect or on the first failed delivery. Broadcasting is
//! fire-and-forget: a slow or dead subscriber never blocks a request.

use actix::prelude::*;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ws::events::GameEvent;

/// A serialized event, shared across all recipients without copying.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct EventPayload(pub Arc<String>);

#[derive(Default)]
pub struct EventHub {
    connections: DashMap<Uuid, Recipient<EventPayload>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, recipient: Recipient<EventPayload>) -> Uuid {
        let id = Uuid::new_v4();
        self.connections.insert(id, recipient);
        debug!(conn_id = %id, connections = self.connections.len(), "ws session registered");
        id
    }

    pub fn unregister(&self, id: Uuid) {
        if self.connections.remove(&id).is_some() {
            debug!(conn_id = %id, connections = self.connections.len(), "ws session unregistered");
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Sends `event` to every live session, evicting any whose mailbox
    /// rejects the message.
    pub fn broadcast(&self, event: &GameEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => Arc::new(json),
            Err(err) => {
                warn!(error = %err, "failed to serialize game event");
                return;
            }
        };

        let mut dead = Vec::new();
        for entry in self.connections.iter() {
            if entry
                .value()
                .try_send(EventPayload(Arc::clone(&payload)))
                .is_err()
            {
                dead.push(*entry.key());
            }
        }
        for id in dead {
            self.connections.remove(&id);
            debug!(conn_id = %id, "evicted dead ws session");
        }
    }
}
