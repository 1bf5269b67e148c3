//! Shared application state.

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::ws::hub::EventHub;

/// Everything a handler needs, cloned cheaply into each worker.
///
/// `write_lock` serializes every mutating game operation: availability
/// checks and the writes they guard run under one guard, so two
/// concurrent spends can never both pass the same balance check.
#[derive(Clone)]
pub struct AppState {
    db: Option<DatabaseConnection>,
    hub: Arc<EventHub>,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: Option<DatabaseConnection>, hub: Arc<EventHub>) -> Self {
        Self {
            db,
            hub,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn hub_arc(&self) -> Arc<EventHub> {
        Arc::clone(&self.hub)
    }

    pub async fn acquire_write_lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// State backed by a specific connection, for tests.
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::new(Some(db), Arc::new(EventHub::new()))
    }
}
