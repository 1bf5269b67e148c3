//! Application state builder.

use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::ws::hub::EventHub;

/// Assembles an [`AppState`]: `build_state().with_db(profile).build()`.
/// Without `with_db`, handlers answer 503 for anything touching the
/// database, which is what boundary tests want.
#[derive(Default)]
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
}

pub fn build_state() -> StateBuilder {
    StateBuilder::default()
}

impl StateBuilder {
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match self.db_profile {
            Some(profile) => Some(bootstrap_db(profile).await?),
            None => None,
        };
        Ok(AppState::new(db, Arc::new(EventHub::new())))
    }
}
