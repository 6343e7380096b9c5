use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::{connect_and_migrate, connect_db};
use crate::notifications::{dispatcher_from_env, NotificationDispatcher};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    db_url: Option<String>,
    dispatcher: Option<Arc<dyn NotificationDispatcher>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            db_url: None,
            dispatcher: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Connect to an explicit URL and run migrations on it (test bootstrap).
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let dispatcher = self.dispatcher.unwrap_or_else(dispatcher_from_env);

        if let Some(url) = self.db_url {
            let conn = connect_and_migrate(&url).await?;
            return Ok(AppState::new(conn, dispatcher));
        }

        if let Some(profile) = self.db_profile {
            let conn = connect_db(profile).await?;
            return Ok(AppState::new(conn, dispatcher));
        }

        Ok(AppState::without_db(dispatcher))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
