use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::notifications::{LoggingDispatcher, NotificationDispatcher};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Notification dispatcher shared by request handlers
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl AppState {
    /// Create a new AppState with the given database connection and dispatcher
    pub fn new(db: DatabaseConnection, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            db: Some(db),
            dispatcher,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            db: None,
            dispatcher,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn dispatcher(&self) -> Arc<dyn NotificationDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Create a test AppState with the given database connection and a
    /// logging-only dispatcher
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::new(db, Arc::new(LoggingDispatcher))
    }

    /// Create a test AppState without database connection
    pub fn for_tests_without_db() -> Self {
        Self::without_db(Arc::new(LoggingDispatcher))
    }
}
