#![allow(dead_code)] // each integration test binary uses a subset of these helpers

pub mod dispatcher;
pub mod factory;

use std::sync::Arc;

use backend::infra::state::build_state;
use backend::AppError;
use backend::AppState;
use tempfile::NamedTempFile;

use self::dispatcher::RecordingDispatcher;

/// A test application: state bound to a fresh file-backed SQLite database
/// with migrations applied, and a recording dispatcher for notification
/// assertions.
pub struct TestApp {
    pub state: AppState,
    pub dispatcher: Arc<RecordingDispatcher>,
    // Keeps the temp database file alive for the duration of the test.
    _db_file: NamedTempFile,
}

pub async fn build_test_app() -> Result<TestApp, AppError> {
    backend_test_support::logging::init();

    let db_file = NamedTempFile::new().expect("failed to create temp db file");
    let url = format!("sqlite://{}?mode=rwc", db_file.path().display());

    let dispatcher = Arc::new(RecordingDispatcher::default());
    let state = build_state()
        .with_db_url(url)
        .with_dispatcher(dispatcher.clone())
        .build()
        .await?;

    Ok(TestApp {
        state,
        dispatcher,
        _db_file: db_file,
    })
}
