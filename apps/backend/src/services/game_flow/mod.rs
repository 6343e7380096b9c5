//! Turn coordination service - bridges the transactional submission core
//! with notification dispatch.
//!
//! The transaction owns steps validate → insert → advance/complete; dispatch
//! runs after commit and is deliberately allowed to fail without affecting
//! the recorded turn. A flaky mail collaborator can never block game
//! progress.

mod submission;

pub use submission::{DispatchPlan, SubmissionResult};

use std::sync::Arc;

use actix_web::HttpRequest;
use tracing::warn;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::notifications::NotificationDispatcher;
use crate::state::app_state::AppState;

/// Turn coordinator. Holds the injected notification dispatcher; all
/// database work goes through the transaction handed to the core.
pub struct GameFlowService {
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl GameFlowService {
    pub fn new(dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Build the coordinator for a request, using the process dispatcher.
    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.dispatcher())
    }

    /// Accept a candidate sentence from a participant.
    ///
    /// Exactly one notification is dispatched per newly recorded sentence,
    /// after the transaction commits. Duplicate submissions return the
    /// stored sentence and dispatch nothing.
    pub async fn submit(
        &self,
        req: Option<&HttpRequest>,
        state: &AppState,
        game_id: i64,
        participant_id: i64,
        text: &str,
    ) -> Result<SubmissionResult, AppError> {
        let body = text.to_string();
        let (result, plan) = with_txn(req, state, |txn| {
            Box::pin(async move {
                submission::submit_in_txn(txn, game_id, participant_id, &body)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await?;

        if let Some(plan) = plan {
            self.dispatch(game_id, plan).await;
        }

        Ok(result)
    }

    /// Fire the post-commit notification. Failures are logged and dropped;
    /// the submission has already succeeded.
    async fn dispatch(&self, game_id: i64, plan: DispatchPlan) {
        let outcome = match plan {
            DispatchPlan::Turn(note) => self.dispatcher.send_turn_notification(note).await,
            DispatchPlan::Complete(note) => self.dispatcher.send_story_complete(note).await,
        };

        if let Err(e) = outcome {
            warn!(game_id, error = %e, "notification dispatch failed; submission unaffected");
        }
    }
}
