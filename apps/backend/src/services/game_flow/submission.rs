//! Transactional core of sentence submission.
//!
//! Everything in this module runs inside one database transaction: the
//! sentence insert and the game's turn/status update land together or not at
//! all. Notification dispatch happens after commit, from the data gathered
//! here into a [`DispatchPlan`].

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::adapters::sentences_sea::SentenceCreate;
use crate::domain::{check_turn_bounds, is_final_turn, validate_sentence_body};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::notifications::{StoryComplete, StorySentence, TurnNotification};
use crate::repos::sentences::Sentence;
use crate::repos::{games, participants, sentences};

/// Outcome of a submission, as reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// The sentence was recorded for the first time.
    Recorded {
        sentence: Sentence,
        game_completed: bool,
    },
    /// A sentence for this turn already existed (retried or concurrent
    /// request); `sentence` is the stored winner. An idempotent success.
    AlreadySubmitted { sentence: Sentence },
}

impl SubmissionResult {
    pub fn sentence(&self) -> &Sentence {
        match self {
            SubmissionResult::Recorded { sentence, .. } => sentence,
            SubmissionResult::AlreadySubmitted { sentence } => sentence,
        }
    }
}

/// Notification to send once the transaction has committed. Built inside
/// the transaction so it reflects exactly the committed state; `None` for
/// duplicate submissions, which never re-notify.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchPlan {
    Turn(TurnNotification),
    Complete(StoryComplete),
}

/// Accept a candidate sentence: validate, idempotently insert, advance or
/// complete the game.
///
/// The pre-insert existence check is only an optimization for the common
/// retry case; the unique index behind `sentences::insert_if_absent` is the
/// actual arbiter when two requests race past that check.
pub async fn submit_in_txn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    participant_id: i64,
    text: &str,
) -> Result<(SubmissionResult, Option<DispatchPlan>), DomainError> {
    debug!(game_id, participant_id, "submitting sentence");

    let game = games::require_game(conn, game_id).await?;
    let participant = participants::require_in_game(conn, game_id, participant_id).await?;

    if game.is_completed() {
        return Err(DomainError::conflict(
            ConflictKind::GameCompleted,
            "This game has already been completed",
        ));
    }

    check_turn_bounds(game.current_turn, game.max_participants)?;

    // Fast path for retries: a participant's contribution always sits at
    // turn_number == their turn_order, whether or not the game has since
    // advanced. Checked before the turn comparison so a retry that arrives
    // after the turn moved on still lands on its own stored sentence.
    if let Some(existing) =
        sentences::find_for_turn_by_author(conn, game_id, participant.turn_order, &participant.email)
            .await?
    {
        debug!(game_id, participant_id, "duplicate submission, returning stored sentence");
        return Ok((
            SubmissionResult::AlreadySubmitted { sentence: existing },
            None,
        ));
    }

    if participant.turn_order != game.current_turn {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "It's not your turn yet; currently waiting for participant {}",
                game.current_turn
            ),
        ));
    }

    let body = validate_sentence_body(text)?;

    let insert = sentences::insert_if_absent(
        conn,
        SentenceCreate::new(game_id, game.current_turn, participant.email.clone(), body),
    )
    .await?;

    if !insert.created {
        // Lost the race: another request for this turn committed first. Its
        // row is the canonical result for both callers.
        info!(
            game_id,
            turn_number = insert.sentence.turn_number,
            "concurrent submission already recorded this turn"
        );
        return Ok((
            SubmissionResult::AlreadySubmitted {
                sentence: insert.sentence,
            },
            None,
        ));
    }

    let sentence = insert.sentence;

    participants::mark_completed(conn, participant.id).await?;

    let last_turn = is_final_turn(game.current_turn, game.max_participants);

    let (updated_game, plan) = if last_turn {
        let updated = games::complete_game(conn, game_id, game.current_turn).await?;

        let story = sentences::list_by_game(conn, game_id)
            .await?
            .into_iter()
            .map(|s| StorySentence {
                turn_number: s.turn_number,
                author_email: s.author_email,
                body: s.body,
            })
            .collect();
        let recipients = participants::list_by_game(conn, game_id)
            .await?
            .into_iter()
            .map(|p| p.email)
            .collect();

        let plan = DispatchPlan::Complete(StoryComplete {
            game_id,
            game_title: updated.title.clone(),
            sentences: story,
            recipients,
        });
        (updated, plan)
    } else {
        let updated = games::advance_turn(conn, game_id, game.current_turn).await?;

        let next =
            participants::require_by_turn(conn, game_id, updated.current_turn).await?;
        let plan = DispatchPlan::Turn(TurnNotification {
            game_id,
            game_title: updated.title.clone(),
            next_participant_id: next.id,
            next_participant_email: next.email,
            previous_sentence: sentence.body.clone(),
            turn_number: next.turn_order,
            max_participants: updated.max_participants,
        });
        (updated, plan)
    };

    info!(
        game_id,
        participant_id,
        turn_number = sentence.turn_number,
        game_completed = updated_game.is_completed(),
        "sentence recorded"
    );

    Ok((
        SubmissionResult::Recorded {
            sentence,
            game_completed: updated_game.is_completed(),
        },
        Some(plan),
    ))
}
