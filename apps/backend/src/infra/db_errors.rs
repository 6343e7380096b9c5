//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts to
//! `crate::errors::domain::DomainError` through the `From` impl below, and
//! higher layers map `DomainError` to `AppError`.

use sea_orm::SqlErr;
use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Whether this error is a unique-constraint violation on any backend.
///
/// The sentence coordinator relies on this test: a violation of
/// `ux_sentences_game_id_turn_number` is proof that another request already
/// recorded the turn, and is converted into an idempotent success rather
/// than an error.
pub fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    // Fallback on message inspection; drivers do not always surface SqlErr.
    let msg = e.to_string();
    mentions_sqlstate(&msg, "23505") || msg.contains("UNIQUE constraint failed")
}

/// Map a unique-violation message to the conflict it represents.
///
/// Handles both PostgreSQL constraint names and SQLite
/// "UNIQUE constraint failed: table.column" messages.
fn map_unique_violation(msg: &str) -> (ConflictKind, &'static str) {
    if msg.contains("ux_sentences_game_id_turn_number") || msg.contains("sentences.turn_number") {
        return (
            ConflictKind::TurnTaken,
            "A sentence already exists for this turn",
        );
    }
    if msg.contains("ux_participants_game_id_email") || msg.contains("participants.email") {
        return (
            ConflictKind::UniqueParticipantEmail,
            "Email already registered for this game",
        );
    }
    if msg.contains("ux_participants_game_id_turn_order")
        || msg.contains("participants.turn_order")
    {
        return (
            ConflictKind::TurnOrderTaken,
            "Turn order slot already taken",
        );
    }
    if msg.contains("ux_games_share_code") || msg.contains("games.share_code") {
        return (ConflictKind::ShareCodeConflict, "Share code already exists");
    }
    (
        ConflictKind::Other("UniqueViolation".into()),
        "Unique constraint violation",
    )
}

fn map_record_not_found(msg: &str) -> DomainError {
    if msg.contains("Game") {
        return DomainError::not_found(NotFoundKind::Game, "Game not found");
    }
    if msg.contains("Participant") {
        return DomainError::not_found(NotFoundKind::Participant, "Participant not found");
    }
    if msg.contains("Sentence") {
        return DomainError::not_found(NotFoundKind::Sentence, "Sentence not found");
    }
    DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => map_record_not_found(msg),
        sea_orm::DbErr::Custom(msg) if msg.starts_with("STALE_TURN:") => {
            // Try to parse the structured payload from the adapter layer.
            if let Some(json_str) = msg.strip_prefix("STALE_TURN:") {
                #[derive(serde::Deserialize)]
                struct StaleInfo {
                    expected: i16,
                    actual: i16,
                    status: String,
                }

                if let Ok(info) = serde_json::from_str::<StaleInfo>(json_str) {
                    warn!(
                        expected = info.expected,
                        actual = info.actual,
                        status = %info.status,
                        "game turn moved underneath a submission"
                    );
                    return DomainError::conflict(
                        ConflictKind::StaleTurn,
                        format!(
                            "Game was modified concurrently (expected turn {}, actual turn {}, status {})",
                            info.expected, info.actual, info.status
                        ),
                    );
                }
            }

            // Fallback for parsing failures
            warn!(detail = %msg, "game turn moved underneath a submission");
            DomainError::conflict(
                ConflictKind::StaleTurn,
                "Game was modified concurrently; refresh and retry",
            )
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
        }
        _ => {
            let msg = e.to_string();
            if is_unique_violation(&e) {
                let (kind, detail) = map_unique_violation(&msg);
                return DomainError::conflict(kind, detail);
            }
            if mentions_sqlstate(&msg, "23503") || msg.contains("FOREIGN KEY constraint failed") {
                return DomainError::conflict(
                    ConflictKind::Other("FkViolation".into()),
                    "Foreign key constraint violation",
                );
            }
            DomainError::infra(InfraErrorKind::Other(msg.clone()), msg)
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_unique_violation_on_sentences_maps_to_turn_taken() {
        let err = sea_orm::DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "UNIQUE constraint failed: sentences.game_id, sentences.turn_number".into(),
        ));
        assert!(is_unique_violation(&err));
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::TurnTaken, _) => {}
            other => panic!("expected TurnTaken conflict, got {other:?}"),
        }
    }

    #[test]
    fn pg_constraint_name_maps_to_unique_participant_email() {
        let err = sea_orm::DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "error returned from database: SQLSTATE(23505) duplicate key value violates unique constraint \"ux_participants_game_id_email\"".into(),
        ));
        assert!(is_unique_violation(&err));
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueParticipantEmail, _) => {}
            other => panic!("expected UniqueParticipantEmail conflict, got {other:?}"),
        }
    }

    #[test]
    fn record_not_found_maps_by_entity() {
        let err = sea_orm::DbErr::RecordNotFound("Game not found".into());
        match map_db_err(err) {
            DomainError::NotFound(NotFoundKind::Game, _) => {}
            other => panic!("expected Game not found, got {other:?}"),
        }
    }

    #[test]
    fn stale_turn_custom_error_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom("STALE_TURN:{\"expected\":2}".into());
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::StaleTurn, _) => {}
            other => panic!("expected StaleTurn conflict, got {other:?}"),
        }
    }
}
