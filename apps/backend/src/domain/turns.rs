//! Turn arithmetic for round-robin games.
//!
//! Participant turns run 1..=max_participants; the optional opening sentence
//! supplied at creation sits at turn 0 and is never "someone's turn".

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Turn number reserved for the opening sentence supplied at game creation.
pub const OPENING_TURN: i16 = 0;

/// The first participant turn.
pub const FIRST_TURN: i16 = 1;

/// Whether a submission at `current_turn` is the game's final contribution.
///
/// `current_turn` can never exceed `max_participants` (see
/// [`check_turn_bounds`]), so equality is the whole test.
pub fn is_final_turn(current_turn: i16, max_participants: i16) -> bool {
    current_turn == max_participants
}

/// Assert the invariant `FIRST_TURN <= current_turn <= max_participants` for
/// an active game.
///
/// A violation means the stored game row is corrupt (e.g. a turn counter
/// advanced past its terminal value), which is reported as an infra error
/// rather than silently tolerated.
pub fn check_turn_bounds(current_turn: i16, max_participants: i16) -> Result<(), DomainError> {
    if current_turn < FIRST_TURN || current_turn > max_participants {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!(
                "current_turn {current_turn} outside [{FIRST_TURN}, {max_participants}]"
            ),
        ));
    }
    Ok(())
}
