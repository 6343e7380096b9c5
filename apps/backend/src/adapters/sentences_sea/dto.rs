//! DTOs for sentences_sea adapter.

use crate::entities::sentences;

/// DTO for creating a sentence.
#[derive(Debug, Clone)]
pub struct SentenceCreate {
    pub game_id: i64,
    pub turn_number: i16,
    pub author_email: String,
    pub body: String,
}

impl SentenceCreate {
    pub fn new(
        game_id: i64,
        turn_number: i16,
        author_email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            game_id,
            turn_number,
            author_email: author_email.into(),
            body: body.into(),
        }
    }
}

/// Result of an insert-if-absent attempt.
///
/// `created` is false when the (game_id, turn_number) slot was already
/// occupied; `sentence` then carries the pre-existing row.
#[derive(Debug, Clone)]
pub struct SentenceInsert {
    pub created: bool,
    pub sentence: sentences::Model,
}
