//! DTOs for participants_sea adapter.

/// DTO for creating a participant.
#[derive(Debug, Clone)]
pub struct ParticipantCreate {
    pub game_id: i64,
    pub email: String,
    pub turn_order: i16,
}

impl ParticipantCreate {
    pub fn new(game_id: i64, email: impl Into<String>, turn_order: i16) -> Self {
        Self {
            game_id,
            email: email.into(),
            turn_order,
        }
    }
}
