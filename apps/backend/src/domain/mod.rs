//! Pure game rules, free of persistence and HTTP concerns.

pub mod email;
pub mod sentence_text;
pub mod turns;

pub use email::normalize_email;
pub use sentence_text::{validate_sentence_body, MAX_SENTENCE_CHARS};
pub use turns::{check_turn_bounds, is_final_turn, FIRST_TURN, OPENING_TURN};
