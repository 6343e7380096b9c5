//! Error codes for the StoryChain backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the StoryChain backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Sentence body is empty after trimming
    EmptySentence,
    /// Sentence body exceeds the length bound
    SentenceTooLong,
    /// Submission arrived from a participant whose turn it is not
    OutOfTurn,
    /// Participant count outside the allowed range
    InvalidParticipantCount,
    /// The same email appears twice in a participant list
    DuplicateParticipantEmail,
    /// Invalid email address
    InvalidEmail,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Participant not found
    ParticipantNotFound,
    /// Sentence not found
    SentenceNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Game already completed
    GameCompleted,
    /// A sentence already exists for this (game, turn)
    TurnTaken,
    /// Turn counter moved underneath the submission
    StaleTurn,
    /// Email already registered for this game
    UniqueParticipantEmail,
    /// Turn order slot already taken
    TurnOrderTaken,
    /// Share code already exists
    ShareCodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503; generic 409)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514; generic 400)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::EmptySentence => "EMPTY_SENTENCE",
            Self::SentenceTooLong => "SENTENCE_TOO_LONG",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::InvalidParticipantCount => "INVALID_PARTICIPANT_COUNT",
            Self::DuplicateParticipantEmail => "DUPLICATE_PARTICIPANT_EMAIL",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::SentenceNotFound => "SENTENCE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::GameCompleted => "GAME_COMPLETED",
            Self::TurnTaken => "TURN_TAKEN",
            Self::StaleTurn => "STALE_TURN",
            Self::UniqueParticipantEmail => "UNIQUE_PARTICIPANT_EMAIL",
            Self::TurnOrderTaken => "TURN_ORDER_TAKEN",
            Self::ShareCodeConflict => "SHARE_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            // Database Constraint Violations
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
