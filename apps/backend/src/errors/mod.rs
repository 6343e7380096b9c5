pub mod domain;
pub mod error_code;

pub use error_code::ErrorCode;

use crate::error::AppError;
use self::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::EmptySentence => ErrorCode::EmptySentence,
        ValidationKind::SentenceTooLong => ErrorCode::SentenceTooLong,
        ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
        ValidationKind::InvalidParticipantCount => ErrorCode::InvalidParticipantCount,
        ValidationKind::DuplicateParticipantEmail => ErrorCode::DuplicateParticipantEmail,
        ValidationKind::InvalidEmail => ErrorCode::InvalidEmail,
        _ => ErrorCode::ValidationError,
    }
}

fn conflict_code(kind: &ConflictKind) -> ErrorCode {
    match kind {
        ConflictKind::GameCompleted => ErrorCode::GameCompleted,
        ConflictKind::TurnTaken => ErrorCode::TurnTaken,
        ConflictKind::StaleTurn => ErrorCode::StaleTurn,
        ConflictKind::UniqueParticipantEmail => ErrorCode::UniqueParticipantEmail,
        ConflictKind::TurnOrderTaken => ErrorCode::TurnOrderTaken,
        ConflictKind::ShareCodeConflict => ErrorCode::ShareCodeConflict,
        _ => ErrorCode::Conflict,
    }
}

fn not_found_code(kind: &NotFoundKind) -> ErrorCode {
    match kind {
        NotFoundKind::Game => ErrorCode::GameNotFound,
        NotFoundKind::Participant => ErrorCode::ParticipantNotFound,
        NotFoundKind::Sentence => ErrorCode::SentenceNotFound,
        _ => ErrorCode::NotFound,
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                AppError::invalid(validation_code(&kind), detail)
            }
            DomainError::Conflict(kind, detail) => AppError::conflict(conflict_code(&kind), detail),
            DomainError::NotFound(kind, detail) => {
                AppError::not_found(not_found_code(&kind), detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::db_unavailable(),
                InfraErrorKind::Timeout => AppError::db(detail),
                InfraErrorKind::DataCorruption => {
                    AppError::internal(format!("data corruption: {detail}"))
                }
                _ => AppError::db(detail),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn validation_maps_to_400_with_specific_code() {
        let err: AppError = DomainError::validation(ValidationKind::OutOfTurn, "not now").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::OutOfTurn);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err: AppError =
            DomainError::conflict(ConflictKind::GameCompleted, "already done").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::GameCompleted);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = DomainError::not_found(NotFoundKind::Participant, "gone").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::ParticipantNotFound);
    }

    #[test]
    fn infra_db_unavailable_maps_to_db_unavailable() {
        let err: AppError =
            DomainError::infra(InfraErrorKind::DbUnavailable, "pool down").into();
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
    }
}
