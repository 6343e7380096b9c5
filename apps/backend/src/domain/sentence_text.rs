//! Sentence body validation.

use crate::errors::domain::{DomainError, ValidationKind};

/// Maximum sentence length, counted in characters of the trimmed body.
pub const MAX_SENTENCE_CHARS: usize = 200;

/// Trim and validate a candidate sentence body.
///
/// Returns the trimmed body on success. Empty-after-trimming and over-length
/// bodies are rejected; everything else is the writer's creative problem.
pub fn validate_sentence_body(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptySentence,
            "Sentence cannot be empty",
        ));
    }

    let chars = trimmed.chars().count();
    if chars > MAX_SENTENCE_CHARS {
        return Err(DomainError::validation(
            ValidationKind::SentenceTooLong,
            format!("Sentence is {chars} characters; the limit is {MAX_SENTENCE_CHARS}"),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::ValidationKind;

    #[test]
    fn trims_surrounding_whitespace() {
        let body = validate_sentence_body("  The fog rolled in.  ").unwrap();
        assert_eq!(body, "The fog rolled in.");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        for text in ["", "   ", "\n\t"] {
            match validate_sentence_body(text) {
                Err(DomainError::Validation(ValidationKind::EmptySentence, _)) => {}
                other => panic!("expected EmptySentence for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn accepts_exactly_the_limit() {
        let body = "a".repeat(MAX_SENTENCE_CHARS);
        assert!(validate_sentence_body(&body).is_ok());
    }

    #[test]
    fn rejects_over_limit_by_chars_not_bytes() {
        // 201 multibyte characters is over the limit even though each is
        // more than one byte.
        let body = "é".repeat(MAX_SENTENCE_CHARS + 1);
        match validate_sentence_body(&body) {
            Err(DomainError::Validation(ValidationKind::SentenceTooLong, _)) => {}
            other => panic!("expected SentenceTooLong, got {other:?}"),
        }
    }
}
