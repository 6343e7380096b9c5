//! Email normalization and plausibility checks.

use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

/// Normalize an email address for consistent storage and comparison.
///
/// Normalization includes:
/// - Trimming leading/trailing whitespace
/// - Applying Unicode NFKC normalization to handle visually equivalent but
///   distinct codepoints
/// - Converting to lowercase
///
/// Participant uniqueness within a game is case-insensitive because every
/// stored email goes through this function first.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Validate and normalize a participant email.
///
/// This is a plausibility check (non-empty local part and domain), not RFC
/// enforcement; the mail API is the final judge of deliverability.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let normalized = normalize_email(email);

    let mut parts = normalized.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DomainError::validation(
            ValidationKind::InvalidEmail,
            format!("'{email}' is not a valid email address"),
        ));
    }

    Ok(normalized)
}
