//! Share code generation for games.
//!
//! Share codes are 10-character strings using Crockford's Base32 alphabet
//! and back the public story link for a game.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

/// Generate a share code for a game.
///
/// Uniqueness is enforced by the database index; callers retry on a
/// collision.
pub fn generate_share_code() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(10);
    for _ in 0..10 {
        s.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_share_code_produces_different_results() {
        let code1 = generate_share_code();
        let code2 = generate_share_code();
        assert_ne!(code1, code2);
    }

    #[test]
    fn test_generate_share_code_has_correct_length_and_alphabet() {
        let code = generate_share_code();
        assert_eq!(code.len(), 10);
        assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
    }
}
