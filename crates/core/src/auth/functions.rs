use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};

use super::{AuthError, Session, SessionToken};

/// Generate a cryptographically random session token.
pub fn generate_session_token() -> SessionToken {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionToken::new(token)
}

/// Build a session for `user_id` starting at `now`.
pub fn new_session(user_id: i64, now: DateTime<Utc>, ttl: Duration) -> Session {
    Session {
        token: generate_session_token(),
        user_id,
        created_at: now,
        expires_at: calculate_expiry(now, ttl),
    }
}

/// Check if a session has expired.
pub fn is_session_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at <= now
}

/// Calculate session expiry from creation time and TTL.
pub fn calculate_expiry(created_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    created_at + ttl
}

/// Hash a password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Extract a bearer token from an `Authorization` header value.
pub fn parse_bearer(header: &str) -> Option<SessionToken> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
        .then(|| SessionToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_session_token_produces_32_char_alphanumeric() {
        let token = generate_session_token();
        assert_eq!(token.as_str().len(), 32);
        assert!(token.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generate_session_token_is_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn new_session_expires_after_ttl() {
        let now = Utc::now();
        let session = new_session(7, now, Duration::hours(24));
        assert_eq!(session.user_id, 7);
        assert_eq!(session.expires_at, now + Duration::hours(24));
        assert!(!is_session_expired(&session, now));
        assert!(is_session_expired(&session, now + Duration::hours(24)));
    }

    #[test]
    fn is_session_expired_returns_true_for_past_expiry() {
        let now = Utc::now();
        let session = Session {
            token: generate_session_token(),
            user_id: 1,
            created_at: now - Duration::hours(2),
            expires_at: now - Duration::hours(1),
        };
        assert!(is_session_expired(&session, now));
    }

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn verify_password_rejects_malformed_hash() {
        assert!(!verify_password("password", "not-a-phc-string"));
    }

    #[test]
    fn parse_bearer_extracts_token() {
        assert_eq!(
            parse_bearer("Bearer abc123"),
            Some(SessionToken::new("abc123"))
        );
        assert_eq!(
            parse_bearer("bearer  abc123 "),
            Some(SessionToken::new("abc123"))
        );
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("abc123"), None);
    }
}
