//! Session token verification.
//!
//! The identity provider signs HS256 tokens with a secret shared through
//! configuration. The application only verifies; it never issues tokens for
//! end users (`encode_token` exists for tests and local tooling).

use crate::auth::models::SessionClaims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use resumevault_core::AppError;

/// Verify a session token and return its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<SessionClaims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))
}

/// Sign a session token. Test/tooling helper; production tokens come from
/// the identity provider.
pub fn encode_token(secret: &str, claims: &SessionClaims) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-test-secret-test-secret-42";

    fn claims(offset_secs: i64) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            exp: now + offset_secs,
            iat: now,
        }
    }

    #[test]
    fn test_round_trip() {
        let original = claims(3600);
        let token = encode_token(SECRET, &original).expect("encode");
        let decoded = decode_token(SECRET, &token).expect("decode");
        assert_eq!(decoded.sub, original.sub);
        assert_eq!(decoded.email, "ada@example.com");
        assert_eq!(decoded.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = encode_token(SECRET, &claims(-3600)).expect("encode");
        let err = decode_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_token(SECRET, &claims(3600)).expect("encode");
        let err = decode_token("another-secret-another-secret-42", &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            decode_token(SECRET, "not.a.token").unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }
}
