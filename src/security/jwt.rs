/// JWT issuing and verification for access and refresh tokens
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Discriminates access tokens from refresh tokens so one can never be
/// used where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a string
    pub sub: String,
    pub token_type: TokenKind,
    pub iat: i64,
    pub exp: i64,
    /// Unique id per issued token. Without it two tokens minted in the
    /// same second for the same user would be byte-identical.
    pub jti: String,
}

/// Signs and verifies tokens with an HMAC-SHA256 secret. Constructed once
/// from configuration and cloned wherever tokens are handled.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Access, self.access_ttl_secs)
    }

    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind, ttl_secs: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            token_type: kind,
            iat: now,
            exp: now + ttl_secs,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature and expiry, then check the token is of the
    /// expected kind. Only HS256 tokens are accepted and expiry is
    /// exact, with no grace period past `exp`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        if data.claims.token_type != expected {
            return Err(AppError::WrongTokenType);
        }

        Ok(data.claims)
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", 900, 604800)
    }

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = codec().issue_access_token(user_id).unwrap();

        let claims = codec().verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.token_type, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = codec().issue_refresh_token(user_id).unwrap();

        let claims = codec().verify(&token, TokenKind::Refresh).unwrap();
        assert_eq!(claims.token_type, TokenKind::Refresh);
    }

    #[test]
    fn test_repeated_issuance_yields_distinct_tokens() {
        // Two sessions opened in the same second must not share a token
        // value; the stored refresh token is unique per session
        let user_id = Uuid::new_v4();
        let first = codec().issue_refresh_token(user_id).unwrap();
        let second = codec().issue_refresh_token(user_id).unwrap();

        assert_ne!(first, second);

        let a = codec().verify(&first, TokenKind::Refresh).unwrap();
        let b = codec().verify(&second, TokenKind::Refresh).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_token_kind_is_rejected() {
        let user_id = Uuid::new_v4();
        let refresh = codec().issue_refresh_token(user_id).unwrap();
        let access = codec().issue_access_token(user_id).unwrap();

        let err = codec().verify(&refresh, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::WrongTokenType));

        let err = codec().verify(&access, TokenKind::Refresh).unwrap_err();
        assert!(matches!(err, AppError::WrongTokenType));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Only two seconds past expiry; rejection must not wait out a
        // leeway window
        let expired_codec = TokenCodec::new("test-secret", -2, -2);
        let token = expired_codec.issue_access_token(Uuid::new_v4()).unwrap();

        let err = codec().verify(&token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = codec().issue_access_token(Uuid::new_v4()).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let err = codec().verify(&tampered, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenCodec::new("other-secret", 900, 604800);
        let token = other.issue_access_token(Uuid::new_v4()).unwrap();

        let err = codec().verify(&token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let err = codec().verify("not-a-jwt", TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));

        let err = codec().verify("", TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        // A token signed with the right secret but a different HMAC
        // algorithm must not pass HS256 validation
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            token_type: TokenKind::Access,
            iat: now,
            exp: now + 900,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = codec().verify(&token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
