//! Session tokens
//!
//! Tokens are HS256-signed JWTs carrying the account's username, role and id
//! plus issue and expiry timestamps. Validation is stateless: a token is good
//! while its signature matches the configured key and its expiry lies in the
//! future. There is no revocation list and no refresh; changing the signing
//! key invalidates every outstanding token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::UserRole;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub role: UserRole,
    /// Account id
    pub id: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens with one symmetric key
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Token service with the default 24 hour lifetime
    pub fn with_default_ttl(secret: &str) -> Self {
        Self::new(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Issue a token that expires one TTL from now
    pub fn issue(&self, subject: &str, role: UserRole, id: i64) -> Result<String, TokenError> {
        self.issue_at(subject, role, id, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        role: UserRole,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            role,
            id,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature first, then expiry. A token is expired once
    /// `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "test-signing-key";

    fn service() -> TokenService {
        TokenService::with_default_ttl(SECRET)
    }

    #[test]
    fn test_issue_then_verify_returns_claims() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue_at("admin", UserRole::Admin, 1, now).unwrap();

        let claims = tokens.verify_at(&token, now).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.id, 1);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_verify_with_real_clock() {
        let tokens = service();
        let token = tokens.issue("teacher", UserRole::Teacher, 2).unwrap();
        assert_eq!(tokens.verify(&token).unwrap().sub, "teacher");
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let issued = Utc::now() - Duration::hours(25);
        let token = tokens.issue_at("parent", UserRole::Parent, 3, issued).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_expires_exactly_at_exp() {
        let tokens = service();
        let issued = Utc::now();
        let token = tokens.issue_at("admin", UserRole::Admin, 1, issued).unwrap();

        let just_before = issued + Duration::hours(24) - Duration::seconds(1);
        assert!(tokens.verify_at(&token, just_before).is_ok());

        let at_expiry = issued + Duration::hours(24);
        assert_eq!(tokens.verify_at(&token, at_expiry), Err(TokenError::Expired));
    }

    #[test]
    fn test_other_key_rejected_as_invalid_signature() {
        let other = TokenService::with_default_ttl("another-key");
        let token = other.issue("admin", UserRole::Admin, 1).unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let other = TokenService::with_default_ttl("another-key");
        let token = other
            .issue_at("admin", UserRole::Admin, 1, Utc::now() - Duration::days(3))
            .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service();
        let token = tokens.issue("parent", UserRole::Parent, 3).unwrap();
        let admin_token = tokens.issue("admin", UserRole::Admin, 1).unwrap();

        // Graft the admin payload onto the parent signature.
        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert_eq!(tokens.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_custom_ttl() {
        let tokens = TokenService::new(SECRET, Duration::hours(1));
        let issued = Utc::now();
        let token = tokens.issue_at("admin", UserRole::Admin, 1, issued).unwrap();

        assert!(tokens.verify_at(&token, issued + Duration::minutes(59)).is_ok());
        assert_eq!(
            tokens.verify_at(&token, issued + Duration::minutes(61)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_out_of_range_expiry_is_an_error() {
        let tokens = TokenService::new(SECRET, Duration::hours(3_000_000_000));
        let result = tokens.issue("admin", UserRole::Admin, 1);

        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    fn role_strategy() -> impl Strategy<Value = UserRole> {
        prop_oneof![Just(UserRole::Admin), Just(UserRole::Teacher), Just(UserRole::Parent)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn property_issue_verify_round_trip(
            subject in "[a-z][a-z0-9_]{0,15}",
            role in role_strategy(),
            id in 1i64..10_000,
        ) {
            let tokens = service();
            let now = Utc::now();
            let token = tokens.issue_at(&subject, role, id, now).unwrap();
            let claims = tokens.verify_at(&token, now).unwrap();

            prop_assert_eq!(claims.sub, subject);
            prop_assert_eq!(claims.role, role);
            prop_assert_eq!(claims.id, id);
        }
    }
}
