//! JWT access/refresh token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use cadence_core::config::AuthConfig;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id.
    pub sub: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Token type, `access` or `refresh`.
    pub typ: String,
}

/// The pair returned by login. Only access tokens are accepted by the
/// request middleware.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: String, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    #[must_use]
    pub fn from_settings(auth: &AuthConfig) -> Self {
        Self::new(
            auth.token_secret.clone(),
            auth.access_ttl_secs,
            auth.refresh_ttl_secs,
        )
    }

    /// ## Summary
    /// Mints an access/refresh token pair for the given user.
    ///
    /// ## Errors
    /// Returns a token error if signing fails.
    pub fn mint_pair(&self, user_id: Uuid) -> ServiceResult<TokenPair> {
        Ok(TokenPair {
            access: self.mint(user_id, TOKEN_TYPE_ACCESS, self.access_ttl_secs)?,
            refresh: self.mint(user_id, TOKEN_TYPE_REFRESH, self.refresh_ttl_secs)?,
        })
    }

    fn mint(&self, user_id: Uuid, typ: &str, ttl_secs: u64) -> ServiceResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add_unsigned(ttl_secs),
            typ: typ.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServiceError::TokenError(e.to_string()))
    }

    /// ## Summary
    /// Verifies an access token and returns the subject user id.
    ///
    /// Refresh tokens, expired tokens, and tokens signed with another
    /// secret are all rejected.
    ///
    /// ## Errors
    /// Returns `NotAuthenticated` if the token is not a valid access token.
    pub fn verify_access(&self, token: &str) -> ServiceResult<Uuid> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| {
            tracing::trace!(error = %err, "Token verification failed");
            ServiceError::NotAuthenticated
        })?;

        if data.claims.typ != TOKEN_TYPE_ACCESS {
            return Err(ServiceError::NotAuthenticated);
        }

        Uuid::parse_str(&data.claims.sub).map_err(|err| {
            tracing::trace!(error = %err, "Token subject is not a user id");
            ServiceError::NotAuthenticated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret".to_string(), 900, 86_400)
    }

    #[test]
    fn access_token_round_trips_the_user_id() {
        let user_id = Uuid::now_v7();
        let pair = issuer().mint_pair(user_id).expect("mint");

        let verified = issuer().verify_access(&pair.access).expect("verify");
        assert_eq!(verified, user_id);
    }

    #[test]
    fn refresh_tokens_are_rejected_by_access_verification() {
        let pair = issuer().mint_pair(Uuid::now_v7()).expect("mint");

        let result = issuer().verify_access(&pair.refresh);
        assert!(matches!(result, Err(ServiceError::NotAuthenticated)));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = TokenIssuer::new("other-secret".to_string(), 900, 86_400);
        let pair = other.mint_pair(Uuid::now_v7()).expect("mint");

        let result = issuer().verify_access(&pair.access);
        assert!(matches!(result, Err(ServiceError::NotAuthenticated)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: Uuid::now_v7().to_string(),
            iat: now - 7200,
            exp: now - 3600,
            typ: TOKEN_TYPE_ACCESS.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .expect("encode");

        let result = issuer().verify_access(&token);
        assert!(matches!(result, Err(ServiceError::NotAuthenticated)));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let result = issuer().verify_access("not-a-token");
        assert!(matches!(result, Err(ServiceError::NotAuthenticated)));
    }
}
