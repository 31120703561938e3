//! Bearer token issuance and verification.
//!
//! Compact HS256 signed-claims tokens. The signing key is injected once at
//! construction from configuration and is immutable for the process
//! lifetime; rotation means a restart. There is no revocation list:
//! validity is purely a function of signature and expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::user::{User, UserRole};

/// Any token failure: malformed structure, bad signature, or expiry.
///
/// Deliberately a single kind; callers must not be able to distinguish
/// which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Store identifier of the account at issue time.
    pub user_id: Uuid,
    /// Role at issue time. Informational only: the authenticator re-reads
    /// the current role from the credential store on every request.
    pub user_role: UserRole,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a process-wide symmetric key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
    validation: Validation,
}

impl TokenService {
    /// Build the service from raw key material and a token lifetime.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry boundaries are exact; the default 60s leeway would keep
        // expired tokens alive past their stated lifetime.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime,
            validation,
        }
    }

    /// Issue a token for the given account, valid from now.
    pub fn issue(&self, user: &User) -> Result<String, Error> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token whose validity window starts at `issued_at`.
    ///
    /// Separated from [`TokenService::issue`] so expiry behaviour is
    /// testable without sleeping.
    pub(crate) fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, Error> {
        let expires_at = issued_at + self.lifetime;
        let claims = Claims {
            sub: user.email.to_string(),
            user_id: user.id.as_uuid(),
            user_role: user.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::internal(format!("token encoding failed: {e}")))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs.
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
