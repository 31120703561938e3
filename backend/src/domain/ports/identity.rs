//! Driving ports for registration, signin, and user listings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::user::UserView;

/// Successful signin payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token to present on subsequent requests.
    pub token: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Account registration and credential verification.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a customer account; fails on duplicate email.
    async fn register(&self, registration: Registration) -> Result<UserView, Error>;

    /// Verify credentials and issue a bearer token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthResponse, Error>;
}

/// Administrative user listing.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All accounts; role-gated to administrators upstream.
    async fn list_users(&self) -> Result<Vec<UserView>, Error>;
}
