//! Registration, signin, and administrative user listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::ports::{
    AuthResponse, IdentityService, UserRepository, UserStoreError, UsersQuery,
};
use crate::domain::token::TokenService;
use crate::domain::user::{AccountStatus, User, UserId, UserRole, UserView};

/// Credential-store-backed identity service.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AccountService<U> {
    /// Wire the service to its credential store and token issuer.
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

fn map_user_store(error: UserStoreError) -> Error {
    match error {
        UserStoreError::DuplicateEmail { email } => {
            Error::invalid_request(format!("an account already exists for {email}"))
        }
        UserStoreError::Storage { message } => {
            Error::internal(format!("user store failure: {message}"))
        }
    }
}

#[async_trait]
impl<U> IdentityService for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<UserView, Error> {
        let password_hash = hash_password(&registration.password)
            .map_err(|e| Error::internal(e.to_string()))?;
        let user = User {
            id: UserId::random(),
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            phone: registration.phone,
            password_hash,
            role: UserRole::Customer,
            status: AccountStatus::Active,
        };
        self.users.insert(&user).await.map_err(map_user_store)?;
        info!(user = %user.id, "account registered");
        Ok(UserView::from(&user))
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthResponse, Error> {
        // Unknown account, wrong password, and suspension all collapse to
        // the same response so accounts cannot be enumerated.
        let rejected = || Error::unauthorized("invalid email or password");

        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store)?
            .ok_or_else(rejected)?;
        if !user.is_active() || !verify_password(&user.password_hash, credentials.password()) {
            return Err(rejected());
        }

        let token = self.tokens.issue(&user)?;
        info!(user = %user.id, "signin succeeded");
        Ok(AuthResponse {
            token,
            message: "Login successful".into(),
        })
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserView>, Error> {
        let users = self.users.list().await.map_err(map_user_store)?;
        Ok(users.iter().map(UserView::from).collect())
    }
}
