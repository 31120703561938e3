//! Driven port for the credential store.
//!
//! The authentication hot path calls [`UserRepository::find_by_email`] on
//! every request carrying a verifiable token; adapters should keep that
//! lookup cheap.

use async_trait::async_trait;

use crate::domain::user::{Email, User, UserId};

/// Errors raised by credential store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Unique constraint on email violated.
    #[error("an account already exists for {email}")]
    DuplicateEmail {
        /// The conflicting address.
        email: String,
    },
    /// Storage round-trip failed.
    #[error("user store failure: {message}")]
    Storage {
        /// Adapter-specific description; redacted at the HTTP boundary.
        message: String,
    },
}

/// Port over user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look an account up by its unique email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;

    /// Look an account up by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Persist a new account; fails on duplicate email.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// All accounts, for administrative listings.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// Number of stored accounts; used by the startup seeder.
    async fn count(&self) -> Result<usize, UserStoreError>;
}
