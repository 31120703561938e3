//! Domain layer: entities, services, policy, and ports.
//!
//! Everything here is transport agnostic; no actix imports. Inbound
//! adapters map these types to HTTP; outbound adapters implement the
//! driven ports in `ports/`.

pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod catalogue_service;
pub mod error;
pub mod hotel;
pub mod identity_service;
pub mod password;
pub mod policy;
pub mod ports;
pub mod token;
pub mod user;

pub use self::auth::{CredentialValidationError, LoginCredentials, Principal, Registration};
pub use self::error::{Error, ErrorCode};
pub use self::token::{Claims, InvalidToken, TokenService};
pub use self::user::{AccountStatus, Email, User, UserId, UserRole, UserView};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
