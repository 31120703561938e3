//! Authentication primitives: credentials, registration input, principal.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{Email, UserId, UserRole, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was missing or malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// A required profile field was blank.
    EmptyField(&'static str),
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<UserValidationError> for CredentialValidationError {
    fn from(_: UserValidationError) -> Self {
        Self::InvalidEmail
    }
}

/// Validated signin credentials.
///
/// ## Invariants
/// - `email` is normalised per [`Email`].
/// - `password` is non-empty and retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email suitable for credential-store lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload. New accounts are always customers.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Unique login email.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Plaintext password, hashed before it reaches a store.
    pub password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw string inputs.
    pub fn try_from_parts(
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        let required = [
            ("firstName", first_name),
            ("lastName", last_name),
            ("phone", phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CredentialValidationError::EmptyField(field));
            }
        }
        Ok(Self {
            email,
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            phone: phone.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }
}

/// The authenticated identity attached to one request.
///
/// Built by the request authenticator after token verification and
/// credential-store re-resolution; immutable; dropped with the request.
/// The `role` comes from the store, not the token claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Store identifier of the account.
    pub user_id: UserId,
    /// Token subject, confirmed against the store.
    pub email: Email,
    /// Current role as recorded in the store.
    pub role: UserRole,
    /// The bearer token that established this principal.
    pub raw_token: String,
}

impl Principal {
    /// Whether this principal holds one of the given roles.
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}
