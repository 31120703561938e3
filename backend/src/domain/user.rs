//! User account model.
//!
//! The credential store owns these records; the reservation engine only
//! ever reads them. Identifier and email are validated newtypes so the
//! rest of the domain can take them by value without re-checking.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for user field construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// The email address was blank or structurally invalid.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an already-parsed UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique, normalised email address.
///
/// ## Invariants
/// - trimmed, lowercased, non-empty
/// - contains exactly one `@` with non-empty local part and a dotted domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        let mut parts = normalised.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None)
                if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') =>
            {
                Ok(Self(normalised))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role. Immutable after assignment except by administrative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Books rooms and manages own bookings.
    Customer,
    /// Manages hotel catalogue entries.
    HotelManager,
    /// Full administrative access.
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Customer => "CUSTOMER",
            Self::HotelManager => "HOTEL_MANAGER",
            Self::Admin => "ADMIN",
        };
        f.write_str(label)
    }
}

/// Account standing. Non-active accounts cannot authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account in good standing.
    Active,
    /// Access administratively withdrawn.
    Suspended,
}

/// A user record as held by the credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: Email,
    /// Given name, used to default guest contact fields.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Argon2 PHC string; never serialised outward.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Account standing.
    pub status: AccountStatus,
}

impl User {
    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Outward projection of a user record. Excludes credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Stable identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    /// Login email.
    #[schema(value_type = String, example = "user@stays.in")]
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Account role.
    pub role: UserRole,
    /// Account standing.
    pub status: AccountStatus,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            status: user.status,
        }
    }
}
