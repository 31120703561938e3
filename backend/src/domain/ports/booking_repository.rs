//! Driven port for booking persistence.
//!
//! The overlap guard lives in the conditional-write operations: adapters
//! must evaluate the half-open overlap test and apply the write as one
//! atomic unit (a transaction, or a single lock acquisition for the
//! in-memory adapter), so concurrent requests cannot double-allocate a
//! room type.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::user::UserId;

/// Errors raised by booking store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingStoreError {
    /// A non-cancelled booking of the same room type overlaps the
    /// requested dates.
    #[error("room type is already booked for the requested dates")]
    Overlap,
    /// The booking to update is no longer present.
    #[error("booking not found")]
    Missing,
    /// Storage round-trip failed.
    #[error("booking store failure: {message}")]
    Storage {
        /// Adapter-specific description; redacted at the HTTP boundary.
        message: String,
    },
}

/// Port over booking records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking unless a non-cancelled booking of the same
    /// room type overlaps its stay period. All-or-nothing: on
    /// [`BookingStoreError::Overlap`] no record is written.
    async fn insert_unless_overlapping(&self, booking: &Booking)
        -> Result<(), BookingStoreError>;

    /// Replace an existing booking unless the new stay period overlaps a
    /// non-cancelled booking of the same room type *other than itself*.
    async fn update_unless_overlapping(&self, booking: &Booking)
        -> Result<(), BookingStoreError>;

    /// Replace an existing booking without the overlap guard; used for
    /// transitions that cannot extend occupancy (cancellation).
    async fn update(&self, booking: &Booking) -> Result<(), BookingStoreError>;

    /// Look a booking up by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingStoreError>;

    /// All bookings belonging to one user, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingStoreError>;

    /// Every booking in the store, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingStoreError>;
}
