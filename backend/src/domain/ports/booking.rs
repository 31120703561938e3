//! Driving ports for the reservation engine.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::booking::BookingView;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Optional guest contact overrides on booking creation. Unspecified
/// fields default to the caller's own profile.
#[derive(Debug, Clone, Default)]
pub struct GuestOverrides {
    /// Given name override.
    pub first_name: Option<String>,
    /// Family name override.
    pub last_name: Option<String>,
    /// Contact email override.
    pub email: Option<String>,
    /// Contact phone override.
    pub phone: Option<String>,
}

/// Validated booking creation request handed to the engine.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    /// Hotel to book.
    pub hotel_id: Uuid,
    /// Room category to book.
    pub room_type_id: Uuid,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Adult guests; defaults to 1 upstream.
    pub adults: u32,
    /// Child guests; defaults to 0 upstream.
    pub children: u32,
    /// Rooms requested; defaults to 1 upstream.
    pub rooms: u32,
    /// Guest contact overrides.
    pub guest: GuestOverrides,
    /// Payment method label; defaults to `CREDIT_CARD` upstream.
    pub payment_method: Option<String>,
}

/// Partial update: `None` fields are left untouched, never reset.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    /// New first night.
    pub check_in_date: Option<NaiveDate>,
    /// New departure date.
    pub check_out_date: Option<NaiveDate>,
    /// New adult count.
    pub adults: Option<u32>,
    /// New child count.
    pub children: Option<u32>,
    /// New room count.
    pub rooms: Option<u32>,
}

/// Acknowledgment returned by cancellation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancellationAck {
    /// Always `"Success"` on the success path.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl CancellationAck {
    /// The standard success acknowledgment.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "Success".into(),
            message: message.into(),
        }
    }
}

/// Mutating reservation operations.
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Create a booking for the calling user.
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
        caller: UserId,
    ) -> Result<BookingView, Error>;

    /// Apply a partial update to an owned booking and reprice it.
    async fn update_booking(
        &self,
        booking_id: Uuid,
        changes: BookingChanges,
        caller: UserId,
    ) -> Result<BookingView, Error>;

    /// Cancel an owned booking. Repeat cancellation is a no-op.
    async fn cancel_booking(
        &self,
        booking_id: Uuid,
        caller: UserId,
    ) -> Result<CancellationAck, Error>;
}

/// Read-only reservation projections.
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Bookings belonging to the calling user.
    async fn bookings_for_user(&self, caller: UserId) -> Result<Vec<BookingView>, Error>;

    /// Every booking; role-gated to administrators upstream.
    async fn all_bookings(&self) -> Result<Vec<BookingView>, Error>;
}
