//! Booking aggregate and its invariants.
//!
//! ## Invariants
//! - `check_out` is strictly after `check_in`; `check_in` is not in the
//!   past at creation time.
//! - `total_price = price_per_night × nights × max(rooms, 1)` in exact
//!   decimal arithmetic, recomputed on every date/room-count edit.
//! - `booking_reference` and `transaction_id` are generated once and never
//!   change; neither is sequential, so references cannot be enumerated.
//! - `user_id` never changes after creation.
//! - Bookings are never physically deleted; cancellation is a status
//!   transition.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::hotel::{Hotel, RoomType};
use crate::domain::user::UserId;

/// Validation failures for stay periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StayPeriodError {
    /// Check-out not strictly after check-in.
    #[error("check-out date must be at least one day after check-in date")]
    Ordering,
    /// Check-in before the reference "today".
    #[error("check-in date cannot be in the past")]
    InPast,
}

/// A half-open date range `[check_in, check_out)`.
///
/// Nights are calendar-day differences; elapsed-time arithmetic would
/// drift across daylight-saving boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Construct a period, enforcing date ordering.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayPeriodError> {
        if check_out <= check_in {
            return Err(StayPeriodError::Ordering);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Construct a period that must not start before `today`.
    pub fn new_from(
        check_in: NaiveDate,
        check_out: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, StayPeriodError> {
        if check_in < today {
            return Err(StayPeriodError::InPast);
        }
        Self::new(check_in, check_out)
    }

    /// First night of the stay.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure date; not itself a night of the stay.
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights, always at least one.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open interval overlap test.
    ///
    /// Adjacent stays (one checking out the day the other checks in) do
    /// not overlap.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

/// Booking lifecycle state. CANCELLED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Live reservation.
    Confirmed,
    /// Cancelled by the owner or an administrator; terminal.
    Cancelled,
    /// Stay finished. Reached only by administrative action outside this
    /// core; no lifecycle event here drives it.
    Completed,
}

/// Payment progress, tracked alongside but independent of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment not yet taken.
    Pending,
    /// Payment settled.
    Completed,
    /// Payment attempt failed.
    Failed,
}

/// Guest contact details attached to a booking.
///
/// Serialised with `guest`-prefixed names; [`BookingView`] flattens these
/// into the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GuestContact {
    /// Given name.
    #[serde(rename = "guestFirstName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "guestLastName")]
    pub last_name: String,
    /// Contact email.
    #[serde(rename = "guestEmail")]
    pub email: String,
    /// Contact phone.
    #[serde(rename = "guestPhone")]
    pub phone: String,
}

/// Human-facing unique reservation label, distinct from the internal id.
pub fn generate_booking_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("HB-{}", &hex[..8])
}

/// Payment transaction identifier, generated once at creation.
pub fn generate_transaction_id() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TXN-{}", &hex[..12])
}

/// `price_per_night × nights × max(rooms, 1)` in exact decimals.
pub fn total_price(price_per_night: Decimal, nights: i64, rooms: u32) -> Decimal {
    price_per_night * Decimal::from(nights) * Decimal::from(rooms.max(1))
}

/// A reservation record.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user; never changes after creation.
    pub user_id: UserId,
    /// Booked hotel.
    pub hotel_id: Uuid,
    /// Booked room category.
    pub room_type_id: Uuid,
    /// Stay dates.
    pub period: StayPeriod,
    /// Adult guests.
    pub adults: u32,
    /// Child guests.
    pub children: u32,
    /// Rooms reserved.
    pub rooms: u32,
    /// Price for the whole stay.
    pub total_price: Decimal,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Payment progress.
    pub payment_status: PaymentStatus,
    /// Payment method label, e.g. `CREDIT_CARD`.
    pub payment_method: String,
    /// Human-facing reservation label; immutable.
    pub booking_reference: String,
    /// Payment transaction identifier; immutable.
    pub transaction_id: String,
    /// Guest contact details.
    pub guest: GuestContact,
    /// Date the booking was made.
    pub booked_on: NaiveDate,
}

/// Outward booking projection.
///
/// Carries hotel/room display fields resolved at read time and never any
/// internal user identifier other than the requester's own record linkage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    /// Stable identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    /// Human-facing reservation label.
    #[schema(example = "HB-1A2B3C4D")]
    pub booking_reference: String,
    /// Hotel display name.
    pub hotel_name: String,
    /// Hotel city.
    pub hotel_city: String,
    /// Room category display name.
    pub room_type_name: String,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Adult guests.
    pub adults: u32,
    /// Child guests.
    pub children: u32,
    /// Rooms reserved.
    pub rooms: u32,
    /// Price for the whole stay.
    #[schema(value_type = String, example = "55500")]
    pub total_price: Decimal,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Guest contact details.
    #[serde(flatten)]
    pub guest: GuestContact,
    /// Payment progress.
    pub payment_status: PaymentStatus,
    /// Payment method label.
    pub payment_method: String,
    /// Payment transaction identifier.
    #[schema(example = "TXN-1A2B3C4D5E6F")]
    pub transaction_id: String,
}

impl BookingView {
    /// Compose the projection from a booking and its resolved references.
    pub fn from_parts(booking: &Booking, hotel: &Hotel, room_type: &RoomType) -> Self {
        Self {
            id: booking.id,
            booking_reference: booking.booking_reference.clone(),
            hotel_name: hotel.name.clone(),
            hotel_city: hotel.city.clone(),
            room_type_name: room_type.name.clone(),
            check_in_date: booking.period.check_in(),
            check_out_date: booking.period.check_out(),
            adults: booking.adults,
            children: booking.children,
            rooms: booking.rooms,
            total_price: booking.total_price,
            status: booking.status,
            booking_date: booking.booked_on,
            guest: booking.guest.clone(),
            payment_status: booking.payment_status,
            payment_method: booking.payment_method.clone(),
            transaction_id: booking.transaction_id.clone(),
        }
    }
}
