//! Reservation engine: the booking state machine and its guarded
//! mutations.
//!
//! Role authorization has already happened at the policy gate by the time
//! these operations run; this service enforces the *resource* rules:
//! ownership, date ordering, repricing, terminal-state protection, and the
//! room-type overlap guard (delegated to the repository's conditional
//! writes so the check and the write share one atomic unit).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::booking::{
    generate_booking_reference, generate_transaction_id, total_price, Booking, BookingStatus,
    BookingView, GuestContact, PaymentStatus, StayPeriod,
};
use crate::domain::error::Error;
use crate::domain::hotel::{Hotel, RoomType};
use crate::domain::ports::{
    BookingChanges, BookingCommand, BookingQuery, BookingRepository, BookingStoreError,
    CancellationAck, CreateBookingRequest, HotelRepository, HotelStoreError, UserRepository,
    UserStoreError,
};
use crate::domain::user::{User, UserId};

const DEFAULT_PAYMENT_METHOD: &str = "CREDIT_CARD";

/// Reservation engine wired to its three driven ports.
#[derive(Clone)]
pub struct BookingService<B, H, U> {
    bookings: Arc<B>,
    hotels: Arc<H>,
    users: Arc<U>,
}

impl<B, H, U> BookingService<B, H, U> {
    /// Create the engine over booking, hotel, and user stores.
    pub fn new(bookings: Arc<B>, hotels: Arc<H>, users: Arc<U>) -> Self {
        Self {
            bookings,
            hotels,
            users,
        }
    }
}

fn map_user_store(error: UserStoreError) -> Error {
    Error::internal(format!("user store failure: {error}"))
}

fn map_hotel_store(error: HotelStoreError) -> Error {
    Error::internal(format!("hotel store failure: {error}"))
}

fn map_booking_store(error: BookingStoreError) -> Error {
    match error {
        BookingStoreError::Overlap => {
            Error::conflict("room type is already booked for the requested dates")
        }
        BookingStoreError::Missing => Error::not_found("booking not found"),
        BookingStoreError::Storage { message } => {
            Error::internal(format!("booking store failure: {message}"))
        }
    }
}

impl<B, H, U> BookingService<B, H, U>
where
    B: BookingRepository,
    H: HotelRepository,
    U: UserRepository,
{
    async fn require_caller(&self, caller: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(caller)
            .await
            .map_err(map_user_store)?
            .ok_or_else(|| Error::not_found(format!("user not found: {caller}")))
    }

    async fn require_hotel(&self, id: uuid::Uuid) -> Result<Hotel, Error> {
        self.hotels
            .find_hotel(id)
            .await
            .map_err(map_hotel_store)?
            .ok_or_else(|| Error::not_found(format!("hotel not found: {id}")))
    }

    async fn require_room_type(&self, id: uuid::Uuid) -> Result<RoomType, Error> {
        self.hotels
            .find_room_type(id)
            .await
            .map_err(map_hotel_store)?
            .ok_or_else(|| Error::not_found(format!("room type not found: {id}")))
    }

    /// Load an existing booking and check the caller owns it.
    async fn require_owned(&self, booking_id: uuid::Uuid, caller: UserId) -> Result<Booking, Error> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await
            .map_err(map_booking_store)?
            .ok_or_else(|| Error::not_found(format!("booking not found: {booking_id}")))?;
        if booking.user_id != caller {
            return Err(Error::forbidden("booking belongs to another user"));
        }
        Ok(booking)
    }

    /// Resolve display references and build the response projection.
    async fn project(&self, booking: &Booking) -> Result<BookingView, Error> {
        // The store is referential; a dangling hotel or room type means a
        // corrupted store, not a caller mistake.
        let hotel = self
            .hotels
            .find_hotel(booking.hotel_id)
            .await
            .map_err(map_hotel_store)?
            .ok_or_else(|| Error::internal("booking references a missing hotel"))?;
        let room_type = self
            .hotels
            .find_room_type(booking.room_type_id)
            .await
            .map_err(map_hotel_store)?
            .ok_or_else(|| Error::internal("booking references a missing room type"))?;
        Ok(BookingView::from_parts(booking, &hotel, &room_type))
    }
}

#[async_trait]
impl<B, H, U> BookingCommand for BookingService<B, H, U>
where
    B: BookingRepository,
    H: HotelRepository,
    U: UserRepository,
{
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
        caller: UserId,
    ) -> Result<BookingView, Error> {
        let user = self.require_caller(caller).await?;
        let hotel = self.require_hotel(request.hotel_id).await?;
        let room_type = self.require_room_type(request.room_type_id).await?;
        if room_type.hotel_id != hotel.id {
            return Err(Error::invalid_request(
                "room type does not belong to the requested hotel",
            ));
        }

        let today = Utc::now().date_naive();
        let period =
            StayPeriod::new_from(request.check_in_date, request.check_out_date, today)
                .map_err(|e| Error::invalid_request(e.to_string()))?;

        let price = total_price(room_type.price_per_night, period.nights(), request.rooms);
        let guest = GuestContact {
            first_name: request.guest.first_name.unwrap_or_else(|| user.first_name.clone()),
            last_name: request.guest.last_name.unwrap_or_else(|| user.last_name.clone()),
            email: request
                .guest
                .email
                .unwrap_or_else(|| user.email.to_string()),
            phone: request.guest.phone.unwrap_or_else(|| user.phone.clone()),
        };

        let booking = Booking {
            id: uuid::Uuid::new_v4(),
            user_id: user.id,
            hotel_id: hotel.id,
            room_type_id: room_type.id,
            period,
            adults: request.adults,
            children: request.children,
            rooms: request.rooms,
            total_price: price,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            payment_method: request
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_owned()),
            booking_reference: generate_booking_reference(),
            transaction_id: generate_transaction_id(),
            guest,
            booked_on: today,
        };

        self.bookings
            .insert_unless_overlapping(&booking)
            .await
            .map_err(map_booking_store)?;

        info!(
            booking = %booking.booking_reference,
            user = %caller,
            nights = period.nights(),
            "booking created"
        );
        self.project(&booking).await
    }

    async fn update_booking(
        &self,
        booking_id: uuid::Uuid,
        changes: BookingChanges,
        caller: UserId,
    ) -> Result<BookingView, Error> {
        let mut booking = self.require_owned(booking_id, caller).await?;
        if booking.status != BookingStatus::Confirmed {
            return Err(Error::conflict("a cancelled booking cannot be modified"));
        }

        // Partial-update semantics: absent fields stay untouched.
        let check_in = changes.check_in_date.unwrap_or_else(|| booking.period.check_in());
        let check_out = changes
            .check_out_date
            .unwrap_or_else(|| booking.period.check_out());
        booking.period = StayPeriod::new(check_in, check_out)
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        if let Some(adults) = changes.adults {
            booking.adults = adults;
        }
        if let Some(children) = changes.children {
            booking.children = children;
        }
        if let Some(rooms) = changes.rooms {
            booking.rooms = rooms;
        }

        // Reprice from current catalogue data on every edit.
        let room_type = self.require_room_type(booking.room_type_id).await?;
        booking.total_price =
            total_price(room_type.price_per_night, booking.period.nights(), booking.rooms);

        self.bookings
            .update_unless_overlapping(&booking)
            .await
            .map_err(map_booking_store)?;

        info!(booking = %booking.booking_reference, user = %caller, "booking updated");
        self.project(&booking).await
    }

    async fn cancel_booking(
        &self,
        booking_id: uuid::Uuid,
        caller: UserId,
    ) -> Result<CancellationAck, Error> {
        let mut booking = self.require_owned(booking_id, caller).await?;

        // Repeat cancellation is a no-op; CANCELLED is terminal and the
        // acknowledgment is the same either way.
        if booking.status == BookingStatus::Cancelled {
            return Ok(CancellationAck::success("Booking cancelled successfully"));
        }

        booking.status = BookingStatus::Cancelled;
        self.bookings
            .update(&booking)
            .await
            .map_err(map_booking_store)?;

        info!(booking = %booking.booking_reference, user = %caller, "booking cancelled");
        Ok(CancellationAck::success("Booking cancelled successfully"))
    }
}

#[async_trait]
impl<B, H, U> BookingQuery for BookingService<B, H, U>
where
    B: BookingRepository,
    H: HotelRepository,
    U: UserRepository,
{
    async fn bookings_for_user(&self, caller: UserId) -> Result<Vec<BookingView>, Error> {
        let bookings = self
            .bookings
            .list_for_user(caller)
            .await
            .map_err(map_booking_store)?;
        let mut views = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            views.push(self.project(booking).await?);
        }
        Ok(views)
    }

    async fn all_bookings(&self) -> Result<Vec<BookingView>, Error> {
        let bookings = self.bookings.list_all().await.map_err(map_booking_store)?;
        let mut views = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            views.push(self.project(booking).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
