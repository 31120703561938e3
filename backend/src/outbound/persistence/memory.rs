//! In-memory store adapters.
//!
//! Stand-ins for the relational store (persistence internals are out of
//! scope). Each store guards its map with one `RwLock`; every mutating
//! operation takes the write lock exactly once, which makes it atomic with
//! respect to all other operations on the same store. In particular the
//! overlap-guarded booking writes perform their check and their write
//! under a single acquisition. No lock is ever held across an `.await`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::hotel::{Hotel, RoomType};
use crate::domain::ports::{
    BookingRepository, BookingStoreError, HotelRepository, HotelStoreError, UserRepository,
    UserStoreError,
};
use crate::domain::user::{Email, User, UserId};

fn poisoned<E>(make: impl FnOnce(String) -> E) -> E {
    make("store lock poisoned".to_owned())
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|message| UserStoreError::Storage { message }))?;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|message| UserStoreError::Storage { message }))?;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| poisoned(|message| UserStoreError::Storage { message }))?;
        // Uniqueness check and insert under the same lock acquisition.
        if users.values().any(|u| u.email == user.email) {
            return Err(UserStoreError::DuplicateEmail {
                email: user.email.to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|message| UserStoreError::Storage { message }))?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.email.as_ref().cmp(b.email.as_ref()));
        Ok(all)
    }

    async fn count(&self) -> Result<usize, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|message| UserStoreError::Storage { message }))?;
        Ok(users.len())
    }
}

/// In-memory hotel catalogue store.
#[derive(Debug, Default)]
pub struct InMemoryHotelRepository {
    hotels: RwLock<HashMap<Uuid, Hotel>>,
    room_types: RwLock<HashMap<Uuid, RoomType>>,
}

impl InMemoryHotelRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn find_hotel(&self, id: Uuid) -> Result<Option<Hotel>, HotelStoreError> {
        let hotels = self
            .hotels
            .read()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        Ok(hotels.get(&id).cloned())
    }

    async fn find_room_type(&self, id: Uuid) -> Result<Option<RoomType>, HotelStoreError> {
        let room_types = self
            .room_types
            .read()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        Ok(room_types.get(&id).cloned())
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>, HotelStoreError> {
        let hotels = self
            .hotels
            .read()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        let mut all: Vec<Hotel> = hotels.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn room_types_for_hotel(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<RoomType>, HotelStoreError> {
        let room_types = self
            .room_types
            .read()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        let mut matching: Vec<RoomType> = room_types
            .values()
            .filter(|rt| rt.hotel_id == hotel_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn insert_hotel(&self, hotel: &Hotel) -> Result<(), HotelStoreError> {
        let mut hotels = self
            .hotels
            .write()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        hotels.insert(hotel.id, hotel.clone());
        Ok(())
    }

    async fn insert_room_type(&self, room_type: &RoomType) -> Result<(), HotelStoreError> {
        let mut room_types = self
            .room_types
            .write()
            .map_err(|_| poisoned(|message| HotelStoreError::Storage { message }))?;
        room_types.insert(room_type.id, room_type.clone());
        Ok(())
    }
}

/// In-memory booking store with conditional overlap-guarded writes.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Half-open overlap test against non-cancelled bookings of the same room
/// type, ignoring `exclude` (the booking being updated).
fn overlaps_existing(
    bookings: &HashMap<Uuid, Booking>,
    candidate: &Booking,
    exclude: Option<Uuid>,
) -> bool {
    bookings.values().any(|existing| {
        Some(existing.id) != exclude
            && existing.room_type_id == candidate.room_type_id
            && existing.status != BookingStatus::Cancelled
            && existing.period.overlaps(&candidate.period)
    })
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert_unless_overlapping(
        &self,
        booking: &Booking,
    ) -> Result<(), BookingStoreError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        if overlaps_existing(&bookings, booking, None) {
            return Err(BookingStoreError::Overlap);
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update_unless_overlapping(
        &self,
        booking: &Booking,
    ) -> Result<(), BookingStoreError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        if !bookings.contains_key(&booking.id) {
            return Err(BookingStoreError::Missing);
        }
        if overlaps_existing(&bookings, booking, Some(booking.id)) {
            return Err(BookingStoreError::Overlap);
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        if !bookings.contains_key(&booking.id) {
            return Err(BookingStoreError::Missing);
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingStoreError> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        Ok(bookings.get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingStoreError> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        let mut matching: Vec<Booking> = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.booked_on.cmp(&a.booked_on));
        Ok(matching)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingStoreError> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| poisoned(|message| BookingStoreError::Storage { message }))?;
        let mut all: Vec<Booking> = bookings.values().cloned().collect();
        all.sort_by(|a, b| b.booked_on.cmp(&a.booked_on));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{GuestContact, PaymentStatus, StayPeriod};
    use crate::domain::user::{AccountStatus, UserRole};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
    }

    fn booking(room_type_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            hotel_id: Uuid::new_v4(),
            room_type_id,
            period: StayPeriod::new(check_in, check_out).expect("valid period"),
            adults: 2,
            children: 0,
            rooms: 1,
            total_price: Decimal::from(3000),
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            payment_method: "CREDIT_CARD".into(),
            booking_reference: "HB-TEST0001".into(),
            transaction_id: "TXN-TEST00000001".into(),
            guest: GuestContact {
                first_name: "Aadesh".into(),
                last_name: "Customer".into(),
                email: "user@stays.in".into(),
                phone: "9876543210".into(),
            },
            booked_on: date(2027, 1, 1),
        }
    }

    #[tokio::test]
    async fn overlapping_insert_is_rejected_and_writes_nothing() {
        let repo = InMemoryBookingRepository::new();
        let room_type = Uuid::new_v4();
        let first = booking(room_type, date(2027, 6, 1), date(2027, 6, 4));
        repo.insert_unless_overlapping(&first)
            .await
            .expect("first insert succeeds");

        let second = booking(room_type, date(2027, 6, 3), date(2027, 6, 6));
        assert_eq!(
            repo.insert_unless_overlapping(&second).await,
            Err(BookingStoreError::Overlap)
        );
        assert!(repo
            .find_by_id(second.id)
            .await
            .expect("lookup succeeds")
            .is_none());
    }

    #[tokio::test]
    async fn adjacent_stays_do_not_conflict() {
        let repo = InMemoryBookingRepository::new();
        let room_type = Uuid::new_v4();
        repo.insert_unless_overlapping(&booking(room_type, date(2027, 6, 1), date(2027, 6, 4)))
            .await
            .expect("first insert succeeds");
        repo.insert_unless_overlapping(&booking(room_type, date(2027, 6, 4), date(2027, 6, 7)))
            .await
            .expect("back-to-back stay is allowed");
    }

    #[tokio::test]
    async fn cancelled_bookings_release_their_dates() {
        let repo = InMemoryBookingRepository::new();
        let room_type = Uuid::new_v4();
        let mut first = booking(room_type, date(2027, 6, 1), date(2027, 6, 4));
        repo.insert_unless_overlapping(&first)
            .await
            .expect("first insert succeeds");

        first.status = BookingStatus::Cancelled;
        repo.update(&first).await.expect("cancellation persists");

        repo.insert_unless_overlapping(&booking(room_type, date(2027, 6, 2), date(2027, 6, 5)))
            .await
            .expect("cancelled dates are free again");
    }

    #[tokio::test]
    async fn different_room_types_never_conflict() {
        let repo = InMemoryBookingRepository::new();
        repo.insert_unless_overlapping(&booking(Uuid::new_v4(), date(2027, 6, 1), date(2027, 6, 4)))
            .await
            .expect("first insert succeeds");
        repo.insert_unless_overlapping(&booking(Uuid::new_v4(), date(2027, 6, 1), date(2027, 6, 4)))
            .await
            .expect("other room type is unaffected");
    }

    #[tokio::test]
    async fn update_excludes_the_booking_itself_from_the_guard() {
        let repo = InMemoryBookingRepository::new();
        let room_type = Uuid::new_v4();
        let mut stored = booking(room_type, date(2027, 6, 1), date(2027, 6, 4));
        repo.insert_unless_overlapping(&stored)
            .await
            .expect("insert succeeds");

        // Extending the same booking overlaps only itself; that must pass.
        stored.period = StayPeriod::new(date(2027, 6, 1), date(2027, 6, 6)).expect("valid period");
        repo.update_unless_overlapping(&stored)
            .await
            .expect("self-overlap is not a conflict");
    }

    #[tokio::test]
    async fn update_of_unknown_booking_reports_missing() {
        let repo = InMemoryBookingRepository::new();
        let ghost = booking(Uuid::new_v4(), date(2027, 6, 1), date(2027, 6, 4));
        assert_eq!(
            repo.update(&ghost).await,
            Err(BookingStoreError::Missing)
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let user = User {
            id: UserId::random(),
            email: Email::new("user@stays.in").expect("valid email"),
            first_name: "Aadesh".into(),
            last_name: "Customer".into(),
            phone: "9876543210".into(),
            password_hash: String::new(),
            role: UserRole::Customer,
            status: AccountStatus::Active,
        };
        repo.insert(&user).await.expect("first insert succeeds");

        let duplicate = User {
            id: UserId::random(),
            ..user.clone()
        };
        assert!(matches!(
            repo.insert(&duplicate).await,
            Err(UserStoreError::DuplicateEmail { .. })
        ));
        assert_eq!(repo.count().await.expect("count succeeds"), 1);
    }

    #[tokio::test]
    async fn room_types_are_scoped_to_their_hotel() {
        let repo = InMemoryHotelRepository::new();
        let hotel_id = Uuid::new_v4();
        let other_hotel = Uuid::new_v4();
        for (owner, name) in [(hotel_id, "Ocean View Room"), (other_hotel, "Garden Room")] {
            repo.insert_room_type(&RoomType {
                id: Uuid::new_v4(),
                hotel_id: owner,
                name: name.into(),
                description: String::new(),
                price_per_night: Decimal::from(1000),
                capacity: 2,
            })
            .await
            .expect("insert succeeds");
        }

        let scoped = repo
            .room_types_for_hotel(hotel_id)
            .await
            .expect("listing succeeds");
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].name, "Ocean View Room");
    }
}
