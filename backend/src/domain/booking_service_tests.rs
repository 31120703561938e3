//! Reservation engine unit tests over mocked stores.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::domain::booking::{Booking, BookingStatus, GuestContact, PaymentStatus, StayPeriod};
use crate::domain::error::ErrorCode;
use crate::domain::hotel::{Hotel, RoomType};
use crate::domain::ports::booking_repository::MockBookingRepository;
use crate::domain::ports::hotel_repository::MockHotelRepository;
use crate::domain::ports::user_repository::MockUserRepository;
use crate::domain::ports::GuestOverrides;
use crate::domain::user::{AccountStatus, Email, UserRole};

fn fixture_user(id: UserId) -> User {
    User {
        id,
        email: Email::new("user@stays.in").expect("valid email"),
        first_name: "Aadesh".into(),
        last_name: "Customer".into(),
        phone: "9876543210".into(),
        password_hash: String::new(),
        role: UserRole::Customer,
        status: AccountStatus::Active,
    }
}

fn fixture_hotel(id: Uuid) -> Hotel {
    Hotel {
        id,
        name: "Taj Lands End".into(),
        city: "Mumbai".into(),
        state: "Maharashtra".into(),
        address: "Bandra West, Mumbai".into(),
        description: "Luxury hotel with ocean views".into(),
        rating: Decimal::new(45, 1),
    }
}

fn fixture_room_type(id: Uuid, hotel_id: Uuid, nightly: i64) -> RoomType {
    RoomType {
        id,
        hotel_id,
        name: "Ocean View Room".into(),
        description: "Spacious room with ocean view".into(),
        price_per_night: Decimal::from(nightly),
        capacity: 2,
    }
}

fn fixture_booking(owner: UserId, hotel_id: Uuid, room_type_id: Uuid) -> Booking {
    let check_in = future(30);
    let check_out = future(33);
    Booking {
        id: Uuid::new_v4(),
        user_id: owner,
        hotel_id,
        room_type_id,
        period: StayPeriod::new(check_in, check_out).expect("valid period"),
        adults: 2,
        children: 0,
        rooms: 1,
        total_price: Decimal::from(3000),
        status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Pending,
        payment_method: "CREDIT_CARD".into(),
        booking_reference: "HB-FIXTURE1".into(),
        transaction_id: "TXN-FIXTURE00001".into(),
        guest: GuestContact {
            first_name: "Aadesh".into(),
            last_name: "Customer".into(),
            email: "user@stays.in".into(),
            phone: "9876543210".into(),
        },
        booked_on: Utc::now().date_naive(),
    }
}

fn future(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

fn create_request(hotel_id: Uuid, room_type_id: Uuid) -> CreateBookingRequest {
    CreateBookingRequest {
        hotel_id,
        room_type_id,
        check_in_date: future(30),
        check_out_date: future(33),
        adults: 1,
        children: 0,
        rooms: 1,
        guest: GuestOverrides::default(),
        payment_method: None,
    }
}

struct Mocks {
    bookings: MockBookingRepository,
    hotels: MockHotelRepository,
    users: MockUserRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            bookings: MockBookingRepository::new(),
            hotels: MockHotelRepository::new(),
            users: MockUserRepository::new(),
        }
    }

    /// Wire lookups for one user, one hotel, and one room type.
    fn with_catalogue(mut self, user: &User, hotel: &Hotel, room_type: &RoomType) -> Self {
        let user = user.clone();
        self.users
            .expect_find_by_id()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(user.clone())));
        let hotel = hotel.clone();
        self.hotels
            .expect_find_hotel()
            .with(eq(hotel.id))
            .returning(move |_| Ok(Some(hotel.clone())));
        let room_type = room_type.clone();
        self.hotels
            .expect_find_room_type()
            .with(eq(room_type.id))
            .returning(move |_| Ok(Some(room_type.clone())));
        self
    }

    fn into_service(
        self,
    ) -> BookingService<MockBookingRepository, MockHotelRepository, MockUserRepository> {
        BookingService::new(
            Arc::new(self.bookings),
            Arc::new(self.hotels),
            Arc::new(self.users),
        )
    }
}

#[tokio::test]
async fn create_prices_a_three_night_stay() {
    let caller = UserId::random();
    let user = fixture_user(caller);
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);

    let mut mocks = Mocks::new().with_catalogue(&user, &hotel, &room_type);
    mocks
        .bookings
        .expect_insert_unless_overlapping()
        .withf(|b| {
            b.status == BookingStatus::Confirmed
                && b.payment_status == PaymentStatus::Pending
                && b.total_price == Decimal::from(3000)
                && b.booking_reference.starts_with("HB-")
                && b.transaction_id.starts_with("TXN-")
        })
        .times(1)
        .returning(|_| Ok(()));

    let service = mocks.into_service();
    let view = service
        .create_booking(create_request(hotel.id, room_type.id), caller)
        .await
        .expect("booking created");

    assert_eq!(view.total_price, Decimal::from(3000));
    assert_eq!(view.status, BookingStatus::Confirmed);
    assert_eq!(view.hotel_name, "Taj Lands End");
    assert_eq!(view.hotel_city, "Mumbai");
    assert_eq!(view.room_type_name, "Ocean View Room");
}

#[tokio::test]
async fn create_defaults_guest_contact_from_profile() {
    let caller = UserId::random();
    let user = fixture_user(caller);
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);

    let mut mocks = Mocks::new().with_catalogue(&user, &hotel, &room_type);
    mocks
        .bookings
        .expect_insert_unless_overlapping()
        .withf(|b| {
            b.guest.first_name == "Aadesh"
                && b.guest.email == "user@stays.in"
                && b.guest.phone == "9876543210"
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut request = create_request(hotel.id, room_type.id);
    request.guest = GuestOverrides {
        last_name: Some("Traveller".into()),
        ..GuestOverrides::default()
    };

    let view = mocks
        .into_service()
        .create_booking(request, caller)
        .await
        .expect("booking created");
    assert_eq!(view.guest.last_name, "Traveller");
}

#[tokio::test]
async fn create_fails_not_found_for_unknown_hotel() {
    let caller = UserId::random();
    let user = fixture_user(caller);

    let mut mocks = Mocks::new();
    let cloned = user.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(cloned.clone())));
    mocks.hotels.expect_find_hotel().returning(|_| Ok(None));

    let err = mocks
        .into_service()
        .create_booking(create_request(Uuid::new_v4(), Uuid::new_v4()), caller)
        .await
        .expect_err("unknown hotel must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
// Check-out on or before check-in.
#[case(future(30), future(30))]
#[case(future(33), future(30))]
// Check-in in the past.
#[case(future(-1), future(3))]
#[tokio::test]
async fn create_rejects_invalid_dates(#[case] check_in: NaiveDate, #[case] check_out: NaiveDate) {
    let caller = UserId::random();
    let user = fixture_user(caller);
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);

    let mut request = create_request(hotel.id, room_type.id);
    request.check_in_date = check_in;
    request.check_out_date = check_out;

    let err = Mocks::new()
        .with_catalogue(&user, &hotel, &room_type)
        .into_service()
        .create_booking(request, caller)
        .await
        .expect_err("invalid dates must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_rejects_room_type_of_another_hotel() {
    let caller = UserId::random();
    let user = fixture_user(caller);
    let hotel = fixture_hotel(Uuid::new_v4());
    let foreign_room = fixture_room_type(Uuid::new_v4(), Uuid::new_v4(), 1000);

    let err = Mocks::new()
        .with_catalogue(&user, &hotel, &foreign_room)
        .into_service()
        .create_booking(create_request(hotel.id, foreign_room.id), caller)
        .await
        .expect_err("mismatched room type must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_surfaces_overlap_as_conflict() {
    let caller = UserId::random();
    let user = fixture_user(caller);
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);

    let mut mocks = Mocks::new().with_catalogue(&user, &hotel, &room_type);
    mocks
        .bookings
        .expect_insert_unless_overlapping()
        .returning(|_| Err(BookingStoreError::Overlap));

    let err = mocks
        .into_service()
        .create_booking(create_request(hotel.id, room_type.id), caller)
        .await
        .expect_err("overlap must fail");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let owner = UserId::random();
    let stranger = UserId::random();
    let booking = fixture_booking(owner, Uuid::new_v4(), Uuid::new_v4());

    let mut mocks = Mocks::new();
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .with(eq(booking.id))
        .returning(move |_| Ok(Some(stored.clone())));

    let err = mocks
        .into_service()
        .update_booking(booking.id, BookingChanges::default(), stranger)
        .await
        .expect_err("non-owner must be rejected");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_applies_partial_changes_and_reprices() {
    let owner = UserId::random();
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);
    let booking = fixture_booking(owner, hotel.id, room_type.id);

    let mut mocks = Mocks::new().with_catalogue(&fixture_user(owner), &hotel, &room_type);
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    mocks
        .bookings
        .expect_update_unless_overlapping()
        // 5 nights × 1000 × 2 rooms after the edit.
        .withf(|b| b.total_price == Decimal::from(10_000) && b.adults == 2)
        .times(1)
        .returning(|_| Ok(()));

    let changes = BookingChanges {
        check_out_date: Some(future(35)),
        rooms: Some(2),
        ..BookingChanges::default()
    };
    let view = mocks
        .into_service()
        .update_booking(booking.id, changes, owner)
        .await
        .expect("update succeeds");

    assert_eq!(view.total_price, Decimal::from(10_000));
    assert_eq!(view.rooms, 2);
    // Untouched fields survive the partial update.
    assert_eq!(view.adults, 2);
    assert_eq!(view.booking_reference, booking.booking_reference);
}

#[tokio::test]
async fn update_rejects_inverted_dates() {
    let owner = UserId::random();
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);
    let booking = fixture_booking(owner, hotel.id, room_type.id);

    let mut mocks = Mocks::new().with_catalogue(&fixture_user(owner), &hotel, &room_type);
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let changes = BookingChanges {
        check_out_date: Some(booking.period.check_in()),
        ..BookingChanges::default()
    };
    let err = mocks
        .into_service()
        .update_booking(booking.id, changes, owner)
        .await
        .expect_err("inverted dates must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_of_cancelled_booking_conflicts() {
    let owner = UserId::random();
    let mut booking = fixture_booking(owner, Uuid::new_v4(), Uuid::new_v4());
    booking.status = BookingStatus::Cancelled;

    let mut mocks = Mocks::new();
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let err = mocks
        .into_service()
        .update_booking(booking.id, BookingChanges::default(), owner)
        .await
        .expect_err("cancelled booking is terminal");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn cancel_by_non_owner_is_forbidden() {
    let owner = UserId::random();
    let stranger = UserId::random();
    let booking = fixture_booking(owner, Uuid::new_v4(), Uuid::new_v4());

    let mut mocks = Mocks::new();
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    mocks.bookings.expect_update().never();

    let err = mocks
        .into_service()
        .cancel_booking(booking.id, stranger)
        .await
        .expect_err("non-owner must be rejected");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn cancel_transitions_to_cancelled() {
    let owner = UserId::random();
    let booking = fixture_booking(owner, Uuid::new_v4(), Uuid::new_v4());

    let mut mocks = Mocks::new();
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    mocks
        .bookings
        .expect_update()
        .withf(|b| b.status == BookingStatus::Cancelled)
        .times(1)
        .returning(|_| Ok(()));

    let ack = mocks
        .into_service()
        .cancel_booking(booking.id, owner)
        .await
        .expect("cancel succeeds");
    assert_eq!(ack.status, "Success");
}

#[tokio::test]
async fn repeat_cancel_is_a_no_op() {
    let owner = UserId::random();
    let mut booking = fixture_booking(owner, Uuid::new_v4(), Uuid::new_v4());
    booking.status = BookingStatus::Cancelled;

    let mut mocks = Mocks::new();
    let stored = booking.clone();
    mocks
        .bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    // No write may happen: the status must not be touched again.
    mocks.bookings.expect_update().never();
    mocks.bookings.expect_update_unless_overlapping().never();

    let ack = mocks
        .into_service()
        .cancel_booking(booking.id, owner)
        .await
        .expect("repeat cancel succeeds");
    assert_eq!(ack.status, "Success");
}

#[tokio::test]
async fn cancel_of_missing_booking_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.bookings.expect_find_by_id().returning(|_| Ok(None));

    let err = mocks
        .into_service()
        .cancel_booking(Uuid::new_v4(), UserId::random())
        .await
        .expect_err("missing booking must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn user_bookings_are_projected_with_display_names() {
    let owner = UserId::random();
    let hotel = fixture_hotel(Uuid::new_v4());
    let room_type = fixture_room_type(Uuid::new_v4(), hotel.id, 1000);
    let booking = fixture_booking(owner, hotel.id, room_type.id);

    let mut mocks = Mocks::new().with_catalogue(&fixture_user(owner), &hotel, &room_type);
    let stored = booking.clone();
    mocks
        .bookings
        .expect_list_for_user()
        .with(eq(owner))
        .returning(move |_| Ok(vec![stored.clone()]));

    let views = mocks
        .into_service()
        .bookings_for_user(owner)
        .await
        .expect("listing succeeds");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].hotel_name, "Taj Lands End");
    assert_eq!(views[0].room_type_name, "Ocean View Room");
}
