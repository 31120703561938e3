//! Startup seed data.
//!
//! Mirrors the data set the service has always shipped with: one account
//! per role and two hotels with one room type each. Seeding only runs
//! against an empty user store, so restarts against persistent stores
//! would not duplicate records.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::hotel::{Hotel, RoomType};
use crate::domain::password::hash_password;
use crate::domain::ports::{HotelRepository, UserRepository};
use crate::domain::{AccountStatus, Email, Error, User, UserId, UserRole};

fn seed_user(
    email: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    password: &str,
    role: UserRole,
) -> Result<User, Error> {
    Ok(User {
        id: UserId::random(),
        email: Email::new(email).map_err(|e| Error::internal(e.to_string()))?,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone: phone.to_owned(),
        password_hash: hash_password(password).map_err(|e| Error::internal(e.to_string()))?,
        role,
        status: AccountStatus::Active,
    })
}

/// Populate empty stores with the standard example accounts and catalogue.
///
/// Returns `true` when seeding ran.
pub async fn seed_if_empty(
    users: &dyn UserRepository,
    hotels: &dyn HotelRepository,
) -> Result<bool, Error> {
    let existing = users
        .count()
        .await
        .map_err(|e| Error::internal(e.to_string()))?;
    if existing > 0 {
        return Ok(false);
    }

    info!("seeding example accounts and catalogue");

    let accounts = [
        seed_user("admin@stays.in", "Admin", "User", "1234567890", "admin123", UserRole::Admin)?,
        seed_user(
            "user@stays.in",
            "Aadesh",
            "Customer",
            "9876543210",
            "password123",
            UserRole::Customer,
        )?,
        seed_user(
            "owner@stays.in",
            "Hotel",
            "Manager",
            "5555555555",
            "owner123",
            UserRole::HotelManager,
        )?,
    ];
    for account in &accounts {
        users
            .insert(account)
            .await
            .map_err(|e| Error::internal(e.to_string()))?;
    }

    let taj = Hotel {
        id: Uuid::new_v4(),
        name: "Taj Lands End".into(),
        city: "Mumbai".into(),
        state: "Maharashtra".into(),
        address: "Bandra West, Mumbai".into(),
        description: "Luxury hotel with ocean views".into(),
        rating: Decimal::new(45, 1),
    };
    let oberoi = Hotel {
        id: Uuid::new_v4(),
        name: "The Oberoi Udaivilas".into(),
        city: "Udaipur".into(),
        state: "Rajasthan".into(),
        address: "Lake Pichola, Udaipur".into(),
        description: "Palace hotel on Lake Pichola".into(),
        rating: Decimal::new(48, 1),
    };
    let room_types = [
        RoomType {
            id: Uuid::new_v4(),
            hotel_id: taj.id,
            name: "Ocean View Room".into(),
            description: "Spacious room with ocean view".into(),
            price_per_night: Decimal::from(18_500),
            capacity: 2,
        },
        RoomType {
            id: Uuid::new_v4(),
            hotel_id: oberoi.id,
            name: "Premier Lake View Room".into(),
            description: "Luxury room overlooking the lake".into(),
            price_per_night: Decimal::from(45_000),
            capacity: 2,
        },
    ];

    for hotel in [&taj, &oberoi] {
        hotels
            .insert_hotel(hotel)
            .await
            .map_err(|e| Error::internal(e.to_string()))?;
    }
    for room_type in &room_types {
        hotels
            .insert_room_type(room_type)
            .await
            .map_err(|e| Error::internal(e.to_string()))?;
    }

    info!(
        accounts = accounts.len(),
        hotels = 2,
        "example data loaded"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::{InMemoryHotelRepository, InMemoryUserRepository};

    #[tokio::test]
    async fn seeds_once_and_only_once() {
        let users = InMemoryUserRepository::new();
        let hotels = InMemoryHotelRepository::new();

        assert!(seed_if_empty(&users, &hotels).await.expect("first seed"));
        assert_eq!(users.count().await.expect("count"), 3);

        // A second run against populated stores is a no-op.
        assert!(!seed_if_empty(&users, &hotels).await.expect("second seed"));
        assert_eq!(users.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn seeded_catalogue_links_room_types_to_hotels() {
        let users = InMemoryUserRepository::new();
        let hotels = InMemoryHotelRepository::new();
        seed_if_empty(&users, &hotels).await.expect("seed");

        let listed = hotels.list_hotels().await.expect("hotels listed");
        assert_eq!(listed.len(), 2);
        for hotel in &listed {
            let rooms = hotels
                .room_types_for_hotel(hotel.id)
                .await
                .expect("room types listed");
            assert_eq!(rooms.len(), 1, "each seeded hotel has one room type");
        }
    }
}
