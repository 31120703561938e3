//! Driven port for the hotel catalogue store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::hotel::{Hotel, RoomType};

/// Errors raised by catalogue store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotelStoreError {
    /// Storage round-trip failed.
    #[error("hotel store failure: {message}")]
    Storage {
        /// Adapter-specific description; redacted at the HTTP boundary.
        message: String,
    },
}

/// Port over hotels and their room types.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Look a hotel up by identifier.
    async fn find_hotel(&self, id: Uuid) -> Result<Option<Hotel>, HotelStoreError>;

    /// Look a room type up by identifier.
    async fn find_room_type(&self, id: Uuid) -> Result<Option<RoomType>, HotelStoreError>;

    /// All hotels, for the public catalogue listing.
    async fn list_hotels(&self) -> Result<Vec<Hotel>, HotelStoreError>;

    /// Room types belonging to one hotel.
    async fn room_types_for_hotel(&self, hotel_id: Uuid)
        -> Result<Vec<RoomType>, HotelStoreError>;

    /// Persist a hotel; used by the startup seeder.
    async fn insert_hotel(&self, hotel: &Hotel) -> Result<(), HotelStoreError>;

    /// Persist a room type; used by the startup seeder.
    async fn insert_room_type(&self, room_type: &RoomType) -> Result<(), HotelStoreError>;
}
