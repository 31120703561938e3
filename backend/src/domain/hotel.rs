//! Hotel catalogue read models.
//!
//! The reservation engine treats these as read-only reference data; the
//! catalogue write side (creation, approval workflows) is out of scope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A hotel catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// City used in booking projections.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Street address.
    pub address: String,
    /// Marketing description.
    pub description: String,
    /// Aggregate guest rating, 0.0–5.0, stored to one decimal place.
    pub rating: Decimal,
}

/// A bookable room category within a hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomType {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning hotel.
    pub hotel_id: Uuid,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Nightly price in exact decimal arithmetic.
    pub price_per_night: Decimal,
    /// Guests accommodated per room.
    pub capacity: u32,
}

/// Catalogue listing projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    /// Stable identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Aggregate guest rating.
    #[schema(value_type = String, example = "4.5")]
    pub rating: Decimal,
}

impl From<&Hotel> for HotelSummary {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            city: hotel.city.clone(),
            state: hotel.state.clone(),
            rating: hotel.rating,
        }
    }
}

/// Room type projection nested in [`HotelDetails`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeView {
    /// Stable identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Nightly price.
    #[schema(value_type = String, example = "18500")]
    pub price_per_night: Decimal,
    /// Guests accommodated per room.
    pub capacity: u32,
}

impl From<&RoomType> for RoomTypeView {
    fn from(room_type: &RoomType) -> Self {
        Self {
            id: room_type.id,
            name: room_type.name.clone(),
            description: room_type.description.clone(),
            price_per_night: room_type.price_per_night,
            capacity: room_type.capacity,
        }
    }
}

/// Single-hotel projection with its room types.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetails {
    /// Stable identifier.
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Street address.
    pub address: String,
    /// Marketing description.
    pub description: String,
    /// Aggregate guest rating.
    #[schema(value_type = String, example = "4.8")]
    pub rating: Decimal,
    /// Bookable room categories.
    pub room_types: Vec<RoomTypeView>,
}

impl HotelDetails {
    /// Compose the projection from a hotel and its room types.
    pub fn from_parts(hotel: &Hotel, room_types: &[RoomType]) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            city: hotel.city.clone(),
            state: hotel.state.clone(),
            address: hotel.address.clone(),
            description: hotel.description.clone(),
            rating: hotel.rating,
            room_types: room_types.iter().map(RoomTypeView::from).collect(),
        }
    }
}
