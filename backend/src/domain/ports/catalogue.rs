//! Driving port for public hotel catalogue reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::hotel::{HotelDetails, HotelSummary};

/// Read-only catalogue queries backing the public hotel routes.
#[async_trait]
pub trait HotelCatalogue: Send + Sync {
    /// All hotels.
    async fn list_hotels(&self) -> Result<Vec<HotelSummary>, Error>;

    /// One hotel with its room types.
    async fn hotel_details(&self, hotel_id: Uuid) -> Result<HotelDetails, Error>;
}
