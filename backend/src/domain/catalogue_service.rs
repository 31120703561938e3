//! Public hotel catalogue reads.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::hotel::{HotelDetails, HotelSummary};
use crate::domain::ports::{HotelCatalogue, HotelRepository, HotelStoreError};

/// Catalogue query service over the hotel store.
#[derive(Clone)]
pub struct CatalogueService<H> {
    hotels: Arc<H>,
}

impl<H> CatalogueService<H> {
    /// Wire the service to the hotel store.
    pub fn new(hotels: Arc<H>) -> Self {
        Self { hotels }
    }
}

fn map_hotel_store(error: HotelStoreError) -> Error {
    Error::internal(format!("hotel store failure: {error}"))
}

#[async_trait]
impl<H> HotelCatalogue for CatalogueService<H>
where
    H: HotelRepository,
{
    async fn list_hotels(&self) -> Result<Vec<HotelSummary>, Error> {
        let hotels = self.hotels.list_hotels().await.map_err(map_hotel_store)?;
        Ok(hotels.iter().map(HotelSummary::from).collect())
    }

    async fn hotel_details(&self, hotel_id: Uuid) -> Result<HotelDetails, Error> {
        let hotel = self
            .hotels
            .find_hotel(hotel_id)
            .await
            .map_err(map_hotel_store)?
            .ok_or_else(|| Error::not_found(format!("hotel not found: {hotel_id}")))?;
        let room_types = self
            .hotels
            .room_types_for_hotel(hotel_id)
            .await
            .map_err(map_hotel_store)?;
        Ok(HotelDetails::from_parts(&hotel, &room_types))
    }
}
