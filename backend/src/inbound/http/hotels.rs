//! Hotel catalogue handlers.
//!
//! ```text
//! GET /api/hotels
//! GET /api/hotels/{hotelId}
//! ```
//!
//! Both routes are public per the authorization policy.

use actix_web::{get, web};

use crate::domain::hotel::{HotelDetails, HotelSummary};
use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;
use crate::inbound::http::ApiResult;

/// List the hotel catalogue.
#[utoipa::path(
    get,
    path = "/api/hotels",
    responses(
        (status = 200, description = "Hotels", body = [HotelSummary]),
    ),
    tags = ["hotels"],
    operation_id = "listHotels"
)]
#[get("/hotels")]
pub async fn list_hotels(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<HotelSummary>>> {
    let hotels = state.catalogue.list_hotels().await?;
    Ok(web::Json(hotels))
}

/// Fetch one hotel with its room types.
#[utoipa::path(
    get,
    path = "/api/hotels/{hotelId}",
    params(("hotelId" = String, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Hotel", body = HotelDetails),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
    ),
    tags = ["hotels"],
    operation_id = "getHotel"
)]
#[get("/hotels/{hotelId}")]
pub async fn hotel_details(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<HotelDetails>> {
    let hotel_id = parse_uuid(&path.into_inner(), "hotelId")?;
    let details = state.catalogue.hotel_details(hotel_id).await?;
    Ok(web::Json(details))
}
