//! Booking API handlers.
//!
//! ```text
//! POST   /api/bookings
//! GET    /api/bookings/my-bookings
//! GET    /api/bookings
//! PUT    /api/bookings/{bookingId}
//! DELETE /api/bookings/{bookingId}
//! ```
//!
//! The policy gate restricts all of these to customers/administrators
//! (the full listing to administrators alone); ownership of individual
//! bookings is enforced by the reservation engine.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingView;
use crate::domain::ports::{
    BookingChanges, CancellationAck, CreateBookingRequest, GuestOverrides,
};
use crate::domain::{Error, Principal, UserRole};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_date, parse_optional_date, parse_uuid, require_at_least_one,
};
use crate::inbound::http::ApiResult;

/// Booking creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    /// Hotel identifier.
    pub hotel_id: String,
    /// Room type identifier.
    pub room_type_id: String,
    /// First night of the stay, `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Departure date, `YYYY-MM-DD`.
    pub check_out_date: String,
    /// Adult guests; defaults to 1.
    pub adults: Option<u32>,
    /// Child guests; defaults to 0.
    pub children: Option<u32>,
    /// Rooms requested; defaults to 1.
    pub rooms: Option<u32>,
    /// Guest given-name override.
    pub guest_first_name: Option<String>,
    /// Guest family-name override.
    pub guest_last_name: Option<String>,
    /// Guest email override.
    pub guest_email: Option<String>,
    /// Guest phone override.
    pub guest_phone: Option<String>,
    /// Payment method label; defaults to `CREDIT_CARD`.
    pub payment_method: Option<String>,
}

impl CreateBookingBody {
    fn into_domain(self) -> Result<CreateBookingRequest, Error> {
        Ok(CreateBookingRequest {
            hotel_id: parse_uuid(&self.hotel_id, "hotelId")?,
            room_type_id: parse_uuid(&self.room_type_id, "roomTypeId")?,
            check_in_date: parse_date(&self.check_in_date, "checkInDate")?,
            check_out_date: parse_date(&self.check_out_date, "checkOutDate")?,
            adults: require_at_least_one(self.adults.unwrap_or(1), "adults")?,
            children: self.children.unwrap_or(0),
            rooms: require_at_least_one(self.rooms.unwrap_or(1), "rooms")?,
            guest: GuestOverrides {
                first_name: self.guest_first_name,
                last_name: self.guest_last_name,
                email: self.guest_email,
                phone: self.guest_phone,
            },
            payment_method: self.payment_method,
        })
    }
}

/// Partial booking update body; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingBody {
    /// New first night, `YYYY-MM-DD`.
    pub check_in_date: Option<String>,
    /// New departure date, `YYYY-MM-DD`.
    pub check_out_date: Option<String>,
    /// New adult count.
    pub adults: Option<u32>,
    /// New child count.
    pub children: Option<u32>,
    /// New room count.
    pub rooms: Option<u32>,
}

impl UpdateBookingBody {
    fn into_domain(self) -> Result<BookingChanges, Error> {
        let adults = self
            .adults
            .map(|value| require_at_least_one(value, "adults"))
            .transpose()?;
        let rooms = self
            .rooms
            .map(|value| require_at_least_one(value, "rooms"))
            .transpose()?;
        Ok(BookingChanges {
            check_in_date: parse_optional_date(self.check_in_date.as_deref(), "checkInDate")?,
            check_out_date: parse_optional_date(self.check_out_date.as_deref(), "checkOutDate")?,
            adults,
            children: self.children,
            rooms,
        })
    }
}

/// Create a booking for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingBody,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Hotel, room type, or user not found", body = Error),
        (status = 409, description = "Room type already booked for those dates", body = Error),
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("BearerAuth" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<CreateBookingBody>,
) -> ApiResult<web::Json<BookingView>> {
    let request = payload.into_inner().into_domain()?;
    let view = state
        .bookings
        .create_booking(request, principal.user_id)
        .await?;
    Ok(web::Json(view))
}

/// List the authenticated user's bookings.
#[utoipa::path(
    get,
    path = "/api/bookings/my-bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingView]),
        (status = 401, description = "Unauthorized", body = Error),
    ),
    tags = ["bookings"],
    operation_id = "myBookings",
    security(("BearerAuth" = []))
)]
#[get("/bookings/my-bookings")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Vec<BookingView>>> {
    let views = state
        .bookings_query
        .bookings_for_user(principal.user_id)
        .await?;
    Ok(web::Json(views))
}

/// List every booking. Admin only.
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingView]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Forbidden", body = Error),
    ),
    tags = ["bookings"],
    operation_id = "allBookings",
    security(("BearerAuth" = []))
)]
#[get("/bookings")]
pub async fn all_bookings(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Vec<BookingView>>> {
    // The policy gate already requires ADMIN here; re-checking keeps the
    // handler safe even when wired without the middleware stack.
    if !principal.has_any_role(&[UserRole::Admin]) {
        return Err(Error::forbidden("administrator role required"));
    }
    let views = state.bookings_query.all_bookings().await?;
    Ok(web::Json(views))
}

/// Apply a partial update to an owned booking.
#[utoipa::path(
    put,
    path = "/api/bookings/{bookingId}",
    params(("bookingId" = String, Path, description = "Booking identifier")),
    request_body = UpdateBookingBody,
    responses(
        (status = 200, description = "Booking updated", body = BookingView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Not the booking owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Dates conflict or booking is cancelled", body = Error),
    ),
    tags = ["bookings"],
    operation_id = "updateBooking",
    security(("BearerAuth" = []))
)]
#[put("/bookings/{bookingId}")]
pub async fn update_booking(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingBody>,
) -> ApiResult<web::Json<BookingView>> {
    let booking_id = parse_uuid(&path.into_inner(), "bookingId")?;
    let changes = payload.into_inner().into_domain()?;
    let view = state
        .bookings
        .update_booking(booking_id, changes, principal.user_id)
        .await?;
    Ok(web::Json(view))
}

/// Cancel an owned booking.
#[utoipa::path(
    delete,
    path = "/api/bookings/{bookingId}",
    params(("bookingId" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking cancelled", body = CancellationAck),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Not the booking owner", body = Error),
        (status = 404, description = "Not found", body = Error),
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking",
    security(("BearerAuth" = []))
)]
#[delete("/bookings/{bookingId}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<CancellationAck>> {
    let booking_id = parse_uuid(&path.into_inner(), "bookingId")?;
    let ack = state
        .bookings
        .cancel_booking(booking_id, principal.user_id)
        .await?;
    Ok(web::Json(ack))
}
