//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Public OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::health::healthz,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::signin,
        crate::inbound::http::users::list_users,
        crate::inbound::http::hotels::list_hotels,
        crate::inbound::http::hotels::hotel_details,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::my_bookings,
        crate::inbound::http::bookings::all_bookings,
        crate::inbound::http::bookings::update_booking,
        crate::inbound::http::bookings::cancel_booking,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Accounts and signin"),
        (name = "hotels", description = "Public hotel catalogue"),
        (name = "bookings", description = "Reservations"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
