//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` and depend only on the
//! driving ports, so handler tests can substitute any port implementation
//! without touching persistence.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, HotelCatalogue, IdentityService, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and signin.
    pub identity: Arc<dyn IdentityService>,
    /// Administrative user listing.
    pub users: Arc<dyn UsersQuery>,
    /// Reservation mutations.
    pub bookings: Arc<dyn BookingCommand>,
    /// Reservation reads.
    pub bookings_query: Arc<dyn BookingQuery>,
    /// Public hotel catalogue reads.
    pub catalogue: Arc<dyn HotelCatalogue>,
}
