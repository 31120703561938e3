//! Domain ports.
//!
//! Driving ports are the use-case traits inbound adapters call; driven
//! ports are the repository traits outbound adapters implement. Handlers
//! depend only on driving ports, services only on driven ports, so either
//! side can be substituted in tests.

pub mod booking;
pub mod booking_repository;
pub mod catalogue;
pub mod hotel_repository;
pub mod identity;
pub mod user_repository;

pub use booking::{
    BookingChanges, BookingCommand, BookingQuery, CancellationAck, CreateBookingRequest,
    GuestOverrides,
};
pub use booking_repository::{BookingRepository, BookingStoreError};
pub use catalogue::HotelCatalogue;
pub use hotel_repository::{HotelRepository, HotelStoreError};
pub use identity::{AuthResponse, IdentityService, UsersQuery};
pub use user_repository::{UserRepository, UserStoreError};
