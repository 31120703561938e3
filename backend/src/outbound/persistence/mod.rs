//! Persistence adapters.
//!
//! Only the in-memory adapter ships; the driven ports are the seam where a
//! relational adapter would slot in.

pub mod memory;

pub use memory::{InMemoryBookingRepository, InMemoryHotelRepository, InMemoryUserRepository};
