//! Hotel-reservation backend.
//!
//! A hexagonal actix-web service: stateless bearer-token authentication, a
//! static route authorization policy, and a reservation engine enforcing
//! ownership, date, pricing, and overlap invariants. Persistence is an
//! in-memory adapter behind repository ports.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
