//! In-memory development backend.
//!
//! Implements the HTTP contract the client relies on, so the client and CLI
//! can run end to end without the hosted service. Schema introspection is not
//! performed; projects stay `pending` until something updates them through
//! [`Store::update_schema_status`](crate::store::Store::update_schema_status).

mod api;
pub mod response;
mod router;

pub use api::api_router;
pub use router::{AppState, create_router};
