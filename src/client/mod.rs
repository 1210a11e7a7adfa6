mod http;
pub mod paths;

pub use http::{ApiClient, UnauthorizedPolicy};
pub(crate) use http::unwrap_envelope;
