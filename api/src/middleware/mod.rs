pub mod auth;
pub mod cors;
pub mod request_id;

pub use auth::{AuthGate, CurrentUser, IdentityResolverWrapper};
pub use cors::create_cors;
pub use request_id::{RequestIdHeader, RequestIdRootSpan, REQUEST_ID_HEADER};
