//! HTTP middleware: sessions, auth extractors, rate limiting, request IDs.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{OptionalStaff, RequireStaff, RequireSuperAdmin};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, create_session_store};
