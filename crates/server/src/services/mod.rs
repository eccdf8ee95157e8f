//! Business logic services.

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService, LoginThrottle};
pub use orders::CheckoutService;
