//! Admin API handlers. Every handler requires a staff session via the
//! [`crate::middleware::RequireStaff`] extractor; staff management is
//! restricted further to super admins.

pub mod bookings;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod staff;
