//! Domain models for the storefront and back-office.

pub mod booking;
pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod session;
pub mod staff;

pub use booking::{ServiceBooking, ServiceType};
pub use category::Category;
pub use customer::Customer;
pub use order::{Order, OrderItem, OrderWithItems};
pub use product::Product;
pub use session::{CurrentStaff, session_keys};
pub use staff::StaffUser;
