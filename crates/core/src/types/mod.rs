//! Shared newtype wrappers and enums.

pub mod email;
pub mod id;
pub mod money;
pub mod sku;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::format_rupiah;
pub use sku::{Sku, SkuError};
pub use status::{BookingStatus, OrderStatus, PaymentMethod, PaymentStatus, StaffRole};
