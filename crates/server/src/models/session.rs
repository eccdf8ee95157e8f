//! Session-related types for authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use kabelindo_core::{Email, StaffId, StaffRole};

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// User's database ID.
    pub id: StaffId,
    /// Login username.
    pub username: String,
    /// User's email address.
    pub email: Email,
    /// Role/permission level.
    pub role: StaffRole,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_STAFF: &str = "current_staff";
}
