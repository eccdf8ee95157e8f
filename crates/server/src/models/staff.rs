//! Back-office staff user model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kabelindo_core::{Email, StaffId, StaffRole};

/// A back-office staff account. The argon2 password hash never leaves the
/// db layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: StaffId,
    pub username: String,
    pub email: Email,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
