//! Customer model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kabelindo_core::{CustomerId, Email};

/// A customer record managed from the back-office.
///
/// Orders denormalize the customer name/email at placement time, so editing
/// a customer never rewrites order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
