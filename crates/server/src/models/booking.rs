//! Service booking model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use kabelindo_core::{BookingId, BookingStatus};

/// Services the shop offers alongside hardware sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Installation,
    Maintenance,
    NetworkSetup,
    Consultation,
}

impl ServiceType {
    /// All offered service types, in display order.
    pub const ALL: [Self; 4] = [
        Self::Installation,
        Self::Maintenance,
        Self::NetworkSetup,
        Self::Consultation,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Installation => "On-site installation",
            Self::Maintenance => "Maintenance visit",
            Self::NetworkSetup => "Network setup & configuration",
            Self::Consultation => "Consultation",
        }
    }
}

/// A customer's request for an on-site service visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBooking {
    pub id: BookingId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_type: ServiceType,
    pub scheduled_date: NaiveDate,
    pub address: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
