//! Product category model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kabelindo_core::CategoryId;

/// A product category (e.g. Routers, Switches, Cabling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
