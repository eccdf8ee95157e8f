//! Service booking repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use kabelindo_core::{BookingId, BookingStatus};

use super::RepositoryError;
use crate::models::{ServiceBooking, ServiceType};

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i32,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    service_type: ServiceType,
    scheduled_date: NaiveDate,
    address: String,
    notes: Option<String>,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for ServiceBooking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::new(row.id),
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            service_type: row.service_type,
            scheduled_date: row.scheduled_date,
            address: row.address,
            notes: row.notes,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOOKING_COLUMNS: &str =
    "id, customer_name, customer_email, customer_phone, service_type, scheduled_date, address, \
     notes, status, created_at, updated_at";

/// Fields accepted when creating a service booking.
#[derive(Debug, Clone)]
pub struct BookingInput {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_type: ServiceType,
    pub scheduled_date: NaiveDate,
    pub address: String,
    pub notes: Option<String>,
}

/// Repository for service booking database operations.
pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List bookings, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ServiceBooking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r"
            SELECT {BOOKING_COLUMNS}
            FROM service_booking
            WHERE ($1::booking_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(status)
        .bind(if limit > 0 { limit } else { 50 })
        .bind(offset.max(0))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BookingId) -> Result<Option<ServiceBooking>, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM service_booking WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new booking. New bookings start as `requested`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &BookingInput) -> Result<ServiceBooking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"
            INSERT INTO service_booking (customer_name, customer_email, customer_phone,
                                         service_type, scheduled_date, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOOKING_COLUMNS}
            "
        ))
        .bind(&input.customer_name)
        .bind(&input.customer_email)
        .bind(&input.customer_phone)
        .bind(input.service_type)
        .bind(input.scheduled_date)
        .bind(&input.address)
        .bind(input.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a booking's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the booking doesn't exist.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<ServiceBooking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"
            UPDATE service_booking
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a booking by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the booking was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: BookingId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM service_booking WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_converts_to_model() {
        let now = Utc::now();
        let row = BookingRow {
            id: 7,
            customer_name: "Budi Santoso".to_string(),
            customer_email: "budi@example.com".to_string(),
            customer_phone: "081234567890".to_string(),
            service_type: ServiceType::Installation,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            address: "Jl. Thamrin No. 1, Jakarta Pusat".to_string(),
            notes: None,
            status: BookingStatus::Requested,
            created_at: now,
            updated_at: now,
        };

        let booking: ServiceBooking = row.into();
        assert_eq!(booking.id, BookingId::new(7));
        // Phone is mandatory on bookings and carries through as-is.
        assert_eq!(booking.customer_phone, "081234567890");
        assert_eq!(booking.status, BookingStatus::Requested);
    }
}
