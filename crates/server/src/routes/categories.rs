//! Public category listing endpoint.

use axum::{Json, extract::State};

use crate::db::categories::CategoryRepository;
use crate::error::Result;
use crate::routes::ok;
use crate::state::AppState;

/// GET /api/categories
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(ok(categories))
}
