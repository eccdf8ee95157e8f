//! Admin category management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use kabelindo_core::CategoryId;

use crate::db::categories::{CategoryInput, CategoryRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::routes::ok;
use crate::state::AppState;

/// Category fields for create and update.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl CategoryBody {
    fn into_input(self) -> Result<CategoryInput> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }

        let slug = self.slug.trim().to_lowercase();
        if slug.is_empty()
            || !slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(AppError::Validation(
                "slug must be lowercase letters, digits, and hyphens".to_owned(),
            ));
        }

        Ok(CategoryInput {
            name: self.name.trim().to_owned(),
            slug,
            description: self.description,
        })
    }
}

/// GET /api/admin/categories
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(ok(categories))
}

/// GET /api/admin/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the category doesn't exist.
pub async fn show(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let category = CategoryRepository::new(state.pool())
        .get(CategoryId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("category not found".to_owned()))?;

    Ok(ok(category))
}

/// POST /api/admin/categories
///
/// # Errors
///
/// Returns `AppError::Validation` for bad fields, `AppError::Conflict` for a
/// duplicate slug.
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let category = CategoryRepository::new(state.pool()).create(&input).await?;

    Ok(ok(category))
}

/// PUT /api/admin/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the category doesn't exist,
/// `AppError::Conflict` for a duplicate slug.
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<serde_json::Value>> {
    let input = body.into_input()?;
    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), &input)
        .await?;

    Ok(ok(category))
}

/// DELETE /api/admin/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the category doesn't exist.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("category not found".to_owned()));
    }

    tracing::info!(category_id = id, by = %staff.username, "Category deleted");

    Ok(ok(serde_json::Value::Null))
}
