//! Database operations for the `manual_ads` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `manual_ads` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ManualAdRow {
    pub id: Uuid,
    pub brand_name: String,
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub unique_selling_points: String,
    pub ad_copy: String,
    pub headline: String,
    pub owner_email: String,
    pub product_images: Vec<String>,
    pub tags: Vec<String>,
    pub feedback_rating: Option<i16>,
    pub feedback_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new `manual_ads` row.
///
/// `ad_copy` and `headline` must be non-empty; the schema enforces this with
/// a CHECK constraint, and the response parser upstream guarantees it.
#[derive(Debug, Clone)]
pub struct NewManualAd {
    pub brand_name: String,
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub unique_selling_points: String,
    pub ad_copy: String,
    pub headline: String,
    pub owner_email: String,
    pub product_images: Vec<String>,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a new manual ad and returns the full stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including CHECK violations
/// on empty `ad_copy`/`headline`).
pub async fn insert_manual_ad(pool: &PgPool, ad: &NewManualAd) -> Result<ManualAdRow, DbError> {
    let row = sqlx::query_as::<_, ManualAdRow>(
        "INSERT INTO manual_ads \
           (brand_name, product_name, product_description, target_audience, \
            unique_selling_points, ad_copy, headline, owner_email, product_images, tags) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id, brand_name, product_name, product_description, target_audience, \
                   unique_selling_points, ad_copy, headline, owner_email, product_images, \
                   tags, feedback_rating, feedback_comment, created_at",
    )
    .bind(&ad.brand_name)
    .bind(&ad.product_name)
    .bind(&ad.product_description)
    .bind(&ad.target_audience)
    .bind(&ad.unique_selling_points)
    .bind(&ad.ad_copy)
    .bind(&ad.headline)
    .bind(&ad.owner_email)
    .bind(&ad.product_images)
    .bind(&ad.tags)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns all manual ads, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_manual_ads(pool: &PgPool) -> Result<Vec<ManualAdRow>, DbError> {
    let rows = sqlx::query_as::<_, ManualAdRow>(
        "SELECT id, brand_name, product_name, product_description, target_audience, \
                unique_selling_points, ad_copy, headline, owner_email, product_images, \
                tags, feedback_rating, feedback_comment, created_at \
         FROM manual_ads \
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single manual ad by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_manual_ad(pool: &PgPool, id: Uuid) -> Result<Option<ManualAdRow>, DbError> {
    let row = sqlx::query_as::<_, ManualAdRow>(
        "SELECT id, brand_name, product_name, product_description, target_audience, \
                unique_selling_points, ad_copy, headline, owner_email, product_images, \
                tags, feedback_rating, feedback_comment, created_at \
         FROM manual_ads \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Sets (or overwrites) the feedback sub-record on a manual ad.
///
/// Returns the updated row, or `None` if the id does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn set_manual_feedback(
    pool: &PgPool,
    id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<Option<ManualAdRow>, DbError> {
    let row = sqlx::query_as::<_, ManualAdRow>(
        "UPDATE manual_ads \
         SET feedback_rating = $2, feedback_comment = $3 \
         WHERE id = $1 \
         RETURNING id, brand_name, product_name, product_description, target_audience, \
                   unique_selling_points, ad_copy, headline, owner_email, product_images, \
                   tags, feedback_rating, feedback_comment, created_at",
    )
    .bind(id)
    .bind(rating)
    .bind(comment)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
