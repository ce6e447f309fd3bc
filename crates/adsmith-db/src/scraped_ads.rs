//! Database operations for the `scraped_ads` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `scraped_ads` table.
///
/// `source_url` is set at insert time and never updated; it records where the
/// product facts were extracted from.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScrapedAdRow {
    pub id: Uuid,
    pub product_name: String,
    pub product_description: String,
    pub target_description: String,
    pub product_images: Vec<String>,
    pub ad_copy: String,
    pub headline: String,
    pub source_url: String,
    pub owner_email: Option<String>,
    pub tags: Vec<String>,
    pub feedback_rating: Option<i16>,
    pub feedback_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new `scraped_ads` row.
#[derive(Debug, Clone)]
pub struct NewScrapedAd {
    pub product_name: String,
    pub product_description: String,
    pub target_description: String,
    pub product_images: Vec<String>,
    pub ad_copy: String,
    pub headline: String,
    pub source_url: String,
    pub owner_email: Option<String>,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a new scraped ad and returns the full stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including CHECK violations
/// on empty `ad_copy`/`headline`).
pub async fn insert_scraped_ad(pool: &PgPool, ad: &NewScrapedAd) -> Result<ScrapedAdRow, DbError> {
    let row = sqlx::query_as::<_, ScrapedAdRow>(
        "INSERT INTO scraped_ads \
           (product_name, product_description, target_description, product_images, \
            ad_copy, headline, source_url, owner_email, tags) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id, product_name, product_description, target_description, \
                   product_images, ad_copy, headline, source_url, owner_email, tags, \
                   feedback_rating, feedback_comment, created_at",
    )
    .bind(&ad.product_name)
    .bind(&ad.product_description)
    .bind(&ad.target_description)
    .bind(&ad.product_images)
    .bind(&ad.ad_copy)
    .bind(&ad.headline)
    .bind(&ad.source_url)
    .bind(&ad.owner_email)
    .bind(&ad.tags)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns a single scraped ad by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_scraped_ad(pool: &PgPool, id: Uuid) -> Result<Option<ScrapedAdRow>, DbError> {
    let row = sqlx::query_as::<_, ScrapedAdRow>(
        "SELECT id, product_name, product_description, target_description, \
                product_images, ad_copy, headline, source_url, owner_email, tags, \
                feedback_rating, feedback_comment, created_at \
         FROM scraped_ads \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Sets (or overwrites) the feedback sub-record on a scraped ad.
///
/// Returns the updated row, or `None` if the id does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn set_scraped_feedback(
    pool: &PgPool,
    id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<Option<ScrapedAdRow>, DbError> {
    let row = sqlx::query_as::<_, ScrapedAdRow>(
        "UPDATE scraped_ads \
         SET feedback_rating = $2, feedback_comment = $3 \
         WHERE id = $1 \
         RETURNING id, product_name, product_description, target_description, \
                   product_images, ad_copy, headline, source_url, owner_email, tags, \
                   feedback_rating, feedback_comment, created_at",
    )
    .bind(id)
    .bind(rating)
    .bind(comment)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
