//! Cross-table lookup over the two ad collections.
//!
//! Ad ids are opaque UUIDs; nothing in an id says which table holds it.
//! Reads therefore run a fallback chain: manual first, scraped second,
//! [`DbError::NotFound`] when both miss.

use sqlx::PgPool;
use uuid::Uuid;

use crate::manual_ads::{get_manual_ad, set_manual_feedback, ManualAdRow};
use crate::scraped_ads::{get_scraped_ad, set_scraped_feedback, ScrapedAdRow};
use crate::DbError;

/// A persisted ad from either collection.
#[derive(Debug, Clone)]
pub enum AdRecord {
    Manual(ManualAdRow),
    Scraped(ScrapedAdRow),
}

impl AdRecord {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            AdRecord::Manual(row) => row.id,
            AdRecord::Scraped(row) => row.id,
        }
    }
}

/// Looks up an ad by id in the manual collection, then the scraped collection.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when the id is absent from both tables, or
/// [`DbError::Sqlx`] if either query fails.
pub async fn get_ad(pool: &PgPool, id: Uuid) -> Result<AdRecord, DbError> {
    if let Some(row) = get_manual_ad(pool, id).await? {
        return Ok(AdRecord::Manual(row));
    }
    if let Some(row) = get_scraped_ad(pool, id).await? {
        return Ok(AdRecord::Scraped(row));
    }
    Err(DbError::NotFound)
}

/// Sets the feedback sub-record on whichever collection holds the id.
///
/// Same fallback chain as [`get_ad`]: the manual table is tried first, so a
/// feedback write needs no variant hint from the caller. Returns the updated
/// record.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when the id is absent from both tables, or
/// [`DbError::Sqlx`] if either query fails.
pub async fn set_feedback(
    pool: &PgPool,
    id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<AdRecord, DbError> {
    if let Some(row) = set_manual_feedback(pool, id, rating, comment).await? {
        return Ok(AdRecord::Manual(row));
    }
    if let Some(row) = set_scraped_feedback(pool, id, rating, comment).await? {
        return Ok(AdRecord::Scraped(row));
    }
    Err(DbError::NotFound)
}
