//! Handlers for the ad routes: acquisition, generation, storage, listing,
//! lookup, and feedback.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adsmith_copywriter::ManualAdFields;
use adsmith_db::{
    insert_manual_ad, insert_scraped_ad, AdRecord, DbError, ManualAdRow, NewManualAd, NewScrapedAd,
    ScrapedAdRow,
};
use adsmith_scraper::ScrapeError;

use crate::api::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;
use crate::pipeline::{run_manual_pipeline, run_scraped_pipeline, PipelineError};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

// Required string fields default to "" so a missing key fails the same
// validation as a blank value, with the standard error envelope.

#[derive(Debug, Deserialize)]
pub(in crate::api) struct CreateAdRequest {
    #[serde(default)]
    url: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    age_bracket: String,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct GenerateAdRequest {
    #[serde(default)]
    brand_name: String,
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    product_description: String,
    #[serde(default)]
    target_audience: String,
    #[serde(default)]
    unique_selling_points: String,
    #[serde(default)]
    owner_email: String,
    brand_voice: Option<String>,
    tone: Option<String>,
    goal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct StoreAdRequest {
    #[serde(default)]
    ad_type: String,
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    product_description: String,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    ad_copy: String,
    #[serde(default)]
    product_images: Vec<String>,
    // Manual-only fields.
    #[serde(default)]
    brand_name: String,
    #[serde(default)]
    target_audience: String,
    #[serde(default)]
    unique_selling_points: String,
    #[serde(default)]
    owner_email: String,
    // Scraped-only fields.
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    target_description: String,
    tone: Option<String>,
    goal: Option<String>,
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct FeedbackRequest {
    ad_id: Option<String>,
    rating: Option<i64>,
    comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(in crate::api) struct ManualAdData {
    id: Uuid,
    brand_name: String,
    product_name: String,
    product_description: String,
    target_audience: String,
    unique_selling_points: String,
    ad_copy: String,
    headline: String,
    owner_email: String,
    product_images: Vec<String>,
    tags: Vec<String>,
    feedback_rating: Option<i16>,
    feedback_comment: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct ScrapedAdData {
    id: Uuid,
    product_name: String,
    product_description: String,
    target_description: String,
    product_images: Vec<String>,
    ad_copy: String,
    headline: String,
    source_url: String,
    owner_email: Option<String>,
    tags: Vec<String>,
    feedback_rating: Option<i16>,
    feedback_comment: Option<String>,
    created_at: DateTime<Utc>,
}

/// An ad from either collection, tagged with its variant.
#[derive(Debug, Serialize)]
#[serde(tag = "ad_type", rename_all = "lowercase")]
pub(in crate::api) enum AdRecordData {
    Manual(ManualAdData),
    Scraped(ScrapedAdData),
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct AdListData {
    from_cache: bool,
    ads: Vec<ManualAdData>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct StoreAdData {
    id: Uuid,
}

impl From<ManualAdRow> for ManualAdData {
    fn from(row: ManualAdRow) -> Self {
        Self {
            id: row.id,
            brand_name: row.brand_name,
            product_name: row.product_name,
            product_description: row.product_description,
            target_audience: row.target_audience,
            unique_selling_points: row.unique_selling_points,
            ad_copy: row.ad_copy,
            headline: row.headline,
            owner_email: row.owner_email,
            product_images: row.product_images,
            tags: row.tags,
            feedback_rating: row.feedback_rating,
            feedback_comment: row.feedback_comment,
            created_at: row.created_at,
        }
    }
}

impl From<ScrapedAdRow> for ScrapedAdData {
    fn from(row: ScrapedAdRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            product_description: row.product_description,
            target_description: row.target_description,
            product_images: row.product_images,
            ad_copy: row.ad_copy,
            headline: row.headline,
            source_url: row.source_url,
            owner_email: row.owner_email,
            tags: row.tags,
            feedback_rating: row.feedback_rating,
            feedback_comment: row.feedback_comment,
            created_at: row.created_at,
        }
    }
}

impl From<AdRecord> for AdRecordData {
    fn from(record: AdRecord) -> Self {
        match record {
            AdRecord::Manual(row) => AdRecordData::Manual(row.into()),
            AdRecord::Scraped(row) => AdRecordData::Scraped(row.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn require_field<'a>(request_id: &str, field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("{field} is required"),
        ));
    }
    Ok(trimmed)
}

fn validate_rating(request_id: &str, rating: Option<i64>) -> Result<i16, ApiError> {
    let Some(rating) = rating else {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "rating is required",
        ));
    };
    i16::try_from(rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| {
            ApiError::new(
                request_id,
                "validation_error",
                "rating must be between 1 and 5",
            )
        })
}

fn parse_ad_id(request_id: &str, ad_id: Option<&str>) -> Result<Uuid, ApiError> {
    let Some(ad_id) = ad_id else {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "ad_id is required",
        ));
    };
    Uuid::parse_str(ad_id.trim())
        .map_err(|_| ApiError::new(request_id, "validation_error", "ad_id must be a UUID"))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Topic tags for a client-stored scraped ad: tone, goal, and theme when
/// present, normalized to lowercase, plus the fixed `"scraped"` marker.
fn derive_scraped_tags(tone: Option<&str>, goal: Option<&str>, theme: Option<&str>) -> Vec<String> {
    [tone, goal, theme, Some("scraped")]
        .into_iter()
        .flatten()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn map_pipeline_error(request_id: &str, error: &PipelineError) -> ApiError {
    match error {
        // A URL the fetcher rejects outright is a client mistake, not an
        // upstream failure.
        PipelineError::Acquisition(ScrapeError::InvalidUrl { .. }) => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        PipelineError::Acquisition(_) => {
            tracing::warn!(error = %error, "pipeline: acquisition failed");
            ApiError::new(request_id, "acquisition_failed", error.to_string())
        }
        PipelineError::Generation(_) => {
            tracing::warn!(error = %error, "pipeline: generation failed");
            ApiError::new(request_id, "generation_failed", error.to_string())
        }
        PipelineError::Storage(e) => map_storage_error(request_id, e),
    }
}

fn map_storage_error(request_id: &str, error: &DbError) -> ApiError {
    tracing::error!(error = %error, "storing the ad failed");
    ApiError::new(request_id, "storage_failed", "failed to store the ad")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /api/v1/ads/create`: scrape a product page and generate an ad.
pub(in crate::api) async fn create_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateAdRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScrapedAdData>>), ApiError> {
    let rid = &req_id.0;

    let url = require_field(rid, "url", &body.url)?;

    let row = run_scraped_pipeline(&state, url, body.gender.trim(), body.age_bracket.trim())
        .await
        .map_err(|e| map_pipeline_error(rid, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: ScrapedAdData::from(row),
            meta: ResponseMeta::new(rid.clone()),
        }),
    ))
}

/// `POST /api/v1/ads/generate`: generate an ad from client-supplied fields.
pub(in crate::api) async fn generate_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<GenerateAdRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ManualAdData>>), ApiError> {
    let rid = &req_id.0;

    let brand_name = require_field(rid, "brand_name", &body.brand_name)?;
    let product_name = require_field(rid, "product_name", &body.product_name)?;
    let product_description =
        require_field(rid, "product_description", &body.product_description)?;
    let target_audience = require_field(rid, "target_audience", &body.target_audience)?;
    let unique_selling_points =
        require_field(rid, "unique_selling_points", &body.unique_selling_points)?;
    let owner_email = require_field(rid, "owner_email", &body.owner_email)?;

    let fields = ManualAdFields {
        brand_name: brand_name.to_string(),
        product_name: product_name.to_string(),
        product_description: product_description.to_string(),
        target_audience: target_audience.to_string(),
        unique_selling_points: unique_selling_points.to_string(),
        brand_voice: body.brand_voice.clone(),
        tone: body.tone.clone(),
        goal: body.goal.clone(),
    };

    let row = run_manual_pipeline(&state, &fields, owner_email)
        .await
        .map_err(|e| map_pipeline_error(rid, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: ManualAdData::from(row),
            meta: ResponseMeta::new(rid.clone()),
        }),
    ))
}

/// `POST /api/v1/ads/store`: persist an already-written ad.
///
/// `ad_type` selects the collection and defaults to manual. Scraped stores
/// derive topic tags from the optional tone/goal/theme fields; manual stores
/// carry no tags, matching the records the manual pipeline writes.
pub(in crate::api) async fn store_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<StoreAdRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreAdData>>), ApiError> {
    let rid = &req_id.0;

    let product_name = require_field(rid, "product_name", &body.product_name)?;
    let product_description =
        require_field(rid, "product_description", &body.product_description)?;
    let headline = require_field(rid, "headline", &body.headline)?;
    let ad_copy = require_field(rid, "ad_copy", &body.ad_copy)?;

    let ad_type = body.ad_type.trim();
    let ad_type = if ad_type.is_empty() { "manual" } else { ad_type };

    let id = match ad_type {
        "manual" => {
            let brand_name = require_field(rid, "brand_name", &body.brand_name)?;
            let target_audience = require_field(rid, "target_audience", &body.target_audience)?;
            let unique_selling_points =
                require_field(rid, "unique_selling_points", &body.unique_selling_points)?;
            let owner_email = require_field(rid, "owner_email", &body.owner_email)?;

            let record = NewManualAd {
                brand_name: brand_name.to_string(),
                product_name: product_name.to_string(),
                product_description: product_description.to_string(),
                target_audience: target_audience.to_string(),
                unique_selling_points: unique_selling_points.to_string(),
                ad_copy: ad_copy.to_string(),
                headline: headline.to_string(),
                owner_email: owner_email.to_string(),
                product_images: body.product_images.clone(),
                tags: Vec::new(),
            };
            insert_manual_ad(&state.pool, &record)
                .await
                .map_err(|e| map_storage_error(rid, &e))?
                .id
        }
        "scraped" => {
            let source_url = require_field(rid, "source_url", &body.source_url)?;

            let record = NewScrapedAd {
                product_name: product_name.to_string(),
                product_description: product_description.to_string(),
                target_description: body.target_description.trim().to_string(),
                product_images: body.product_images.clone(),
                ad_copy: ad_copy.to_string(),
                headline: headline.to_string(),
                source_url: source_url.to_string(),
                owner_email: non_blank(&body.owner_email),
                tags: derive_scraped_tags(
                    body.tone.as_deref(),
                    body.goal.as_deref(),
                    body.theme.as_deref(),
                ),
            };
            insert_scraped_ad(&state.pool, &record)
                .await
                .map_err(|e| map_storage_error(rid, &e))?
                .id
        }
        other => {
            return Err(ApiError::new(
                rid,
                "validation_error",
                format!("ad_type must be \"manual\" or \"scraped\", got \"{other}\""),
            ));
        }
    };

    state.cache.invalidate().await;
    tracing::info!(ad_id = %id, ad_type, "stored client-assembled ad");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: StoreAdData { id },
            meta: ResponseMeta::new(rid.clone()),
        }),
    ))
}

/// `GET /api/v1/ads`: all manual ads, newest first, via the listing cache.
pub(in crate::api) async fn list_ads(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<AdListData>>, ApiError> {
    let rid = &req_id.0;
    let now = Instant::now();

    if let Some(rows) = state.cache.get(now).await {
        tracing::debug!(count = rows.len(), "ad listing served from cache");
        return Ok(Json(ApiResponse {
            data: AdListData {
                from_cache: true,
                ads: rows.into_iter().map(ManualAdData::from).collect(),
            },
            meta: ResponseMeta::new(rid.clone()),
        }));
    }

    let rows = adsmith_db::list_manual_ads(&state.pool)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    state.cache.put(now, rows.clone()).await;

    Ok(Json(ApiResponse {
        data: AdListData {
            from_cache: false,
            ads: rows.into_iter().map(ManualAdData::from).collect(),
        },
        meta: ResponseMeta::new(rid.clone()),
    }))
}

/// `GET /api/v1/ads/{id}`: look up one ad, manual collection first.
pub(in crate::api) async fn get_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdRecordData>>, ApiError> {
    let rid = &req_id.0;

    let id = Uuid::parse_str(id.trim())
        .map_err(|_| ApiError::new(rid, "validation_error", "id must be a UUID"))?;

    match adsmith_db::get_ad(&state.pool, id).await {
        Ok(record) => Ok(Json(ApiResponse {
            data: AdRecordData::from(record),
            meta: ResponseMeta::new(rid.clone()),
        })),
        Err(DbError::NotFound) => Err(ApiError::new(
            rid,
            "not_found",
            format!("no ad found with id {id}"),
        )),
        Err(e) => Err(map_db_error(rid.clone(), &e)),
    }
}

/// `POST /api/v1/ads/feedback`: attach a rating (and optional comment) to an
/// ad in either collection.
pub(in crate::api) async fn submit_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<ApiResponse<AdRecordData>>, ApiError> {
    let rid = &req_id.0;

    let ad_id = parse_ad_id(rid, body.ad_id.as_deref())?;
    let rating = validate_rating(rid, body.rating)?;

    match adsmith_db::set_feedback(&state.pool, ad_id, rating, body.comment.as_deref()).await {
        Ok(record) => {
            tracing::info!(ad_id = %ad_id, rating, "feedback recorded");
            Ok(Json(ApiResponse {
                data: AdRecordData::from(record),
                meta: ResponseMeta::new(rid.clone()),
            }))
        }
        Err(DbError::NotFound) => Err(ApiError::new(
            rid,
            "not_found",
            format!("no ad found with id {ad_id}"),
        )),
        Err(e) => Err(map_db_error(rid.clone(), &e)),
    }
}
