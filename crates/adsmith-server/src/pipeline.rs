//! Ad generation pipeline orchestration.
//!
//! Two entry points, one per acquisition path: [`run_scraped_pipeline`]
//! starts from a product page URL, [`run_manual_pipeline`] from
//! client-supplied fields. Both converge on generate → parse → store.
//! Stages run strictly sequentially; a failed stage aborts the run with no
//! partial record, and nothing here retries.

use adsmith_copywriter::{manual_prompt, parse_generated, scraped_prompt, ManualAdFields};
use adsmith_db::{insert_manual_ad, insert_scraped_ad, NewManualAd, NewScrapedAd};
use adsmith_db::{ManualAdRow, ScrapedAdRow};
use thiserror::Error;

use crate::api::AppState;

/// Errors from a pipeline run, keyed by the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The product page could not be fetched or yielded no usable facts.
    #[error("page acquisition failed: {0}")]
    Acquisition(#[from] adsmith_scraper::ScrapeError),

    /// The generation service call failed.
    #[error("ad generation failed: {0}")]
    Generation(#[from] adsmith_copywriter::CopyError),

    /// The generated ad could not be persisted.
    #[error("storing the ad failed: {0}")]
    Storage(#[from] adsmith_db::DbError),
}

/// Runs the full scraped-ad pipeline for one product page.
///
/// 1. Fetch the page and extract product facts.
/// 2. Look up the audience description for the gender/age bracket.
/// 3. Build the persuasion-formula prompt.
/// 4. Call the generation service (bounded timeout, no retry).
/// 5. Parse the response into headline and ad copy.
/// 6. Store the scraped record and invalidate the listing cache.
///
/// # Errors
///
/// Returns a [`PipelineError`] naming the failed stage; no record is
/// persisted unless every stage succeeded.
pub async fn run_scraped_pipeline(
    state: &AppState,
    url: &str,
    gender: &str,
    age_bracket: &str,
) -> Result<ScrapedAdRow, PipelineError> {
    // Step 1: Acquire product facts from the page.
    tracing::info!(url = %url, "scraped pipeline: extracting product facts");
    let facts = adsmith_scraper::scrape_product(&state.fetcher, url).await?;

    // Step 2 + 3: Audience description and prompt. An unmapped audience
    // yields an empty description, which the template turns into "General".
    let audience = adsmith_core::audience::describe(gender, age_bracket);
    let prompt = scraped_prompt(&facts.name, &facts.description, audience);

    // Step 4 + 5: Generate and parse.
    tracing::info!(url = %url, "scraped pipeline: generating ad copy");
    let raw = state
        .copy
        .generate(
            &prompt,
            state.generation.max_tokens,
            state.generation.temperature,
        )
        .await?;
    let ad_text = parse_generated(&raw);

    // Step 6: Persist and invalidate the listing cache.
    let record = NewScrapedAd {
        product_name: facts.name,
        product_description: facts.description,
        target_description: audience.to_string(),
        product_images: facts.images,
        ad_copy: ad_text.ad_copy,
        headline: ad_text.headline,
        source_url: url.to_string(),
        owner_email: None,
        tags: Vec::new(),
    };
    let row = insert_scraped_ad(&state.pool, &record).await?;
    state.cache.invalidate().await;

    tracing::info!(ad_id = %row.id, url = %url, "scraped pipeline: stored ad");
    Ok(row)
}

/// Runs the manual-ad pipeline for client-supplied product fields.
///
/// 1. Build the prompt from the validated fields.
/// 2. Call the generation service (bounded timeout, no retry).
/// 3. Parse the response into headline and ad copy.
/// 4. Store the manual record and invalidate the listing cache.
///
/// # Errors
///
/// Returns a [`PipelineError`] naming the failed stage; no record is
/// persisted unless every stage succeeded.
pub async fn run_manual_pipeline(
    state: &AppState,
    fields: &ManualAdFields,
    owner_email: &str,
) -> Result<ManualAdRow, PipelineError> {
    // Step 1: Prompt from validated fields.
    let prompt = manual_prompt(fields);

    // Step 2 + 3: Generate and parse.
    tracing::info!(product = %fields.product_name, "manual pipeline: generating ad copy");
    let raw = state
        .copy
        .generate(
            &prompt,
            state.generation.max_tokens,
            state.generation.temperature,
        )
        .await?;
    let ad_text = parse_generated(&raw);

    // Step 4: Persist and invalidate the listing cache.
    let record = NewManualAd {
        brand_name: fields.brand_name.clone(),
        product_name: fields.product_name.clone(),
        product_description: fields.product_description.clone(),
        target_audience: fields.target_audience.clone(),
        unique_selling_points: fields.unique_selling_points.clone(),
        ad_copy: ad_text.ad_copy,
        headline: ad_text.headline,
        owner_email: owner_email.to_string(),
        product_images: Vec::new(),
        tags: Vec::new(),
    };
    let row = insert_manual_ad(&state.pool, &record).await?;
    state.cache.invalidate().await;

    tracing::info!(ad_id = %row.id, "manual pipeline: stored ad");
    Ok(row)
}
