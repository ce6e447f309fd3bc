//! Product page scraping for adsmith.
//!
//! Fetches a product page (optionally through a render gateway so
//! script-built storefronts come back with their DOM settled) and distills
//! it down to the handful of facts ad generation needs: a product name, a
//! description, and the page's images.

pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::{PageFetcher, RenderGateway};
pub use error::ScrapeError;
pub use extract::product_facts;
pub use types::ProductFacts;

/// Fetches `url` and extracts product facts from its HTML.
///
/// # Errors
///
/// Returns any [`ScrapeError`] from the fetch itself, or
/// [`ScrapeError::MissingProductDetails`] when the page yielded neither a
/// product name nor a description. A page missing just one of the two is
/// still usable and is returned as-is.
pub async fn scrape_product(
    fetcher: &PageFetcher,
    url: &str,
) -> Result<ProductFacts, ScrapeError> {
    let html = fetcher.fetch_page(url).await?;
    let facts = extract::product_facts(&html, url);

    if facts.lacks_product_details() {
        return Err(ScrapeError::MissingProductDetails {
            url: url.to_owned(),
        });
    }

    tracing::debug!(
        url = %url,
        name = %facts.name,
        images = facts.images.len(),
        "extracted product facts"
    );

    Ok(facts)
}
