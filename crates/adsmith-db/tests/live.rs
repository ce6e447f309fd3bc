//! Live integration tests for adsmith-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/adsmith-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.
//!
//! Requires a reachable Postgres via `DATABASE_URL`. Run with:
//! `cargo test -p adsmith-db --test live -- --ignored`

use adsmith_db::{
    get_ad, insert_manual_ad, insert_scraped_ad, list_manual_ads, set_feedback, AdRecord, DbError,
    NewManualAd, NewScrapedAd,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_manual_ad(product_name: &str) -> NewManualAd {
    NewManualAd {
        brand_name: "Acme".to_string(),
        product_name: product_name.to_string(),
        product_description: "A product people enjoy".to_string(),
        target_audience: "Everyone".to_string(),
        unique_selling_points: "Cheap and cheerful".to_string(),
        ad_copy: "Buy it today.".to_string(),
        headline: "The One to Buy".to_string(),
        owner_email: "owner@acme.test".to_string(),
        product_images: vec!["https://acme.test/p.png".to_string()],
        tags: vec![],
    }
}

fn make_scraped_ad(source_url: &str) -> NewScrapedAd {
    NewScrapedAd {
        product_name: "Comfy Scarf".to_string(),
        product_description: "Soft wool scarf".to_string(),
        target_description: "The ad should emphasize style.".to_string(),
        product_images: vec!["https://example.com/scarf.jpg".to_string()],
        ad_copy: "Wrap up warm this winter.".to_string(),
        headline: "Stay Cozy".to_string(),
        source_url: source_url.to_string(),
        owner_email: None,
        tags: vec!["scraped".to_string()],
    }
}

// ---------------------------------------------------------------------------
// Section 1: Inserts and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn manual_ad_insert_round_trip(pool: sqlx::PgPool) {
    let stored = insert_manual_ad(&pool, &make_manual_ad("Rocket Skates"))
        .await
        .expect("insert_manual_ad failed");

    assert_eq!(stored.product_name, "Rocket Skates");
    assert_eq!(stored.owner_email, "owner@acme.test");
    assert_eq!(stored.product_images.len(), 1);
    assert!(stored.feedback_rating.is_none());
    assert!(stored.feedback_comment.is_none());

    let fetched = get_ad(&pool, stored.id).await.expect("get_ad failed");
    match fetched {
        AdRecord::Manual(row) => assert_eq!(row.id, stored.id),
        AdRecord::Scraped(_) => panic!("manual ad came back as scraped"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn list_manual_ads_returns_newest_first(pool: sqlx::PgPool) {
    insert_manual_ad(&pool, &make_manual_ad("First"))
        .await
        .expect("insert first failed");
    insert_manual_ad(&pool, &make_manual_ad("Second"))
        .await
        .expect("insert second failed");

    let ads = list_manual_ads(&pool).await.expect("list failed");
    assert_eq!(ads.len(), 2);
    assert_eq!(ads[0].product_name, "Second");
    assert_eq!(ads[1].product_name, "First");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn scraped_ad_insert_preserves_source_url(pool: sqlx::PgPool) {
    let stored = insert_scraped_ad(&pool, &make_scraped_ad("https://example.com/product"))
        .await
        .expect("insert_scraped_ad failed");

    assert_eq!(stored.source_url, "https://example.com/product");
    assert_eq!(stored.tags, vec!["scraped".to_string()]);
    assert!(stored.owner_email.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn empty_ad_copy_is_rejected_by_schema(pool: sqlx::PgPool) {
    let mut ad = make_manual_ad("Broken");
    ad.ad_copy = String::new();

    let result = insert_manual_ad(&pool, &ad).await;
    assert!(
        matches!(result, Err(DbError::Sqlx(_))),
        "expected CHECK violation, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Section 2: Cross-collection lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn get_ad_falls_back_to_scraped_collection(pool: sqlx::PgPool) {
    let stored = insert_scraped_ad(&pool, &make_scraped_ad("https://example.com/only-scraped"))
        .await
        .expect("insert_scraped_ad failed");

    // The manual table is checked first and misses; the scraped row must
    // still be found.
    let fetched = get_ad(&pool, stored.id).await.expect("get_ad failed");
    match fetched {
        AdRecord::Scraped(row) => {
            assert_eq!(row.id, stored.id);
            assert_eq!(row.source_url, "https://example.com/only-scraped");
        }
        AdRecord::Manual(_) => panic!("scraped ad came back as manual"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn get_ad_missing_in_both_collections_is_not_found(pool: sqlx::PgPool) {
    let result = get_ad(&pool, uuid::Uuid::new_v4()).await;
    assert!(
        matches!(result, Err(DbError::NotFound)),
        "expected NotFound, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Section 3: Feedback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn set_feedback_reaches_scraped_ads_without_a_variant_hint(pool: sqlx::PgPool) {
    let stored = insert_scraped_ad(&pool, &make_scraped_ad("https://example.com/product"))
        .await
        .expect("insert_scraped_ad failed");

    let updated = set_feedback(&pool, stored.id, 5, Some("great copy"))
        .await
        .expect("set_feedback failed");

    match updated {
        AdRecord::Scraped(row) => {
            assert_eq!(row.feedback_rating, Some(5));
            assert_eq!(row.feedback_comment.as_deref(), Some("great copy"));
        }
        AdRecord::Manual(_) => panic!("feedback landed on the wrong collection"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn set_feedback_overwrites_previous_feedback(pool: sqlx::PgPool) {
    let stored = insert_manual_ad(&pool, &make_manual_ad("Rocket Skates"))
        .await
        .expect("insert_manual_ad failed");

    set_feedback(&pool, stored.id, 2, Some("meh"))
        .await
        .expect("first set_feedback failed");
    let updated = set_feedback(&pool, stored.id, 4, None)
        .await
        .expect("second set_feedback failed");

    match updated {
        AdRecord::Manual(row) => {
            assert_eq!(row.feedback_rating, Some(4));
            assert!(row.feedback_comment.is_none(), "comment should be replaced");
        }
        AdRecord::Scraped(_) => panic!("feedback landed on the wrong collection"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn set_feedback_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let result = set_feedback(&pool, uuid::Uuid::new_v4(), 3, None).await;
    assert!(
        matches!(result, Err(DbError::NotFound)),
        "expected NotFound, got: {result:?}"
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn out_of_range_rating_is_rejected_by_schema(pool: sqlx::PgPool) {
    let stored = insert_manual_ad(&pool, &make_manual_ad("Rocket Skates"))
        .await
        .expect("insert_manual_ad failed");

    let result = set_feedback(&pool, stored.id, 6, None).await;
    assert!(
        matches!(result, Err(DbError::Sqlx(_))),
        "expected CHECK violation, got: {result:?}"
    );
}
