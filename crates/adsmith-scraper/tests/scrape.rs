//! Integration tests for `PageFetcher` and `scrape_product` using wiremock
//! HTTP mocks.

use adsmith_scraper::{scrape_product, PageFetcher, RenderGateway, ScrapeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn direct_fetcher() -> PageFetcher {
    PageFetcher::new(30, "adsmith-test/1.0", 4, None).expect("client construction should not fail")
}

fn gateway_fetcher(endpoint: &str) -> PageFetcher {
    let gateway = RenderGateway {
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
    };
    PageFetcher::new(30, "adsmith-test/1.0", 4, Some(gateway))
        .expect("client construction should not fail")
}

const PRODUCT_PAGE: &str = r#"<html><head>
<meta property="og:title" content="Comfy Scarf" />
<meta property="og:description" content="A soft knit scarf for cold days." />
</head><body>
<img src="/images/scarf.jpg" />
<img src="https://cdn.example.com/scarf-detail.jpg" />
</body></html>"#;

#[tokio::test]
async fn direct_fetch_extracts_product_facts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&server)
        .await;

    let fetcher = direct_fetcher();
    let url = format!("{}/product", server.uri());
    let facts = scrape_product(&fetcher, &url)
        .await
        .expect("should extract product facts");

    assert_eq!(facts.name, "Comfy Scarf");
    assert_eq!(facts.description, "A soft knit scarf for cold days.");
    assert_eq!(facts.images.len(), 2);
    assert_eq!(facts.images[0], format!("{}/images/scarf.jpg", server.uri()));
    assert_eq!(facts.images[1], "https://cdn.example.com/scarf-detail.jpg");
}

#[tokio::test]
async fn gateway_fetch_passes_api_key_target_url_and_render_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("url", "https://shop.example.com/product"))
        .and(query_param("render", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = gateway_fetcher(&server.uri());
    let facts = scrape_product(&fetcher, "https://shop.example.com/product")
        .await
        .expect("should fetch through gateway");

    assert_eq!(facts.name, "Comfy Scarf");
}

#[tokio::test]
async fn relative_images_resolve_against_the_page_url_not_the_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&server)
        .await;

    let fetcher = gateway_fetcher(&server.uri());
    let facts = scrape_product(&fetcher, "https://shop.example.com/product")
        .await
        .expect("should fetch through gateway");

    assert_eq!(facts.images[0], "https://shop.example.com/images/scarf.jpg");
}

#[tokio::test]
async fn non_success_status_is_reported_with_the_page_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = direct_fetcher();
    let url = format!("{}/product", server.uri());
    let result = scrape_product(&fetcher, &url).await;

    match result {
        Err(ScrapeError::UnexpectedStatus { status, url: seen }) => {
            assert_eq!(status, 500);
            assert_eq!(seen, url);
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn blank_body_is_an_empty_body_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   \n  "))
        .mount(&server)
        .await;

    let fetcher = direct_fetcher();
    let url = format!("{}/product", server.uri());
    let result = scrape_product(&fetcher, &url).await;

    assert!(
        matches!(result, Err(ScrapeError::EmptyBody { .. })),
        "expected EmptyBody, got: {result:?}"
    );
}

#[tokio::test]
async fn page_without_name_or_description_is_missing_product_details() {
    let server = MockServer::start().await;

    let bare_page = "<html><head></head><body><p>nothing here</p></body></html>";
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bare_page))
        .mount(&server)
        .await;

    let fetcher = direct_fetcher();
    let url = format!("{}/product", server.uri());
    let result = scrape_product(&fetcher, &url).await;

    assert!(
        matches!(result, Err(ScrapeError::MissingProductDetails { .. })),
        "expected MissingProductDetails, got: {result:?}"
    );
}

#[tokio::test]
async fn page_with_only_a_description_is_still_usable() {
    let server = MockServer::start().await;

    let page = r#"<html><head>
<meta name="description" content="A soft knit scarf." />
</head><body></body></html>"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let fetcher = direct_fetcher();
    let url = format!("{}/product", server.uri());
    let facts = scrape_product(&fetcher, &url)
        .await
        .expect("description alone should be enough");

    assert_eq!(facts.name, "");
    assert_eq!(facts.description, "A soft knit scarf.");
}
