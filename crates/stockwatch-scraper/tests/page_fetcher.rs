//! Integration tests for `PageFetcher` and the extract/evaluate pipeline
//! over fetched HTML, using `wiremock` so no real network traffic is made.

use std::time::Duration;

use stockwatch_core::StockResult;
use stockwatch_scraper::{evaluate, extract, FetchFailure, PageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_PAGE: &str = r"<!DOCTYPE html>
<html>
<head>
<script type='text/javascript'>
window.universal_variable = {
    'page': {'type': 'product'},
    'product': {'id': 'prod122322', 'in_stock': 'TRUE'}
};
</script>
</head>
<body></body>
</html>";

fn test_fetcher(timeout_secs: u64) -> PageFetcher {
    PageFetcher::new(timeout_secs, "stockwatch-test/0.1").expect("failed to build test PageFetcher")
}

#[tokio::test]
async fn fetch_returns_body_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/us/en/truing-stand"))
        .and(header("user-agent", "stockwatch-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_fetcher(5)
        .fetch(&format!("{}/us/en/truing-stand", server.uri()))
        .await
        .expect("fetch should succeed");

    assert!(page.is_ok());
    assert_eq!(page.status, 200);
    assert_eq!(page.body, PRODUCT_PAGE);
}

#[tokio::test]
async fn fetched_page_flows_through_extract_and_evaluate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&server)
        .await;

    let page = test_fetcher(5).fetch(&server.uri()).await.unwrap();
    let tree = extract(&page.body, "window.universal_variable").unwrap();
    assert_eq!(evaluate(&tree), StockResult::InStock);
}

#[tokio::test]
async fn non_200_is_not_a_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let page = test_fetcher(5)
        .fetch(&server.uri())
        .await
        .expect("non-200 should still yield a page");

    assert!(!page.is_ok());
    assert_eq!(page.status, 503);
    assert_eq!(page.body, "<html>busy</html>");
}

#[tokio::test]
async fn relative_url_is_invalid() {
    let result = test_fetcher(5).fetch("/us/en/truing-stand").await;
    assert!(
        matches!(result, Err(FetchFailure::InvalidUrl { .. })),
        "expected InvalidUrl, got: {result:?}"
    );
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PRODUCT_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = test_fetcher(1).fetch(&server.uri()).await;
    assert!(
        matches!(result, Err(FetchFailure::Http(ref e)) if e.is_timeout()),
        "expected timeout, got: {result:?}"
    );
}

#[tokio::test]
async fn unreachable_host_is_http_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let result = test_fetcher(2).fetch(&uri).await;
    assert!(
        matches!(result, Err(FetchFailure::Http(_))),
        "expected Http failure, got: {result:?}"
    );
}
