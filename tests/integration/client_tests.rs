//! Client tests against a mock Firecrawl service

use firecrawl_demo::api::{
    ApiError, CrawlApi, CrawlOptions, CrawlStatus, FirecrawlClient, Format, MapOptions,
    ScrapeOptions,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "fc-test-key";

fn create_client(server: &MockServer) -> FirecrawlClient {
    FirecrawlClient::new(API_KEY, &server.uri())
        .expect("Failed to create client")
        .with_poll_interval(Duration::ZERO)
}

/// Returns the JSON bodies of every request the server received
async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
        .iter()
        .filter(|r| !r.body.is_empty())
        .map(|r| serde_json::from_slice(&r.body).expect("Body is not JSON"))
        .collect()
}

#[tokio::test]
async fn test_scrape_sends_auth_and_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(header("authorization", "Bearer fc-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "markdown": "# Firecrawl",
                "metadata": {
                    "title": "Firecrawl",
                    "sourceURL": "https://firecrawl.dev",
                    "statusCode": 200
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let document = client.scrape_url("firecrawl.dev", None).await.unwrap();

    assert_eq!(document.markdown.as_deref(), Some("# Firecrawl"));
    let metadata = document.metadata.unwrap();
    assert_eq!(metadata.status_code, Some(200));

    // Default options add nothing besides the URL
    assert_eq!(
        received_bodies(&mock_server).await,
        vec![json!({ "url": "firecrawl.dev" })]
    );
}

#[tokio::test]
async fn test_scrape_sends_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "html": "<h1>hi</h1>", "links": ["https://example.com/a"] }
        })))
        .mount(&mock_server)
        .await;

    let options = ScrapeOptions {
        formats: Some(vec![Format::Html, Format::Links]),
        only_main_content: Some(true),
        wait_for: Some(500),
        ..Default::default()
    };

    let client = create_client(&mock_server);
    let document = client
        .scrape_url("https://example.com", Some(&options))
        .await
        .unwrap();

    assert_eq!(document.links.unwrap().len(), 1);
    assert_eq!(
        received_bodies(&mock_server).await,
        vec![json!({
            "url": "https://example.com",
            "formats": ["html", "links"],
            "onlyMainContent": true,
            "waitFor": 500
        })]
    );
}

#[tokio::test]
async fn test_async_crawl_sends_idempotency_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .and(header("x-idempotency-key", "key-123"))
        .and(body_partial_json(json!({
            "url": "mendable.ai",
            "excludePaths": ["blog/*"],
            "maxDepth": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": "job-1",
            "url": "https://api.firecrawl.dev/v1/crawl/job-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = CrawlOptions {
        exclude_paths: Some(vec!["blog/*".to_string()]),
        max_depth: Some(2),
        ..Default::default()
    };

    let client = create_client(&mock_server);
    let job = client
        .async_crawl_url("mendable.ai", Some(&options), Some("key-123"))
        .await
        .unwrap();

    assert_eq!(job.id, "job-1");
}

#[tokio::test]
async fn test_crawl_waits_for_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-1" })),
        )
        .mount(&mock_server)
        .await;

    // First two checks report progress, then the job completes
    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "scraping",
            "total": 3,
            "completed": 1
        })))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 1,
            "completed": 1,
            "creditsUsed": 1,
            "expiresAt": "2026-10-17T12:00:00Z",
            "data": [{ "markdown": "# Mendable" }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.crawl_url("mendable.ai", None, None).await.unwrap();

    assert_eq!(result.status, CrawlStatus::Completed);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.credits_used, 1);
    assert!(result.expires_at.is_some());

    let requests = mock_server.received_requests().await.unwrap();
    let status_checks = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/crawl/job-1")
        .count();
    assert_eq!(status_checks, 3);
}

#[tokio::test]
async fn test_crawl_follows_pagination() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-1" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 3,
            "completed": 3,
            "next": format!("{}/v1/crawl/job-1/page-2", base_url),
            "data": [{ "markdown": "page 1" }, { "markdown": "page 2" }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1/page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 3,
            "completed": 3,
            "data": [{ "markdown": "page 3" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.crawl_url("mendable.ai", None, None).await.unwrap();

    let pages: Vec<_> = result
        .data
        .iter()
        .map(|d| d.markdown.clone().unwrap())
        .collect();
    assert_eq!(pages, vec!["page 1", "page 2", "page 3"]);
    assert!(result.next.is_none());
}

#[tokio::test]
async fn test_crawl_refuses_next_page_on_other_host() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-1" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 2,
            "completed": 2,
            "next": "https://elsewhere.example/v1/crawl/job-1/page-2",
            "data": [{ "markdown": "page 1" }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client.crawl_url("mendable.ai", None, None).await.unwrap_err();

    match err {
        ApiError::ForeignNextPage { url } => {
            assert_eq!(url, "https://elsewhere.example/v1/crawl/job-1/page-2");
        }
        other => panic!("Expected ForeignNextPage, got {:?}", other),
    }

    // Only the submit and the status check reached the service
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_crawl_stops_on_repeated_next_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-1" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 2,
            "completed": 2,
            "next": format!("{}/v1/crawl/job-1/page-2", base_url),
            "data": [{ "markdown": "page 1" }]
        })))
        .mount(&mock_server)
        .await;

    // The second page points back at itself
    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1/page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 2,
            "completed": 2,
            "next": format!("{}/v1/crawl/job-1/page-2", base_url),
            "data": [{ "markdown": "page 2" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.crawl_url("mendable.ai", None, None).await.unwrap();

    let pages: Vec<_> = result
        .data
        .iter()
        .map(|d| d.markdown.clone().unwrap())
        .collect();
    assert_eq!(pages, vec!["page 1", "page 2"]);
    assert!(result.next.is_none());
}

#[tokio::test]
async fn test_crawl_reports_failed_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-9" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "failed" })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client.crawl_url("mendable.ai", None, None).await.unwrap_err();

    match err {
        ApiError::JobFailed { id, status } => {
            assert_eq!(id, "job-9");
            assert_eq!(status, CrawlStatus::Failed);
        }
        other => panic!("Expected JobFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_status_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "success": false,
            "error": "Insufficient credits"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);

    let err = client.scrape_url("firecrawl.dev", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(402));
    assert!(err.to_string().contains("Payment required"));
    assert!(err.to_string().contains("Insufficient credits"));

    let err = client.map_url("https://firecrawl.dev", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(429));
    assert!(err.to_string().contains("slow down"));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "URL is blocked"
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client
        .async_crawl_url("blocked.example", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unsuccessful { ref message, .. } if message == "URL is blocked"));
}

#[tokio::test]
async fn test_map_sends_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .and(body_partial_json(json!({
            "url": "https://firecrawl.dev",
            "search": "blog"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://firecrawl.dev/blog", "https://firecrawl.dev/blog/launch"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = MapOptions {
        search: Some("blog".to_string()),
        ..Default::default()
    };

    let client = create_client(&mock_server);
    let result = client
        .map_url("https://firecrawl.dev", Some(&options))
        .await
        .unwrap();

    assert_eq!(result.links.len(), 2);
}

#[tokio::test]
async fn test_cancel_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/crawl/job-1"))
        .and(header("authorization", "Bearer fc-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cancelled" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let response = client.cancel_crawl("job-1").await.unwrap();

    assert_eq!(response.status, CrawlStatus::Cancelled);
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on port 1
    let client = FirecrawlClient::new(API_KEY, "http://127.0.0.1:1").unwrap();
    let err = client.check_crawl_status("job-1").await.unwrap_err();

    assert!(matches!(err, ApiError::Http { action: "check crawl status", .. }));
}
