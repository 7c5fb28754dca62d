//! Liveness and readiness probes.

use reqwest::StatusCode;
use vitrin_integration_tests::{StubCatalog, browser, start_storefront, unreachable_catalog_url};

#[tokio::test]
async fn test_health_is_ok() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
async fn test_ready_when_catalog_reachable() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");

    assert_eq!(resp.status(), StatusCode::OK);
    // The probe uses a limited request, never the cached full list.
    assert_eq!(catalog.list_requests(), 0);
}

#[tokio::test]
async fn test_not_ready_when_catalog_down() {
    let catalog_url = unreachable_catalog_url().await.expect("Failed to pick a port");
    let base_url = start_storefront(&catalog_url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{base_url}/health"))
        .header("x-request-id", "probe-42")
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(
        resp.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(b"probe-42".as_slice())
    );
}
