//! Session-backed cart across requests.

use reqwest::{Client, StatusCode};
use vitrin_integration_tests::{StubCatalog, browser, no_redirect_client, start_storefront};

async fn post_form(client: &Client, url: String, form: &[(&str, &str)], htmx: bool) -> reqwest::Response {
    let mut request = client.post(url).form(form);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    request.send().await.expect("Failed to post form")
}

async fn cart_page(client: &Client, base_url: &str) -> String {
    client
        .get(format!("{base_url}/tr/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("Failed to read body")
}

#[tokio::test]
async fn test_empty_cart() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_without_htmx_redirects_to_cart() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = no_redirect_client().expect("Failed to create HTTP client");

    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/add"),
        &[("product_id", "2")],
        false,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").map(|v| v.as_bytes()),
        Some(b"/tr/cart".as_slice())
    );
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");
    let add_url = format!("{base_url}/tr/cart/add");

    post_form(&client, add_url.clone(), &[("product_id", "2")], false).await;
    post_form(&client, add_url.clone(), &[("product_id", "2")], false).await;
    let resp = post_form(&client, add_url, &[("product_id", "3")], false).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Beacon Smart Speaker"));
    assert!(body.contains("Cobalt USB-C Hub"));
    assert!(body.contains("₺99,00"));
    assert!(body.contains("Items: <strong>3</strong>"));
    assert!(body.contains("Total: <strong>₺123,00</strong>"));

    // Another visitor has their own cart.
    let stranger = browser().expect("Failed to create HTTP client");
    let body = cart_page(&stranger, &base_url).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_htmx_cart_fragments() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    // Add returns the count badge and fires the update event.
    post_form(&client, format!("{base_url}/tr/cart/add"), &[("product_id", "8")], true).await;
    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/add"),
        &[("product_id", "9")],
        true,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("hx-trigger").map(|v| v.as_bytes()),
        Some(b"cart-updated".as_slice())
    );
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("id=\"cart-count\""));
    assert!(body.contains(">2</span>"));

    // Update returns the items fragment.
    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/update"),
        &[("product_id", "9"), ("quantity", "5")],
        true,
    )
    .await;
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with("<div id=\"cart-items\">"));
    assert!(body.contains("Items: <strong>6</strong>"));
    assert!(body.contains("Total: <strong>₺69,99</strong>"));

    // Quantity zero drops the line.
    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/update"),
        &[("product_id", "8"), ("quantity", "0")],
        true,
    )
    .await;
    let body = resp.text().await.expect("Failed to read body");
    assert!(!body.contains("Halo Stud Earrings"));
    assert!(body.contains("Iris Bracelet"));

    let count = client
        .get(format!("{base_url}/tr/cart/count"))
        .send()
        .await
        .expect("Failed to get count")
        .text()
        .await
        .expect("Failed to read body");
    assert!(count.contains(">5</span>"));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    for id in ["1", "4", "10"] {
        post_form(&client, format!("{base_url}/en/cart/add"), &[("product_id", id)], true).await;
    }

    let resp = post_form(
        &client,
        format!("{base_url}/en/cart/remove"),
        &[("product_id", "4")],
        true,
    )
    .await;
    let body = resp.text().await.expect("Failed to read body");
    assert!(!body.contains("Delta Portable SSD"));
    assert!(body.contains("Total: <strong>₺135.98</strong>"));

    let resp = post_form(&client, format!("{base_url}/en/cart/clear"), &[], true).await;
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Your cart is empty."));

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_rejects_unknown_and_malformed_ids() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/add"),
        &[("product_id", "99")],
        true,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/add"),
        &[("product_id", "abc")],
        true,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_oversized_quantity_is_rejected() {
    let catalog = StubCatalog::start().await.expect("Failed to start catalog");
    let base_url = start_storefront(&catalog.url).await.expect("Failed to start storefront");
    let client = browser().expect("Failed to create HTTP client");

    post_form(&client, format!("{base_url}/tr/cart/add"), &[("product_id", "9")], true).await;

    let resp = post_form(
        &client,
        format!("{base_url}/tr/cart/update"),
        &[("product_id", "9"), ("quantity", "5000000000")],
        true,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Items: <strong>1</strong>"));
}
