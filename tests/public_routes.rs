mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use support::{MemoryPostStore, body_to_string, router};

async fn get(store: std::sync::Arc<MemoryPostStore>, uri: &str) -> (StatusCode, String) {
    let response = router(store)
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    (status, body_to_string(response.into_body()).await)
}

#[tokio::test]
async fn post_page_renders_markdown_under_escaped_title() {
    let store = MemoryPostStore::with_posts(&[("hello", "Hello <World>", "# Hi")]).await;

    let (status, body) = get(store, "/posts/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Hi</h1>"), "body: {body}");
    assert!(body.contains("Hello "), "body: {body}");
    assert!(!body.contains("<World>"), "title must be escaped: {body}");
}

#[tokio::test]
async fn raw_html_in_markdown_is_not_sanitized() {
    let store =
        MemoryPostStore::with_posts(&[("raw", "Raw", "<div class=\"callout\">hi</div>\n")]).await;

    let (status, body) = get(store, "/posts/raw").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div class=\"callout\">hi</div>"));
}

#[tokio::test]
async fn missing_post_is_a_404_naming_the_slug() {
    let store = MemoryPostStore::new();

    let (status, body) = get(store, "/posts/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does-not-exist"));
    assert!(body.contains("does not exist."));
}

#[tokio::test]
async fn index_lists_posts_in_insertion_order() {
    let store = MemoryPostStore::with_posts(&[
        ("zebra", "Zebra", "z"),
        ("apple", "Apple", "a"),
    ])
    .await;

    let (status, body) = get(store, "/posts").await;

    assert_eq!(status, StatusCode::OK);
    let zebra = body.find("/posts/zebra").expect("zebra link");
    let apple = body.find("/posts/apple").expect("apple link");
    assert!(zebra < apple);
}

#[tokio::test]
async fn empty_index_shows_placeholder() {
    let (status, body) = get(MemoryPostStore::new(), "/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No posts yet."));
}

#[tokio::test]
async fn store_failure_renders_error_boundary() {
    let store = MemoryPostStore::new();
    store.set_unavailable();

    let (status, body) = get(store, "/posts/hello").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Oh no, something went wrong!"));
    assert!(body.contains("Database timeout"));
}

#[tokio::test]
async fn unknown_routes_fall_back_to_404() {
    let (status, body) = get(MemoryPostStore::new(), "/nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn health_reports_store_state() {
    let store = MemoryPostStore::new();
    let (status, _) = get(store.clone(), "/_health/db").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    store.set_unavailable();
    let (status, _) = get(store, "/_health/db").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
