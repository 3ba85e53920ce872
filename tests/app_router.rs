mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use golink::routes::app_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let state = common::create_test_state();
    let link = state
        .link_service
        .shorten("https://example.com/normalized".to_string())
        .await
        .unwrap();

    let app = app_router(state, "public");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/go/{}/", link.short_code))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/normalized"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = app_router(common::create_test_state(), "public");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no/such/page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prefix_with_trailing_slash_is_empty_code() {
    let app = app_router(common::create_test_state(), "public");

    let response = app
        .oneshot(Request::builder().uri("/go/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}

#[tokio::test]
async fn test_reserved_segments_route_elsewhere_with_empty_prefix() {
    let state = golink::AppState::from_repository(
        std::sync::Arc::new(golink::infrastructure::persistence::MemoryLinkRepository::new()),
        common::test_settings(golink::utils::code_generator::CodeGenerator::default(), 10),
        "",
    );
    let link = state
        .link_service
        .shorten("https://example.com/root".to_string())
        .await
        .unwrap();

    let app = app_router(state, "public");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", link.short_code))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
