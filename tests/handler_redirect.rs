mod common;

use axum::http::{StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_redirect_to_stored_url() {
    let server = common::create_test_server(common::create_test_state());
    let url = "https://example.com/some/long/path?x=1";

    let code = common::shorten(&server, url).await;

    let response = server.get(&format!("/go/{}", code)).await;

    response.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.header(header::LOCATION), url);
}

#[tokio::test]
async fn test_redirect_is_repeatable() {
    let server = common::create_test_server(common::create_test_state());
    let code = common::shorten(&server, "https://example.com/page").await;

    let first = server.get(&format!("/go/{}", code)).await;
    let second = server.get(&format!("/go/{}", code)).await;

    assert_eq!(first.status_code(), second.status_code());
    assert_eq!(
        first.header(header::LOCATION),
        second.header(header::LOCATION)
    );
}

#[tokio::test]
async fn test_redirect_uses_short_url_from_response() {
    let server = common::create_test_server(common::create_test_state());

    let body = server
        .post("/shorten")
        .json(&json!({ "longUrl": "https://example.com/round-trip" }))
        .await
        .json::<serde_json::Value>();

    let short_url = body["shortUrl"].as_str().unwrap();
    let path = short_url.strip_prefix("http://localhost:8080").unwrap();

    let response = server.get(path).await;

    response.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/round-trip"
    );
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/go/zzzzzz").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/go/bad.code").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "invalid_input"
    );
}

#[tokio::test]
async fn test_redirect_empty_code() {
    let server = common::create_test_server(common::create_test_state());

    for path in ["/go", "/go/"] {
        let response = server.get(path).await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "invalid_input", "path: {path}");
        assert_eq!(body["error"]["message"], "Short code must not be empty");
    }
}

#[tokio::test]
async fn test_redirect_non_utf8_code() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/go/%FF").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "invalid_input"
    );
}

#[tokio::test]
async fn test_unknown_path_gets_structured_not_found() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/no/such/page").await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["details"]["path"], "/no/such/page");
}
