#![allow(dead_code)]

use axum_test::TestServer;
use golink::application::services::LinkSettings;
use golink::infrastructure::persistence::MemoryLinkRepository;
use golink::routes::router;
use golink::state::AppState;
use golink::utils::code_generator::CodeGenerator;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:8080/go";

pub fn test_settings(generator: CodeGenerator, max_attempts: u32) -> LinkSettings {
    LinkSettings {
        generator,
        max_attempts,
        short_url_base: BASE_URL.to_string(),
    }
}

/// State over an empty in-memory store with the default generator.
pub fn create_test_state() -> AppState {
    create_test_state_with(CodeGenerator::default(), 10)
}

pub fn create_test_state_with(generator: CodeGenerator, max_attempts: u32) -> AppState {
    AppState::from_repository(
        Arc::new(MemoryLinkRepository::new()),
        test_settings(generator, max_attempts),
        "/go",
    )
}

/// Full application router over the given state.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state, "public")).unwrap()
}

/// Creates a link through the API and returns its short code.
pub async fn shorten(server: &TestServer, long_url: &str) -> String {
    let response = server
        .post("/shorten")
        .json(&serde_json::json!({ "longUrl": long_url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string()
}
