//! Integration tests for the generator client.
//!
//! Every test talks to a wiremock server standing in for the backend.

use serde_json::json;
use std::time::Duration;
use typewriter::{Error, Module, ScenarioClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ScenarioClient {
    ScenarioClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_generate_posts_module_and_decodes_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-scenario"))
        .and(body_json(json!({ "module": "ServiceNow Utilities" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "module_name": "ServiceNow Utilities",
            "problem_statement": "An **import set** fails.",
            "pro_tips": "Check the transform map.",
            "hints": ["Look at coalesce"],
            "guided_steps": ["Open the import set", "Run transform"],
            "theoretical_references": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scenario = client(&server).generate(Module::Utilities).await.unwrap();

    assert_eq!(scenario.module_name.as_deref(), Some("ServiceNow Utilities"));
    assert_eq!(scenario.problem_statement.as_deref(), Some("An **import set** fails."));
    assert_eq!(scenario.hints, Some(vec!["Look at coalesce".to_string()]));
    assert_eq!(scenario.guided_steps.map(|s| s.len()), Some(2));
    assert_eq!(scenario.theoretical_references, None);
}

#[tokio::test]
async fn test_non_array_lists_are_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-scenario"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "module_name": "Security in ServiceNow Platform",
            "hints": "not a list",
            "guided_steps": {}
        })))
        .mount(&server)
        .await;

    let scenario = client(&server).generate(Module::Security).await.unwrap();
    assert_eq!(scenario.hints, None);
    assert_eq!(scenario.guided_steps, None);
}

#[tokio::test]
async fn test_error_field_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-scenario"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "model overloaded"
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate(Module::Overview).await.unwrap_err();
    assert!(matches!(err, Error::Backend(ref m) if m == "model overloaded"));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_status_error_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-scenario"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Invalid module selected"
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate(Module::Reporting).await.unwrap_err();
    match err {
        Error::Server { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid module selected");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_error_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-scenario"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client(&server).generate(Module::DataSchema).await.unwrap_err();
    assert_eq!(err.to_string(), "Server error: 500");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ScenarioClient::new(uri, Duration::from_secs(2)).unwrap();
    let err = client.generate(Module::SelfService).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "active",
            "service": "CSA Scenario Generator"
        })))
        .mount(&server)
        .await;

    let health = client(&server).health().await.unwrap();
    assert_eq!(health.status, "active");
    assert_eq!(health.service, "CSA Scenario Generator");
}
