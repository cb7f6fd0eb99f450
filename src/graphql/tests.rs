//! Tests for the GraphQL transport

use super::*;
use crate::auth::AccessToken;
use crate::error::Error;
use crate::http::HttpClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphQlClient {
    GraphQlClient::new(HttpClient::new().unwrap(), server.uri())
}

#[test]
fn test_request_serializes_query_and_variables() {
    let request = operations::report_info("crn:1:flexreport/abc");
    let body = serde_json::to_value(&request).unwrap();

    assert!(body["query"].as_str().unwrap().contains("node(id: $id)"));
    assert_eq!(body["variables"]["id"], "crn:1:flexreport/abc");
}

#[test]
fn test_request_default_variables_are_empty_object() {
    let request = GraphQlRequest::new("{ ping }");
    assert_eq!(request.variables, json!({}));
}

#[test]
fn test_check_errors() {
    assert!(check_errors(&json!({"data": {}})).is_ok());
    assert!(check_errors(&json!({"data": {}, "errors": []})).is_ok());

    let err = check_errors(&json!({
        "errors": [{"message": "first"}, {"path": ["x"]}]
    }))
    .unwrap_err();

    match err {
        Error::GraphQl { messages } => {
            assert_eq!(messages, vec!["first".to_string(), "Unknown error".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_value_at() {
    let value = json!({
        "data": {
            "loginAPI": {"accessToken": "tok"},
            "node": null
        }
    });

    assert_eq!(
        value_at(&value, "data.loginAPI.accessToken"),
        Some(&json!("tok"))
    );
    assert_eq!(
        value_at(&value, "$.data.loginAPI.accessToken"),
        Some(&json!("tok"))
    );
    assert_eq!(value_at(&value, "data.node"), None);
    assert_eq!(value_at(&value, "data.node.name"), None);
    assert_eq!(value_at(&value, "data.missing"), None);
    assert_eq!(value_at(&value, "data.loginAPI.accessToken.deeper"), None);
}

#[tokio::test]
async fn test_execute_authenticated_requires_token() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let err = client
        .execute_authenticated(&GraphQlRequest::new("{ ping }"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotAuthenticated));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_authenticated_sends_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer my-token"))
        .and(body_partial_json(json!({"variables": {"id": "r1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"triggerFlexReportExecution": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_token(AccessToken::new("my-token"));
    assert!(client.is_authenticated());

    let response = client
        .execute_authenticated(&operations::trigger_execution("r1"))
        .await
        .unwrap();

    assert_eq!(response["data"]["triggerFlexReportExecution"], true);
}

#[tokio::test]
async fn test_execute_does_not_send_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_token(AccessToken::new("ignored"));

    client.execute(&operations::login("key")).await.unwrap();

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("Authorization").is_none());
}

#[tokio::test]
async fn test_graphql_errors_fail_the_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Report not found"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .execute(&GraphQlRequest::new("{ ping }"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "GraphQL query failed: Report not found");
}
