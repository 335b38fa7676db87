//! Tests for listings, lookups, documentation caching and deletion.

use glu_client::GluServer;
use glu_client::testing::RecordingTransport;
use glu_core::{ClientConfig, HttpMethod, HttpRequest};
use serde_json::json;
use std::sync::Arc;

fn server() -> (GluServer, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let server = GluServer::with_transport(ClientConfig::default(), transport.clone());
    (server, transport)
}

fn echo() -> serde_json::Value {
    json!({
        "name": "Echo",
        "desc": "Echoes input",
        "doc": "/meta/doc/Echo",
        "uri": "/code/Echo",
        "params": {},
        "resource_creation_params": {
            "desc": {"desc": "Description", "required": false, "type": "string", "default": ""},
            "suggested_name": {"desc": "Name", "required": false, "type": "string", "default": ""}
        },
        "services": {
            "echo": {"desc": "Echo", "uri": "/code/Echo/echo"}
        }
    })
}

#[tokio::test]
async fn test_list_components_and_resources() {
    let (server, transport) = server();
    transport
        .push_ok(json!({"Echo": {"desc": "Echoes input", "uri": "/code/Echo"}}))
        .push_ok(json!({}));

    let components = server.list_components().await.unwrap();
    assert_eq!(components["Echo"].uri, "/code/Echo");

    let resources = server.list_resources().await.unwrap();
    assert!(resources.is_empty());

    let requests = transport.requests();
    assert_eq!(requests[0].uri, "/code");
    assert_eq!(requests[1].uri, "/resource");
}

#[tokio::test]
async fn test_unknown_component_is_server_error() {
    let (server, transport) = server();
    transport.push_response(404, json!("no such component"));

    let err = server.component("Nope").await.unwrap_err();
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_malformed_component_is_rejected() {
    let (server, transport) = server();
    let mut raw = echo();
    raw.as_object_mut().unwrap().remove("services");
    transport.push_ok(raw);

    let err = server.component("Echo").await.unwrap_err();
    assert!(err.is_malformed_descriptor());
}

#[tokio::test]
async fn test_component_lookups_return_none() {
    let (server, transport) = server();
    transport.push_ok(echo());
    let component = server.component("Echo").await.unwrap();

    assert!(component.get_service("echo").is_some());
    assert!(component.get_service("missing").is_none());
    assert!(component.get_parameter("missing").is_none());
    assert!(component.resource_creation_param("desc").is_some());
    assert!(component.to_string().starts_with("Component: Echo"));
}

#[tokio::test]
async fn test_docs_are_fetched_once() {
    let (server, transport) = server();
    transport
        .push_ok(echo())
        .push_ok(json!("Echo returns whatever it receives."));
    let component = server.component("Echo").await.unwrap();

    let first = component.docs().await.unwrap().clone();
    let second = component.docs().await.unwrap().clone();
    assert_eq!(first, json!("Echo returns whatever it receives."));
    assert_eq!(first, second);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].uri, "/meta/doc/Echo");
}

#[tokio::test]
async fn test_failed_docs_fetch_is_retried() {
    let (server, transport) = server();
    transport
        .push_ok(echo())
        .push_response(500, json!("down"))
        .push_ok(json!("docs"));
    let component = server.component("Echo").await.unwrap();

    assert!(component.docs().await.is_err());
    assert_eq!(component.docs().await.unwrap(), &json!("docs"));
}

#[tokio::test]
async fn test_resource_unknown_service_is_error() {
    let (server, transport) = server();
    transport.push_ok(json!({
        "desc": "Mine",
        "uri": "/resource/mine",
        "services": {"echo": {"desc": "Echo", "uri": "/resource/mine/echo"}}
    }));
    let resource = server.resource("mine").await.unwrap();

    let err = resource.service("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Service 'missing' not defined");
    assert!(resource.to_string().contains("Service: echo"));
}

#[tokio::test]
async fn test_delete_resource() {
    let (server, transport) = server();
    transport
        .push_ok(json!({"desc": "Mine", "uri": "/resource/mine", "services": {}}))
        .push_ok(json!(null));
    let resource = server.resource("mine").await.unwrap();

    resource.delete().await.unwrap();
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Delete);
    assert_eq!(sent.uri, "/resource/mine");
    assert_eq!(sent.expected_status, Some(200));
}

#[tokio::test]
async fn test_delete_requires_200() {
    let (server, transport) = server();
    transport
        .push_ok(json!({"desc": "Mine", "uri": "/resource/mine", "services": {}}))
        .push_response(404, json!("gone"));
    let resource = server.resource("mine").await.unwrap();

    assert!(resource.delete().await.unwrap_err().is_server_error());
}

#[tokio::test]
async fn test_json_send_passes_through() {
    let (server, transport) = server();
    transport.push_response(204, json!(null));

    let result = server
        .json_send(HttpRequest::new(HttpMethod::Put, "/custom").with_body("x"))
        .await
        .unwrap();
    assert_eq!(result.status, 204);
    assert_eq!(transport.last_request().unwrap().body.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_exhausted_transport_is_transport_error() {
    let (server, _transport) = server();
    let err = server.list_components().await.unwrap_err();
    assert!(err.is_transport_error());
}
