//! End-to-end tests of the creation and invocation protocols.
//!
//! Every test drives a `GluServer` over a `RecordingTransport`, so the exact
//! requests sent (and the absence of requests) can be checked.

use glu_client::GluServer;
use glu_client::testing::RecordingTransport;
use glu_core::{ClientConfig, HttpMethod, Value};
use serde_json::json;
use std::sync::Arc;

fn foobar_service(base: &str) -> Value {
    json!({
        "desc": "Foo a bar",
        "uri": format!("{base}/foobar"),
        "params": {
            "text": {"desc": "Some text", "required": true, "type": "string"},
            "num": {"desc": "A number", "required": false, "type": "number", "default": 10},
            "loud": {"desc": "Shout", "required": false, "type": "boolean", "default": false}
        },
        "positional_params": ["num"]
    })
}

fn combiner() -> Value {
    json!({
        "name": "Combiner",
        "desc": "Combines things",
        "doc": "/meta/doc/Combiner",
        "uri": "/code/Combiner",
        "params": {
            "some_number": {"desc": "Some number", "required": true, "type": "number"},
            "label": {"desc": "Label", "required": false, "type": "string", "default": "none"}
        },
        "resource_creation_params": {
            "desc": {"desc": "Description", "required": false, "type": "string", "default": ""},
            "suggested_name": {"desc": "Name", "required": false, "type": "string", "default": ""}
        },
        "services": {"foobar": foobar_service("/code/Combiner")}
    })
}

fn r1() -> Value {
    json!({
        "desc": "First",
        "uri": "/resource/r1",
        "services": {"foobar": foobar_service("/resource/r1")}
    })
}

fn server() -> (GluServer, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let server = GluServer::with_transport(ClientConfig::default(), transport.clone());
    (server, transport)
}

/// A server with `r1` already fetched; the transport queue is empty.
async fn resource_r1() -> (glu_client::Resource, Arc<RecordingTransport>) {
    let (server, transport) = server();
    transport.push_ok(r1());
    let resource = server.resource("r1").await.unwrap();
    (resource, transport)
}

// ============================================================================
// Full scenario
// ============================================================================

#[tokio::test]
async fn test_create_then_invoke() {
    let (server, transport) = server();
    transport
        .push_ok(combiner())
        .push_response(201, json!({"status": "created", "name": "r1"}))
        .push_ok(r1())
        .push_ok(json!("done"));

    let combiner = server.component("Combiner").await.unwrap();
    let mut template = combiner.resource_template();
    template.set("some_number", "3").unwrap().set_suggested_name("r1");
    let resource = template.create_resource().await.unwrap();
    assert_eq!(resource.name(), "r1");
    assert_eq!(resource.uri(), "/resource/r1");

    let mut foobar = resource.service("foobar").unwrap();
    foobar.set("text", "hi").unwrap();
    let result = foobar.access(None).await.unwrap();
    assert_eq!(result.status, 200);
    assert_eq!(result.data, json!("done"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);

    assert_eq!(requests[0].uri, "/code/Combiner");
    assert_eq!(requests[0].method, HttpMethod::Get);

    assert_eq!(requests[1].uri, "/code/Combiner");
    assert_eq!(requests[1].method, HttpMethod::Post);
    let body: Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "params": {"some_number": 3},
            "resource_creation_params": {"suggested_name": "r1"}
        })
    );

    assert_eq!(requests[2].uri, "/resource/r1");
    assert_eq!(requests[2].method, HttpMethod::Get);

    assert_eq!(requests[3].uri, "/resource/r1/foobar?text=hi");
    assert_eq!(requests[3].method, HttpMethod::Get);
    assert!(requests[3].body.is_none());
}

// ============================================================================
// Resource creation
// ============================================================================

#[tokio::test]
async fn test_missing_required_parameter_sends_nothing() {
    let (server, transport) = server();
    transport.push_ok(combiner());
    let combiner = server.component("Combiner").await.unwrap();
    let before = transport.request_count();

    let mut template = combiner.resource_template();
    template.set("label", "x").unwrap();
    let err = template.create_resource().await.unwrap_err();

    assert!(err.is_missing_parameter());
    assert!(err.to_string().contains("some_number"));
    assert_eq!(transport.request_count(), before);
}

#[tokio::test]
async fn test_creation_not_confirmed() {
    let (server, transport) = server();
    transport
        .push_ok(combiner())
        .push_response(400, json!({"status": "error", "message": "bad"}));
    let combiner = server.component("Combiner").await.unwrap();

    let mut template = combiner.resource_template();
    template.set("some_number", 1).unwrap();
    let err = template.create_resource().await.unwrap_err();
    assert!(err.is_resource_creation_error());
    // No fetch after a failed creation.
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_template_set_validates_before_storing() {
    let (server, transport) = server();
    transport.push_ok(combiner());
    let combiner = server.component("Combiner").await.unwrap();
    let mut template = combiner.resource_template();

    assert!(template.set("some_number", "abc").unwrap_err().is_validation_error());
    assert!(template.set("nope", 1).unwrap_err().is_not_found());
    assert!(template.values().is_empty());

    let err = template
        .set_params([("label", json!("ok")), ("some_number", json!("x"))])
        .unwrap_err();
    assert!(err.is_validation_error());
    assert!(template.values().is_empty());

    template
        .set_params([("label", json!("ok")), ("some_number", json!("7"))])
        .unwrap();
    assert_eq!(template.values()["some_number"], json!(7));
}

#[tokio::test]
async fn test_template_passthroughs() {
    let (server, transport) = server();
    transport.push_ok(combiner());
    let combiner = server.component("Combiner").await.unwrap();
    let template = combiner.resource_template();

    assert_eq!(template.parameters().len(), 2);
    assert!(template.parameter("some_number").unwrap().is_required());
    assert_eq!(template.description_param().name(), "desc");
    assert_eq!(template.suggested_name_param().name(), "suggested_name");
}

// ============================================================================
// Service invocation
// ============================================================================

#[tokio::test]
async fn test_access_without_required_parameter_sends_nothing() {
    let (resource, transport) = resource_r1().await;
    let foobar = resource.service("foobar").unwrap();

    let err = foobar.access(None).await.unwrap_err();
    assert!(err.is_missing_parameter());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_method_inference() {
    let (resource, transport) = resource_r1().await;
    transport.push_ok(Value::Null).push_ok(Value::Null);

    let mut plain = resource.service("foobar").unwrap();
    plain.set("text", "a").unwrap();
    plain.access(None).await.unwrap();
    assert_eq!(transport.last_request().unwrap().method, HttpMethod::Get);

    let mut with_body = resource.service("foobar").unwrap();
    with_body.set("text", "a").unwrap().set_input("payload").unwrap();
    with_body.access(None).await.unwrap();
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.body.as_deref(), Some("payload"));

    let err = with_body.access(Some(HttpMethod::Get)).await.unwrap_err();
    assert!(err.is_protocol_error());
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_explicit_methods_without_body() {
    let (resource, transport) = resource_r1().await;
    let mut svc = resource.service("foobar").unwrap();
    svc.set("text", "a").unwrap();

    transport.push_ok(Value::Null);
    svc.access(Some(HttpMethod::Delete)).await.unwrap();
    assert_eq!(transport.last_request().unwrap().method, HttpMethod::Delete);

    for method in [HttpMethod::Options, HttpMethod::Head] {
        assert!(svc.access(Some(method)).await.unwrap_err().is_protocol_error());
    }
    assert_eq!(transport.pending(), 0);
}

#[tokio::test]
async fn test_server_errors_are_returned_raw() {
    let (resource, transport) = resource_r1().await;
    transport.push_response(500, json!({"error": "boom"}));

    let mut svc = resource.service("foobar").unwrap();
    svc.set("text", "a").unwrap();
    let result = svc.access(None).await.unwrap();
    assert_eq!(result.status, 500);
    assert_eq!(result.data["error"], "boom");
}

#[tokio::test]
async fn test_positional_and_query_assembly() {
    let (resource, _transport) = resource_r1().await;

    let mut svc = resource.service("foobar").unwrap();
    svc.set("text", "hello world").unwrap().set("loud", "yes").unwrap();
    assert_eq!(
        svc.request_uri(),
        "/resource/r1/foobar?loud=true&text=hello+world"
    );

    svc.set("num", "3").unwrap();
    assert_eq!(
        svc.request_uri(),
        "/resource/r1/foobar/3?loud=true&text=hello+world"
    );
}

#[tokio::test]
async fn test_service_values_are_stored_as_strings() {
    let (resource, _transport) = resource_r1().await;
    let mut svc = resource.service("foobar").unwrap();
    svc.set_params([("num", json!(12)), ("loud", json!("n"))])
        .unwrap();
    assert_eq!(svc.values()["num"], "12");
    assert_eq!(svc.values()["loud"], "false");

    let err = svc
        .set_params([("text", json!("ok")), ("num", json!("many"))])
        .unwrap_err();
    assert!(err.is_validation_error());
    assert!(!svc.values().contains_key("text"));
}

#[tokio::test]
async fn test_input_can_only_be_set_once() {
    let (resource, _transport) = resource_r1().await;
    let mut svc = resource.service("foobar").unwrap();
    svc.set_input("one").unwrap();
    assert!(svc.set_input("two").unwrap_err().is_protocol_error());
    assert_eq!(svc.input(), Some("one"));
}

#[tokio::test]
async fn test_each_service_handle_starts_empty() {
    let (resource, _transport) = resource_r1().await;
    let mut first = resource.service("foobar").unwrap();
    first.set("text", "a").unwrap();
    let second = resource.service("foobar").unwrap();
    assert!(second.values().is_empty());
}

fn resource_with_service(service: Value) -> Value {
    json!({
        "desc": "First",
        "uri": "/resource/r1",
        "services": {"svc": service}
    })
}

async fn svc_handle(service: Value) -> glu_client::AccessibleService {
    let (server, transport) = server();
    transport.push_ok(resource_with_service(service));
    let resource = server.resource("r1").await.unwrap();
    resource.service("svc").unwrap()
}

#[tokio::test]
async fn test_unset_positional_before_set_one_uses_default() {
    let mut svc = svc_handle(json!({
        "desc": "Two positionals",
        "uri": "/resource/r1/svc",
        "params": {
            "first": {"desc": "First", "required": false, "type": "number", "default": 10},
            "second": {"desc": "Second", "required": false, "type": "string", "default": "z"}
        },
        "positional_params": ["first", "second"]
    }))
    .await;

    svc.set("second", "x").unwrap();
    assert_eq!(svc.request_uri(), "/resource/r1/svc/10/x");

    svc.set("first", 4).unwrap();
    assert_eq!(svc.request_uri(), "/resource/r1/svc/4/x");
}

#[tokio::test]
async fn test_empty_positional_never_leaves_empty_segment() {
    let service = json!({
        "desc": "Empty default",
        "uri": "/resource/r1/svc",
        "params": {
            "a": {"desc": "A", "required": false, "type": "string", "default": ""},
            "b": {"desc": "B", "required": false, "type": "number", "default": 0}
        },
        "positional_params": ["a", "b"]
    });

    let mut defaulted = svc_handle(service.clone()).await;
    defaulted.set("b", 7).unwrap();
    assert_eq!(defaulted.request_uri(), "/resource/r1/svc?b=7");

    let mut explicit = svc_handle(service.clone()).await;
    explicit.set("a", "").unwrap();
    assert_eq!(explicit.request_uri(), "/resource/r1/svc?a=");

    let mut filled = svc_handle(service).await;
    filled.set("a", "x").unwrap().set("b", 7).unwrap();
    assert_eq!(filled.request_uri(), "/resource/r1/svc/x/7");
}

#[tokio::test]
async fn test_created_resource_name_is_encoded_in_fetch() {
    let (server, transport) = server();
    transport
        .push_ok(combiner())
        .push_response(201, json!({"status": "created", "name": "my res"}))
        .push_ok(r1());

    let combiner = server.component("Combiner").await.unwrap();
    let mut template = combiner.resource_template();
    template.set("some_number", 1).unwrap();
    template.create_resource().await.unwrap();

    assert_eq!(transport.requests()[2].uri, "/resource/my%20res");
}
