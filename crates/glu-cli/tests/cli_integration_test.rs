//! Integration tests driving the CLI commands against a recording transport.

use glu_cli::commands::common::exit_code_for;
use glu_cli::commands::{call, components, create, delete, describe, resources};
use glu_cli::formatters::format_output;
use glu_client::GluServer;
use glu_client::testing::RecordingTransport;
use glu_core::cli::{ExitCode, OutputFormat, ParamAssignment};
use glu_core::{ClientConfig, HttpMethod, Value};
use serde_json::json;
use std::sync::Arc;

fn server() -> (GluServer, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let server = GluServer::with_transport(ClientConfig::default(), transport.clone());
    (server, transport)
}

fn params(raw: &[&str]) -> Vec<ParamAssignment> {
    raw.iter().map(|p| p.parse().unwrap()).collect()
}

fn counter() -> Value {
    json!({
        "name": "Counter",
        "desc": "Counts things",
        "doc": "/meta/doc/Counter",
        "uri": "/code/Counter",
        "params": {
            "start": {"desc": "Initial value", "required": true, "type": "number"}
        },
        "resource_creation_params": {
            "desc": {"desc": "Description", "required": false, "type": "string", "default": ""},
            "suggested_name": {"desc": "Name", "required": false, "type": "string", "default": ""}
        },
        "services": {
            "add": {
                "desc": "Add to the count",
                "uri": "/code/Counter/add",
                "params": {
                    "amount": {"desc": "How much", "required": true, "type": "number"}
                },
                "positional_params": ["amount"]
            }
        }
    })
}

fn c1() -> Value {
    json!({
        "desc": "My counter",
        "uri": "/resource/c1",
        "services": {
            "add": {
                "desc": "Add to the count",
                "uri": "/resource/c1/add",
                "params": {
                    "amount": {"desc": "How much", "required": true, "type": "number"}
                },
                "positional_params": ["amount"]
            }
        }
    })
}

#[tokio::test]
async fn test_components_listing() {
    let (server, transport) = server();
    transport.push_ok(json!({
        "Counter": {"desc": "Counts things", "uri": "/code/Counter"},
        "Adder": {"desc": "Adds", "uri": "/code/Adder"}
    }));

    let entries = components::list(&server).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Adder");
    assert_eq!(entries[1].desc, "Counts things");

    let text = format_output(&entries, OutputFormat::Text).unwrap();
    assert!(text.contains(r#""uri":"/code/Counter""#));
}

#[tokio::test]
async fn test_resources_listing_rejects_malformed_answer() {
    let (server, transport) = server();
    transport.push_ok(json!(["not", "a", "map"]));

    let err = resources::list(&server).await.unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::SERVER_ERROR);
}

#[tokio::test]
async fn test_describe_with_docs() {
    let (server, transport) = server();
    transport
        .push_ok(counter())
        .push_ok(json!("Counter keeps a running total."));

    let description = describe::describe(&server, "Counter", true).await.unwrap();
    assert_eq!(description.component["name"], "Counter");
    assert_eq!(
        description.component["services"]["add"]["positional_params"],
        json!(["amount"])
    );
    assert_eq!(
        description.docs,
        Some(json!("Counter keeps a running total."))
    );
    assert_eq!(transport.requests()[1].uri, "/meta/doc/Counter");
}

#[tokio::test]
async fn test_describe_without_docs_sends_one_request() {
    let (server, transport) = server();
    transport.push_ok(counter());

    let description = describe::describe(&server, "Counter", false).await.unwrap();
    assert!(description.docs.is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_create_resource() {
    let (server, transport) = server();
    transport
        .push_ok(counter())
        .push_response(201, json!({"status": "created", "name": "c1"}))
        .push_ok(c1());

    let result = create::create(
        &server,
        "Counter",
        Some("c1".to_string()),
        Some("My counter".to_string()),
        params(&["start=5"]),
    )
    .await
    .unwrap();

    assert_eq!(result.name, "c1");
    assert_eq!(result.uri, "/resource/c1");
    assert_eq!(result.services, vec!["add".to_string()]);

    let post = &transport.requests()[1];
    assert_eq!(post.method, HttpMethod::Post);
    let body: Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "params": {"start": 5},
            "resource_creation_params": {"desc": "My counter", "suggested_name": "c1"}
        })
    );
}

#[tokio::test]
async fn test_create_with_bad_value_sends_nothing_more() {
    let (server, transport) = server();
    transport.push_ok(counter());

    let err = create::create(&server, "Counter", None, None, params(&["start=lots"]))
        .await
        .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_create_with_unknown_parameter_is_not_found() {
    let (server, transport) = server();
    transport.push_ok(counter());

    let err = create::create(&server, "Counter", None, None, params(&["colour=red"]))
        .await
        .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::NOT_FOUND);
}

#[tokio::test]
async fn test_call_service_with_positional_parameter() {
    let (server, transport) = server();
    transport.push_ok(c1()).push_ok(json!({"total": 8}));

    let result = call::call(&server, "c1", "add", params(&["amount=3"]), None, None)
        .await
        .unwrap();
    assert_eq!(result.data["total"], 8);

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.uri, "/resource/c1/add/3");
    assert_eq!(sent.method, HttpMethod::Get);
}

#[tokio::test]
async fn test_call_with_input_posts_body() {
    let (server, transport) = server();
    transport.push_ok(c1()).push_ok(Value::Null);

    call::call(
        &server,
        "c1",
        "add",
        params(&["amount=1"]),
        Some("{\"note\": \"x\"}".to_string()),
        None,
    )
    .await
    .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.body.as_deref(), Some("{\"note\": \"x\"}"));
}

#[tokio::test]
async fn test_call_missing_parameter_sends_nothing() {
    let (server, transport) = server();
    transport.push_ok(c1());

    let err = call::call(&server, "c1", "add", Vec::new(), None, None)
        .await
        .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_call_reports_server_status_in_exit_code() {
    let (server, transport) = server();
    transport
        .push_ok(c1())
        .push_response(500, json!({"error": "overflow"}));

    let code = call::run(
        &server,
        "c1",
        "add",
        params(&["amount=1"]),
        None,
        None,
        OutputFormat::Json,
    )
    .await
    .unwrap();
    assert_eq!(code, ExitCode::SERVER_ERROR);
}

#[tokio::test]
async fn test_call_unknown_service() {
    let (server, transport) = server();
    transport.push_ok(c1());

    let err = call::call(&server, "c1", "subtract", Vec::new(), None, None)
        .await
        .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_resource() {
    let (server, transport) = server();
    transport.push_ok(c1()).push_ok(Value::Null);

    let result = delete::delete(&server, "c1").await.unwrap();
    assert!(result.deleted);

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Delete);
    assert_eq!(sent.uri, "/resource/c1");
}

#[tokio::test]
async fn test_delete_missing_resource() {
    let (server, transport) = server();
    transport.push_response(404, json!("no such resource"));

    let err = delete::delete(&server, "gone").await.unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::SERVER_ERROR);
    assert_eq!(transport.request_count(), 1);
}
