//! Service-level JSON-RPC tests.
//!
//! The registry is wired to an unreachable upstream so tool calls exercise
//! the failure path without touching the network for real; everything up
//! to the outbound request behaves exactly as in production.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use lexware_office_mcp::config::Config;
use lexware_office_mcp::lexoffice::LexofficeClient;
use lexware_office_mcp::mcp::rpc::RpcRequest;
use lexware_office_mcp::mcp::service::McpService;
use lexware_office_mcp::mcp::tools::ToolRegistry;

fn test_service() -> McpService {
    let config = Config {
        api_key: "test-key".to_string(),
        // Port 9 (discard) is refused on loopback, so requests fail fast.
        base_url: "http://127.0.0.1:9".to_string(),
        log_file: PathBuf::from("unused.log"),
    };
    let client = Arc::new(LexofficeClient::new(&config));
    McpService::new(ToolRegistry::new(client))
}

fn request(method: &str, params: Value, id: u64) -> RpcRequest {
    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    }))
    .unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let service = test_service();
    let response = service
        .handle_request(request(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "clientInfo": {"name": "test-client", "version": "1.0.0"}
            }),
            1,
        ))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "lexware-office");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_tools_list_contains_all_five_tools() {
    let service = test_service();
    let response = service
        .handle_request(request("tools/list", json!({}), 2))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "get-invoices",
            "get-invoice-details",
            "get-contacts",
            "list-posting-categories",
            "list-countries"
        ]
    );

    // Spot-check declared schemas.
    let invoices = &tools[0];
    assert_eq!(invoices["inputSchema"]["type"], "object");
    assert!(invoices["inputSchema"]["properties"]["status"].is_object());
    assert!(invoices["inputSchema"]["properties"]["page"].is_object());

    let details = &tools[1];
    assert_eq!(details["inputSchema"]["required"][0], "id");

    let contacts = &tools[2];
    for property in ["email", "name", "number", "customer", "vendor", "page", "size"] {
        assert!(
            contacts["inputSchema"]["properties"][property].is_object(),
            "missing contacts property {property}"
        );
    }
}

#[tokio::test]
async fn test_ping() {
    let service = test_service();
    let response = service
        .handle_request(request("ping", json!({}), 3))
        .await
        .unwrap();
    assert_eq!(response.result.unwrap()["ok"], true);
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let service = test_service();
    let raw: RpcRequest = serde_json::from_value(json!({
        "jsonrpc": "1.0",
        "method": "ping",
        "id": 4
    }))
    .unwrap();
    let response = service.handle_request(raw).await.unwrap();
    assert_eq!(response.error.unwrap().code, -32600);
}

#[tokio::test]
async fn test_unknown_method() {
    let service = test_service();
    let response = service
        .handle_request(request("tools/uninstall", json!({}), 5))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_notifications_produce_no_response() {
    let service = test_service();
    let response = service
        .handle_request(request("notifications/initialized", json!({}), 6))
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_empty_resource_and_prompt_lists() {
    let service = test_service();

    let resources = service
        .handle_request(request("resources/list", json!({}), 7))
        .await
        .unwrap();
    assert_eq!(resources.result.unwrap()["resources"], json!([]));

    let prompts = service
        .handle_request(request("prompts/list", json!({}), 8))
        .await
        .unwrap();
    assert_eq!(prompts.result.unwrap()["prompts"], json!([]));
}

#[tokio::test]
async fn test_unknown_tool_is_in_band_failure() {
    let service = test_service();
    let response = service
        .handle_request(request(
            "tools/call",
            json!({"name": "get-quotes", "arguments": {}}),
            9,
        ))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("get-quotes"));
    assert!(text.contains("get-invoices"));
}

#[tokio::test]
async fn test_invalid_uuid_is_rejected_before_any_request() {
    let service = test_service();
    let response = service
        .handle_request(request(
            "tools/call",
            json!({"name": "get-invoice-details", "arguments": {"id": "nope"}}),
            10,
        ))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("not a valid UUID"));
}

#[tokio::test]
async fn test_out_of_range_size_is_rejected() {
    let service = test_service();
    let response = service
        .handle_request(request(
            "tools/call",
            json!({"name": "get-invoices", "arguments": {"size": 0}}),
            11,
        ))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_as_failure_text() {
    let service = test_service();

    let cases = [
        (json!({"name": "get-invoices", "arguments": {}}), "Failed to retrieve invoices"),
        (
            json!({"name": "get-invoice-details", "arguments": {"id": "8f8a33ae-7c41-44a7-a194-2f0a44ea0a25"}}),
            "Failed to retrieve invoice data",
        ),
        (json!({"name": "get-contacts", "arguments": {}}), "Failed to retrieve contacts"),
        (
            json!({"name": "list-posting-categories", "arguments": {"type": "income"}}),
            "Failed to retrieve posting categories",
        ),
        (json!({"name": "list-countries", "arguments": {}}), "Failed to retrieve countries"),
    ];

    for (index, (params, message)) in cases.into_iter().enumerate() {
        let response = service
            .handle_request(request("tools/call", params, 100 + index as u64))
            .await
            .unwrap();
        let result = response.result.expect("tool failures stay in-band");
        assert_eq!(result["isError"], true, "case {index}");
        assert_eq!(result["content"][0]["text"], message, "case {index}");
    }
}
