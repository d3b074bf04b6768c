//! MCP protocol integration test.
//!
//! Verifies that the server correctly handles the MCP protocol round-trip:
//! tool discovery via `list_tools` and tool invocation via `call_tool`,
//! including the error-payload shape tools return instead of failing.

use rmcp::model::{CallToolRequestParams, ClientInfo};
use rmcp::{ClientHandler, ServiceExt};

use joplin_mcp::client::JoplinClient;
use joplin_mcp::config::Config;
use joplin_mcp::server::JoplinMcpServer;

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

/// A server whose backend address points at a closed port; only tools that
/// reach the backend will see a connection error.
fn test_server() -> JoplinMcpServer {
    let config = Config {
        api_token: "test-token".to_string(),
        host: "127.0.0.1".to_string(),
        port: 1,
    };
    JoplinMcpServer::new(JoplinClient::new(&config))
}

async fn call_tool_text(
    client: &rmcp::service::RunningService<rmcp::RoleClient, DummyClient>,
    name: &str,
    arguments: serde_json::Value,
) -> anyhow::Result<serde_json::Value> {
    let result = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: name.to_string().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        })
        .await?;

    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");

    Ok(serde_json::from_str(text)?)
}

#[tokio::test]
async fn test_list_tools_exposes_all_operations() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let tools = client.list_tools(None).await?;
    let tool_names: Vec<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();

    for expected in [
        "search_notes",
        "get_note",
        "create_note",
        "update_note",
        "list_notebooks",
        "get_notebook",
        "create_notebook",
        "update_notebook",
        "get_notebook_tree",
        "list_tags",
        "get_tag",
        "create_tag",
        "add_tag_to_note",
        "remove_tag_from_note",
        "get_note_resources",
    ] {
        assert!(
            tool_names.contains(&expected),
            "Expected {expected} in tool list, got: {tool_names:?}"
        );
    }
    assert_eq!(tool_names.len(), 15);

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_invalid_limit_returns_validation_error_payload() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    // Rejected before any backend call, so the closed backend port is never hit.
    let payload = call_tool_text(&client, "search_notes", serde_json::json!({ "limit": 0 })).await?;
    assert_eq!(payload["category"], "validation_error");
    assert_eq!(payload["message"], "Invalid input: limit must be at least 1");

    let payload = call_tool_text(&client, "list_tags", serde_json::json!({ "limit": -3 })).await?;
    assert_eq!(payload["category"], "validation_error");

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_returns_connection_error_payload() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let payload =
        call_tool_text(&client, "get_note", serde_json::json!({ "note_id": "abc" })).await?;
    assert_eq!(payload["category"], "connection_error");
    let message = payload["message"].as_str().unwrap();
    assert!(
        message.contains("127.0.0.1:1"),
        "connection error should name the backend address, got: {message}"
    );
    assert!(message.contains("Web Clipper"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}
