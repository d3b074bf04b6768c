//! Joplin MCP Server
//!
//! Model Context Protocol server exposing a Joplin instance's notes,
//! notebooks, tags, and attachment metadata as tools for LLM agents.
//! Connects to the Joplin Web Clipper service over HTTP and serves MCP over
//! stdio.

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use joplin_mcp::client::JoplinClient;
use joplin_mcp::config::Config;
use joplin_mcp::server::JoplinMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is the MCP transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("joplin_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        "joplin-mcp starting (stdio transport)"
    );

    let client = JoplinClient::new(&config);
    let server = JoplinMcpServer::new(client);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
