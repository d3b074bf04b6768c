//! Joplin MCP Server library.
//!
//! Provides the [`server::JoplinMcpServer`] MCP server handler, the
//! [`client::JoplinClient`] gateway to the Joplin Data API, and the typed
//! domain models returned by the tools. Used by the `joplin-mcp` binary and
//! available for integration testing.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tools;
