//! MCP ServerHandler implementation for Joplin.
//!
//! Registers each tool-layer operation as an externally callable MCP tool:
//!
//! **Notes**
//! - `search_notes` — Search notes with structured filters or a raw query
//! - `get_note` — Get a note with full body and attached tags
//! - `create_note` — Create a note, optionally attaching tags
//! - `update_note` — Partially update a note
//!
//! **Notebooks**
//! - `list_notebooks` — Flat notebook list
//! - `get_notebook` / `create_notebook` / `update_notebook`
//! - `get_notebook_tree` — Hierarchy rebuilt from the flat list
//!
//! **Tags**
//! - `list_tags` / `get_tag` / `create_tag`
//! - `add_tag_to_note` / `remove_tag_from_note`
//!
//! **Resources**
//! - `get_note_resources` — Attachment metadata (no binary content)
//!
//! Every tool returns a JSON value: the domain model on success, or an
//! [`ErrorResponse`] with a category tag on any taxonomy error. Callers
//! always receive a value; failure is distinguished by the error shape. This
//! adapter is the single place taxonomy errors become wire payloads.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde::Serialize;

use crate::client::JoplinClient;
use crate::error::JoplinError;
use crate::models::ErrorResponse;
use crate::tools::params::*;
use crate::tools::{notebooks, notes, resources, tags};

/// Joplin MCP server handler.
#[derive(Debug, Clone)]
pub struct JoplinMcpServer {
    tool_router: ToolRouter<Self>,
    client: Arc<JoplinClient>,
}

impl JoplinMcpServer {
    /// Create a server backed by the given gateway.
    pub fn new(client: JoplinClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: Arc::new(client),
        }
    }
}

/// Serialize a tool result: the domain value on success, an error payload on
/// failure.
///
/// The taxonomy `Result` stays fully qualified here; `#[tool_handler]`
/// expands protocol methods in this module that spell out the std `Result`.
fn respond<T: Serialize>(result: crate::error::Result<T>) -> String {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => json,
            Err(e) => error_response(&JoplinError::api(
                "Failed to serialize response",
                e.to_string(),
            )),
        },
        Err(e) => error_response(&e),
    }
}

fn error_response(error: &JoplinError) -> String {
    serde_json::to_string_pretty(&ErrorResponse::from(error)).unwrap_or_else(|_| {
        r#"{"category":"joplin_error","message":"failed to serialize error response"}"#.to_string()
    })
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for JoplinMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "joplin-mcp".to_string(),
                title: Some("Joplin MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing the Joplin notes API: search, read, create, \
                     and update notes, notebooks, tags, and attachment metadata"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Joplin is a note-taking application. You help users find and manage \
                 their notes, notebooks, and tags.\n\
                 Discovery: search_notes finds notes (body truncated to a 500-character \
                 snippet); get_note fetches the full body and attached tags.\n\
                 Organization: list_notebooks / get_notebook_tree show the notebook \
                 hierarchy; list_tags shows tags. Notes live in notebooks (notebook_id) \
                 and carry tags.\n\
                 Writing: create_note / update_note, create_notebook / update_notebook, \
                 create_tag, add_tag_to_note / remove_tag_from_note. Update tools apply \
                 only the fields you pass; omit a field to keep its current value.\n\
                 Attachments: get_note_resources returns metadata only, never binary \
                 content.\n\
                 Errors come back as a JSON object with 'category' and 'message' fields \
                 instead of a thrown failure; check for that shape."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl JoplinMcpServer {
    // ── Note tools ──

    /// Search for notes with structured filters or a raw Joplin query.
    #[tool(
        name = "search_notes",
        description = "Search for notes. Combine a free-text query with notebook_id, tag_id, is_todo, and is_completed filters, or pass raw_query to use Joplin search syntax directly. Returns note snippets with the body truncated to 500 characters; use get_note for full content."
    )]
    pub async fn search_notes(
        &self,
        Parameters(params): Parameters<SearchNotesParams>,
    ) -> String {
        respond(notes::search_notes(&self.client, params).await)
    }

    /// Get a note by ID with full content and attached tags.
    #[tool(
        name = "get_note",
        description = "Get a note by ID with its full body and attached tags. Use note IDs from search_notes results."
    )]
    pub async fn get_note(&self, Parameters(params): Parameters<GetNoteParams>) -> String {
        respond(notes::get_note(&self.client, &params.note_id).await)
    }

    /// Create a new note, optionally attaching tags.
    #[tool(
        name = "create_note",
        description = "Create a new note with a title and markdown body. Optionally place it in a notebook, mark it as a todo, and attach tag IDs. Returns the created note with its tags."
    )]
    pub async fn create_note(&self, Parameters(params): Parameters<CreateNoteParams>) -> String {
        respond(notes::create_note(&self.client, params).await)
    }

    /// Partially update a note.
    #[tool(
        name = "update_note",
        description = "Update an existing note. Only the fields you pass are changed; omit a field to keep its current value. Returns the full updated note."
    )]
    pub async fn update_note(&self, Parameters(params): Parameters<UpdateNoteParams>) -> String {
        respond(notes::update_note(&self.client, params).await)
    }

    // ── Notebook tools ──

    /// List all notebooks as a flat list.
    #[tool(
        name = "list_notebooks",
        description = "List all notebooks as a flat list with parent_id fields for hierarchy. Use get_notebook_tree for a nested view."
    )]
    pub async fn list_notebooks(
        &self,
        Parameters(params): Parameters<ListNotebooksParams>,
    ) -> String {
        respond(notebooks::list_notebooks(&self.client, params.limit).await)
    }

    /// Get a notebook by ID.
    #[tool(name = "get_notebook", description = "Get a notebook by ID.")]
    pub async fn get_notebook(&self, Parameters(params): Parameters<GetNotebookParams>) -> String {
        respond(notebooks::get_notebook(&self.client, &params.notebook_id).await)
    }

    /// Create a new notebook.
    #[tool(
        name = "create_notebook",
        description = "Create a new notebook. Pass parent_id to nest it under another notebook."
    )]
    pub async fn create_notebook(
        &self,
        Parameters(params): Parameters<CreateNotebookParams>,
    ) -> String {
        respond(notebooks::create_notebook(&self.client, params).await)
    }

    /// Partially update a notebook.
    #[tool(
        name = "update_notebook",
        description = "Update an existing notebook. Only the fields you pass are changed; omit a field to keep its current value."
    )]
    pub async fn update_notebook(
        &self,
        Parameters(params): Parameters<UpdateNotebookParams>,
    ) -> String {
        respond(notebooks::update_notebook(&self.client, params).await)
    }

    /// Get the notebook hierarchy as a tree.
    #[tool(
        name = "get_notebook_tree",
        description = "Get the notebook hierarchy as a nested tree of root notebooks with their children."
    )]
    pub async fn get_notebook_tree(&self) -> String {
        respond(notebooks::get_notebook_tree(&self.client).await)
    }

    // ── Tag tools ──

    /// List all tags.
    #[tool(name = "list_tags", description = "List all tags.")]
    pub async fn list_tags(&self, Parameters(params): Parameters<ListTagsParams>) -> String {
        respond(tags::list_tags(&self.client, params.limit).await)
    }

    /// Get a tag by ID.
    #[tool(name = "get_tag", description = "Get a tag by ID.")]
    pub async fn get_tag(&self, Parameters(params): Parameters<GetTagParams>) -> String {
        respond(tags::get_tag(&self.client, &params.tag_id).await)
    }

    /// Create a new tag.
    #[tool(name = "create_tag", description = "Create a new tag with the given title.")]
    pub async fn create_tag(&self, Parameters(params): Parameters<CreateTagParams>) -> String {
        respond(tags::create_tag(&self.client, &params.title).await)
    }

    /// Attach a tag to a note.
    #[tool(
        name = "add_tag_to_note",
        description = "Attach an existing tag to a note. Returns a confirmation message."
    )]
    pub async fn add_tag_to_note(&self, Parameters(params): Parameters<TagNoteParams>) -> String {
        respond(tags::add_tag_to_note(&self.client, &params.tag_id, &params.note_id).await)
    }

    /// Detach a tag from a note.
    #[tool(
        name = "remove_tag_from_note",
        description = "Detach a tag from a note. Returns a confirmation message."
    )]
    pub async fn remove_tag_from_note(
        &self,
        Parameters(params): Parameters<TagNoteParams>,
    ) -> String {
        respond(tags::remove_tag_from_note(&self.client, &params.tag_id, &params.note_id).await)
    }

    // ── Resource tools ──

    /// Get attachment metadata for a note.
    #[tool(
        name = "get_note_resources",
        description = "Get metadata for a note's attachments (title, filename, MIME type, size). Binary content is never returned."
    )]
    pub async fn get_note_resources(
        &self,
        Parameters(params): Parameters<GetNoteResourcesParams>,
    ) -> String {
        respond(resources::get_note_resources(&self.client, &params.note_id).await)
    }
}
