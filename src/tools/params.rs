//! Parameter structs for all MCP tools.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool
//! registration; response shapes live in [`crate::models`].

use schemars::JsonSchema;
use serde::Deserialize;

// ── search_notes ──

/// Parameters for the `search_notes` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchNotesParams {
    /// Free-text search query.
    #[schemars(description = "Free-text search query")]
    pub query: Option<String>,
    /// Filter by notebook ID.
    #[schemars(description = "Filter by notebook ID")]
    pub notebook_id: Option<String>,
    /// Filter by tag ID.
    #[schemars(description = "Filter by tag ID")]
    pub tag_id: Option<String>,
    /// Filter for todo items (true) or regular notes (false).
    #[schemars(description = "Filter for todo items (true) or regular notes (false)")]
    pub is_todo: Option<bool>,
    /// Filter for completed (true) or incomplete (false) todos.
    #[schemars(description = "Filter for completed (true) or incomplete (false) todos")]
    pub is_completed: Option<bool>,
    /// Maximum number of results.
    #[schemars(description = "Maximum number of results (default 50, max 100)")]
    pub limit: Option<i64>,
    /// Raw Joplin search query (overrides the other filters).
    #[schemars(description = "Raw Joplin search query (overrides the other filters)")]
    pub raw_query: Option<String>,
}

// ── get_note ──

/// Parameters for the `get_note` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNoteParams {
    /// The note ID.
    #[schemars(description = "The note ID")]
    pub note_id: String,
}

// ── create_note ──

/// Parameters for the `create_note` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    /// Note title.
    #[schemars(description = "Note title")]
    pub title: String,
    /// Note body content (markdown supported).
    #[schemars(description = "Note body content (markdown supported)")]
    pub body: String,
    /// ID of the notebook to create the note in.
    #[schemars(description = "ID of the notebook to create the note in")]
    pub notebook_id: Option<String>,
    /// Whether this is a todo item (default false).
    #[schemars(description = "Whether this is a todo item (default false)")]
    pub is_todo: Option<bool>,
    /// Tag IDs to attach to the note, in order.
    #[schemars(description = "Tag IDs to attach to the note, in order")]
    pub tags: Option<Vec<String>>,
}

// ── update_note ──

/// Parameters for the `update_note` tool. Omitted fields keep current values.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    /// The note ID to update.
    #[schemars(description = "The note ID to update")]
    pub note_id: String,
    /// New title (or omit to keep current).
    #[schemars(description = "New title (or omit to keep current)")]
    pub title: Option<String>,
    /// New body content (or omit to keep current).
    #[schemars(description = "New body content (or omit to keep current)")]
    pub body: Option<String>,
    /// New notebook ID (or omit to keep current).
    #[schemars(description = "New notebook ID (or omit to keep current)")]
    pub notebook_id: Option<String>,
    /// Whether this is a todo item (or omit to keep current).
    #[schemars(description = "Whether this is a todo item (or omit to keep current)")]
    pub is_todo: Option<bool>,
    /// Whether the todo is completed (or omit to keep current).
    #[schemars(description = "Whether the todo is completed (or omit to keep current)")]
    pub todo_completed: Option<bool>,
}

// ── notebooks ──

/// Parameters for the `list_notebooks` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListNotebooksParams {
    /// Maximum number of notebooks to return.
    #[schemars(description = "Maximum number of notebooks to return (default 50, max 100)")]
    pub limit: Option<i64>,
}

/// Parameters for the `get_notebook` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNotebookParams {
    /// The notebook ID.
    #[schemars(description = "The notebook ID")]
    pub notebook_id: String,
}

/// Parameters for the `create_notebook` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateNotebookParams {
    /// Notebook title.
    #[schemars(description = "Notebook title")]
    pub title: String,
    /// ID of the parent notebook (for nested notebooks).
    #[schemars(description = "ID of the parent notebook (for nested notebooks)")]
    pub parent_id: Option<String>,
}

/// Parameters for the `update_notebook` tool. Omitted fields keep current values.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNotebookParams {
    /// The notebook ID to update.
    #[schemars(description = "The notebook ID to update")]
    pub notebook_id: String,
    /// New title (or omit to keep current).
    #[schemars(description = "New title (or omit to keep current)")]
    pub title: Option<String>,
    /// New parent notebook ID (or omit to keep current).
    #[schemars(description = "New parent notebook ID (or omit to keep current)")]
    pub parent_id: Option<String>,
}

// ── tags ──

/// Parameters for the `list_tags` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListTagsParams {
    /// Maximum number of tags to return.
    #[schemars(description = "Maximum number of tags to return (default 50, max 100)")]
    pub limit: Option<i64>,
}

/// Parameters for the `get_tag` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTagParams {
    /// The tag ID.
    #[schemars(description = "The tag ID")]
    pub tag_id: String,
}

/// Parameters for the `create_tag` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTagParams {
    /// Tag title.
    #[schemars(description = "Tag title")]
    pub title: String,
}

/// Parameters for the `add_tag_to_note` and `remove_tag_from_note` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TagNoteParams {
    /// The tag ID.
    #[schemars(description = "The tag ID")]
    pub tag_id: String,
    /// The note ID.
    #[schemars(description = "The note ID")]
    pub note_id: String,
}

// ── resources ──

/// Parameters for the `get_note_resources` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNoteResourcesParams {
    /// The note ID.
    #[schemars(description = "The note ID")]
    pub note_id: String,
}
