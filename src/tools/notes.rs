//! Note tools: search, get, create, update.

use crate::client::{JoplinClient, NoteFields, NOTE_FIELDS};
use crate::error::Result;
use crate::models::{Note, NoteSnippet, TagRef};
use crate::tools::clamp_limit;
use crate::tools::params::{CreateNoteParams, SearchNotesParams, UpdateNoteParams};

/// Assemble a Joplin search query from structured filters.
///
/// Parts join in a fixed order: free text, notebook, tag, todo type,
/// completion. An empty assembly becomes the wildcard `*`.
pub fn build_search_query(
    query: Option<&str>,
    notebook_id: Option<&str>,
    tag_id: Option<&str>,
    is_todo: Option<bool>,
    is_completed: Option<bool>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        parts.push(query.to_string());
    }
    if let Some(notebook_id) = notebook_id.filter(|n| !n.is_empty()) {
        parts.push(format!("notebook:{notebook_id}"));
    }
    if let Some(tag_id) = tag_id.filter(|t| !t.is_empty()) {
        parts.push(format!("tag:{tag_id}"));
    }
    match is_todo {
        Some(true) => parts.push("type:todo".to_string()),
        Some(false) => parts.push("type:note".to_string()),
        None => {}
    }
    match is_completed {
        Some(true) => parts.push("iscompleted:1".to_string()),
        Some(false) => parts.push("iscompleted:0".to_string()),
        None => {}
    }

    if parts.is_empty() {
        "*".to_string()
    } else {
        parts.join(" ")
    }
}

/// Search for notes, returning body-truncated snippets.
pub async fn search_notes(
    client: &JoplinClient,
    params: SearchNotesParams,
) -> Result<Vec<NoteSnippet>> {
    let limit = clamp_limit(params.limit)?;

    let query = match params.raw_query.filter(|q| !q.is_empty()) {
        Some(raw) => raw,
        None => build_search_query(
            params.query.as_deref(),
            params.notebook_id.as_deref(),
            params.tag_id.as_deref(),
            params.is_todo,
            params.is_completed,
        ),
    };

    let results = client.search_notes(&query, limit, NOTE_FIELDS).await?;
    Ok(results.into_iter().map(NoteSnippet::from).collect())
}

/// Get a note by ID with full content and attached tags.
///
/// Two backend round-trips: the note record and its tag list.
pub async fn get_note(client: &JoplinClient, note_id: &str) -> Result<Note> {
    let raw = client.get_note(note_id, NOTE_FIELDS).await?;
    let tags = client.get_note_tags(note_id).await?;
    Ok(Note::from_raw(
        raw,
        tags.into_iter().map(TagRef::from).collect(),
    ))
}

/// Create a note, attach any requested tags, and return the full note.
///
/// Tags attach sequentially in the given order with no rollback: a failure
/// mid-sequence leaves earlier attachments in place and surfaces the error.
pub async fn create_note(client: &JoplinClient, params: CreateNoteParams) -> Result<Note> {
    let fields = NoteFields {
        title: Some(params.title),
        body: Some(params.body),
        notebook_id: params.notebook_id.filter(|n| !n.is_empty()),
        is_todo: Some(i64::from(params.is_todo.unwrap_or(false))),
        todo_completed: None,
    };

    let created = client.create_note(&fields).await?;

    if let Some(tags) = params.tags {
        for tag_id in &tags {
            client.add_tag_to_note(tag_id, &created.id).await?;
        }
    }

    get_note(client, &created.id).await
}

/// Update a note with the provided fields only, then return the full note.
///
/// When no fields are provided, no update call is issued; the note is still
/// re-fetched and returned.
pub async fn update_note(client: &JoplinClient, params: UpdateNoteParams) -> Result<Note> {
    let fields = NoteFields {
        title: params.title,
        body: params.body,
        notebook_id: params.notebook_id,
        is_todo: params.is_todo.map(i64::from),
        todo_completed: params.todo_completed.map(i64::from),
    };

    if !fields.is_empty() {
        client.update_note(&params.note_id, &fields).await?;
    }

    get_note(client, &params.note_id).await
}
