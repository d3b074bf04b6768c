//! # Domain Model
//!
//! Typed value shapes returned to tool callers, plus the conversion functions
//! that normalize raw backend records into them. All entities are constructed
//! fresh from each backend response; nothing is cached or mutated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::{RawNote, RawNotebook, RawResource, RawTag, Timestamp};
use crate::error::JoplinError;

/// Maximum snippet length for search results, in characters.
pub const SNIPPET_CHARS: usize = 500;

/// Normalize a backend timestamp to UTC.
///
/// Epoch-millisecond integers are converted; native date-times pass through.
/// An absent timestamp falls back to the current time, which masks missing
/// backend data, so it is logged rather than applied silently.
#[must_use]
pub fn normalize_time(value: Option<Timestamp>) -> DateTime<Utc> {
    match value {
        Some(Timestamp::DateTime(dt)) => dt,
        Some(Timestamp::Millis(ms)) => {
            DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
        }
        None => {
            tracing::warn!("backend record missing timestamp, substituting current time");
            Utc::now()
        }
    }
}

/// Lightweight tag reference for embedding in note responses.
#[derive(Debug, Clone, Serialize)]
pub struct TagRef {
    pub id: String,
    pub title: String,
}

impl From<RawTag> for TagRef {
    fn from(raw: RawTag) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
        }
    }
}

/// Full tag model.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: String,
    pub title: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl From<RawTag> for Tag {
    fn from(raw: RawTag) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            created_time: normalize_time(raw.created_time),
            updated_time: normalize_time(raw.updated_time),
        }
    }
}

/// Full note with complete body and attached tags.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub notebook_id: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    pub is_todo: bool,
    pub todo_completed: bool,
    pub tags: Vec<TagRef>,
}

impl Note {
    /// Assemble a note from its backend record and separately-fetched tags.
    #[must_use]
    pub fn from_raw(raw: RawNote, tags: Vec<TagRef>) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            notebook_id: raw.parent_id.unwrap_or_default(),
            created_time: normalize_time(raw.created_time),
            updated_time: normalize_time(raw.updated_time),
            is_todo: raw.is_todo.map(|f| f.as_bool()).unwrap_or(false),
            todo_completed: raw.todo_completed.map(|f| f.as_bool()).unwrap_or(false),
            tags,
        }
    }
}

/// Note with truncated body for search results, bounding payload size.
#[derive(Debug, Clone, Serialize)]
pub struct NoteSnippet {
    pub id: String,
    pub title: String,
    pub notebook_id: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    pub is_todo: bool,
    pub todo_completed: bool,
    /// First 500 characters of the note body.
    pub snippet: String,
}

impl From<RawNote> for NoteSnippet {
    fn from(raw: RawNote) -> Self {
        let body = raw.body.unwrap_or_default();
        let snippet = if body.chars().count() > SNIPPET_CHARS {
            body.chars().take(SNIPPET_CHARS).collect()
        } else {
            body
        };
        Self {
            id: raw.id,
            title: raw.title,
            notebook_id: raw.parent_id.unwrap_or_default(),
            created_time: normalize_time(raw.created_time),
            updated_time: normalize_time(raw.updated_time),
            is_todo: raw.is_todo.map(|f| f.as_bool()).unwrap_or(false),
            todo_completed: raw.todo_completed.map(|f| f.as_bool()).unwrap_or(false),
            snippet,
        }
    }
}

/// Notebook model. `parent_id` is `None` for root-level notebooks; the
/// backend serves an empty string for those.
#[derive(Debug, Clone, Serialize)]
pub struct Notebook {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl From<RawNotebook> for Notebook {
    fn from(raw: RawNotebook) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            parent_id: raw.parent_id.filter(|p| !p.is_empty()),
            created_time: normalize_time(raw.created_time),
            updated_time: normalize_time(raw.updated_time),
        }
    }
}

/// Notebook tree node for the hierarchical view. Derived, not persisted;
/// rebuilt on every tree request from the flat notebook list.
#[derive(Debug, Clone, Serialize)]
pub struct NotebookTreeNode {
    pub id: String,
    pub title: String,
    pub children: Vec<NotebookTreeNode>,
}

/// Resource (attachment) metadata model.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub mime: String,
    pub size: i64,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl From<RawResource> for Resource {
    fn from(raw: RawResource) -> Self {
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            filename: raw.filename.unwrap_or_default(),
            mime: raw
                .mime
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size: raw.size.unwrap_or(0),
            created_time: normalize_time(raw.created_time),
            updated_time: normalize_time(raw.updated_time),
        }
    }
}

/// Wire-level error payload returned to tool callers in place of a value.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&JoplinError> for ErrorResponse {
    fn from(error: &JoplinError) -> Self {
        Self {
            category: error.category().to_string(),
            message: error.to_string(),
            detail: error.detail().map(str::to_string),
        }
    }
}
