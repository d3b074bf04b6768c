//! # Backend Gateway
//!
//! [`JoplinClient`] owns the HTTP session to the Joplin Data API and exposes
//! one typed operation per backend resource verb. Every operation funnels
//! faults through a single translation step into the
//! [`crate::error::JoplinError`] taxonomy; classification is purely
//! status/string based since Joplin returns no structured error codes.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{JoplinError, Result};

/// Field set requested for full notes and search results.
pub const NOTE_FIELDS: &str =
    "id,title,body,parent_id,created_time,updated_time,is_todo,todo_completed";

/// Field set requested for notebooks.
pub const NOTEBOOK_FIELDS: &str = "id,title,parent_id,created_time,updated_time";

/// Minimal field set used for notebook tree construction.
pub const NOTEBOOK_TREE_FIELDS: &str = "id,title,parent_id";

/// Field set requested for tags.
pub const TAG_FIELDS: &str = "id,title,created_time,updated_time";

/// Field set requested for resource metadata. Binary content is never fetched.
pub const RESOURCE_FIELDS: &str = "id,title,filename,mime,size,created_time,updated_time";

// ── Wire types ──

/// A timestamp as Joplin serves it: epoch milliseconds from the Data API,
/// or a native date-time string from older export paths.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    DateTime(chrono::DateTime<chrono::Utc>),
}

/// A boolean-ish field. Joplin encodes `is_todo` as 0/1 and `todo_completed`
/// as 0 or a completion timestamp; both coerce by truthiness.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    #[must_use]
    pub fn as_bool(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

/// One page of a Joplin list endpoint response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Create responses are consumed as ID-only; the full record is re-fetched.
#[derive(Debug, Deserialize)]
struct CreatedId {
    id: String,
}

/// A note record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNote {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub created_time: Option<Timestamp>,
    #[serde(default)]
    pub updated_time: Option<Timestamp>,
    #[serde(default)]
    pub is_todo: Option<Flag>,
    #[serde(default)]
    pub todo_completed: Option<Flag>,
}

/// A notebook (folder) record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNotebook {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub created_time: Option<Timestamp>,
    #[serde(default)]
    pub updated_time: Option<Timestamp>,
}

/// A tag record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_time: Option<Timestamp>,
    #[serde(default)]
    pub updated_time: Option<Timestamp>,
}

/// A resource (attachment) metadata record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub created_time: Option<Timestamp>,
    #[serde(default)]
    pub updated_time: Option<Timestamp>,
}

/// Recognized note fields for create/partial-update calls. `None` fields are
/// omitted from the request body, which Joplin reads as "leave unchanged".
#[derive(Debug, Default, Serialize)]
pub struct NoteFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "parent_id", skip_serializing_if = "Option::is_none")]
    pub notebook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_todo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_completed: Option<i64>,
}

impl NoteFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.notebook_id.is_none()
            && self.is_todo.is_none()
            && self.todo_completed.is_none()
    }
}

/// Recognized notebook fields for create/partial-update calls.
#[derive(Debug, Default, Serialize)]
pub struct NotebookFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NotebookFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.parent_id.is_none()
    }
}

// ── Gateway ──

/// Gateway to the Joplin Data API.
///
/// Holds one long-lived `reqwest::Client` for the configured `host:port`;
/// constructed once at process start and shared across all tool invocations.
/// Connection pooling, TLS, and timeouts are the HTTP client's concern.
#[derive(Debug, Clone)]
pub struct JoplinClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    host: String,
    port: u16,
}

impl JoplinClient {
    /// Create a gateway for the configured Joplin instance.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            token: config.api_token.clone(),
            host: config.host.clone(),
            port: config.port,
        }
    }

    // ── Note operations ──

    /// Get a note by ID with the given field set.
    pub async fn get_note(&self, note_id: &str, fields: &str) -> Result<RawNote> {
        let context = format!("note {note_id}");
        self.get_json(
            &format!("notes/{note_id}"),
            &[("fields", fields)],
            &context,
        )
        .await
    }

    /// Search for notes with a Joplin query string.
    pub async fn search_notes(
        &self,
        query: &str,
        limit: u32,
        fields: &str,
    ) -> Result<Vec<RawNote>> {
        let context = format!("search '{query}'");
        let limit = limit.to_string();
        let page: Page<RawNote> = self
            .get_json(
                "search",
                &[("query", query), ("limit", limit.as_str()), ("fields", fields)],
                &context,
            )
            .await?;
        Ok(page.items)
    }

    /// Create a note and return the fully-populated record.
    ///
    /// The create response is consumed as ID-only; the note is re-fetched by
    /// that identifier.
    pub async fn create_note(&self, fields: &NoteFields) -> Result<RawNote> {
        let created: CreatedId = self.post_json("notes", fields, "create note").await?;
        self.get_note(&created.id, NOTE_FIELDS).await
    }

    /// Apply a partial update to a note.
    pub async fn update_note(&self, note_id: &str, fields: &NoteFields) -> Result<()> {
        let context = format!("update note {note_id}");
        self.put_unit(&format!("notes/{note_id}"), fields, &context)
            .await
    }

    /// Get the tags attached to a note.
    pub async fn get_note_tags(&self, note_id: &str) -> Result<Vec<RawTag>> {
        let context = format!("get tags for note {note_id}");
        let page: Page<RawTag> = self
            .get_json(
                &format!("notes/{note_id}/tags"),
                &[("fields", TAG_FIELDS)],
                &context,
            )
            .await?;
        Ok(page.items)
    }

    /// Get resource metadata for a note's attachments.
    pub async fn get_note_resources(&self, note_id: &str) -> Result<Vec<RawResource>> {
        let context = format!("get resources for note {note_id}");
        let page: Page<RawResource> = self
            .get_json(
                &format!("notes/{note_id}/resources"),
                &[("fields", RESOURCE_FIELDS)],
                &context,
            )
            .await?;
        Ok(page.items)
    }

    // ── Notebook operations ──

    /// Get notebooks as a flat list.
    pub async fn get_notebooks(&self, fields: &str, limit: u32) -> Result<Vec<RawNotebook>> {
        let limit = limit.to_string();
        let page: Page<RawNotebook> = self
            .get_json(
                "folders",
                &[("fields", fields), ("limit", limit.as_str())],
                "get notebooks",
            )
            .await?;
        Ok(page.items)
    }

    /// Get a notebook by ID.
    pub async fn get_notebook(&self, notebook_id: &str) -> Result<RawNotebook> {
        let context = format!("notebook {notebook_id}");
        self.get_json(
            &format!("folders/{notebook_id}"),
            &[("fields", NOTEBOOK_FIELDS)],
            &context,
        )
        .await
    }

    /// Create a notebook and return the fully-populated record.
    pub async fn create_notebook(&self, fields: &NotebookFields) -> Result<RawNotebook> {
        let created: CreatedId = self
            .post_json("folders", fields, "create notebook")
            .await?;
        self.get_notebook(&created.id).await
    }

    /// Apply a partial update to a notebook.
    pub async fn update_notebook(&self, notebook_id: &str, fields: &NotebookFields) -> Result<()> {
        let context = format!("update notebook {notebook_id}");
        self.put_unit(&format!("folders/{notebook_id}"), fields, &context)
            .await
    }

    // ── Tag operations ──

    /// Get tags as a flat list.
    pub async fn get_tags(&self, limit: u32) -> Result<Vec<RawTag>> {
        let limit = limit.to_string();
        let page: Page<RawTag> = self
            .get_json(
                "tags",
                &[("fields", TAG_FIELDS), ("limit", limit.as_str())],
                "get tags",
            )
            .await?;
        Ok(page.items)
    }

    /// Get a tag by ID.
    pub async fn get_tag(&self, tag_id: &str) -> Result<RawTag> {
        let context = format!("tag {tag_id}");
        self.get_json(
            &format!("tags/{tag_id}"),
            &[("fields", TAG_FIELDS)],
            &context,
        )
        .await
    }

    /// Create a tag and return the fully-populated record.
    pub async fn create_tag(&self, title: &str) -> Result<RawTag> {
        let context = format!("create tag '{title}'");
        let created: CreatedId = self
            .post_json("tags", &serde_json::json!({ "title": title }), &context)
            .await?;
        self.get_tag(&created.id).await
    }

    /// Attach a tag to a note.
    pub async fn add_tag_to_note(&self, tag_id: &str, note_id: &str) -> Result<()> {
        let context = format!("add tag {tag_id} to note {note_id}");
        let _: serde_json::Value = self
            .post_json(
                &format!("tags/{tag_id}/notes"),
                &serde_json::json!({ "id": note_id }),
                &context,
            )
            .await?;
        Ok(())
    }

    /// Detach a tag from a note.
    pub async fn remove_tag_from_note(&self, tag_id: &str, note_id: &str) -> Result<()> {
        let context = format!("remove tag {tag_id} from note {note_id}");
        let url = self.url(&format!("tags/{tag_id}/notes/{note_id}"));
        let response = self
            .http
            .delete(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| self.translate(e, &context))?;
        self.check(response, &context).await?;
        Ok(())
    }

    // ── Request plumbing ──

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T> {
        tracing::debug!(path, context, "GET");
        let response = self
            .http
            .get(self.url(path))
            .query(&[("token", self.token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| self.translate(e, context))?;
        self.check(response, context)
            .await?
            .json()
            .await
            .map_err(|e| self.translate(e, context))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
        context: &str,
    ) -> Result<T> {
        tracing::debug!(path, context, "POST");
        let response = self
            .http
            .post(self.url(path))
            .query(&[("token", self.token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| self.translate(e, context))?;
        self.check(response, context)
            .await?
            .json()
            .await
            .map_err(|e| self.translate(e, context))
    }

    async fn put_unit(&self, path: &str, body: &impl Serialize, context: &str) -> Result<()> {
        tracing::debug!(path, context, "PUT");
        let response = self
            .http
            .put(self.url(path))
            .query(&[("token", self.token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| self.translate(e, context))?;
        self.check(response, context).await?;
        Ok(())
    }

    /// Classify a non-success HTTP status into the error taxonomy.
    async fn check(&self, response: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let marker = body.to_lowercase();
        let detail = format!("status {status}: {body}");

        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || marker.contains("unauthorized")
        {
            return Err(JoplinError::auth(
                "Authentication failed. Check your JOPLIN_API_TOKEN.",
                detail,
            ));
        }

        if status == StatusCode::NOT_FOUND || marker.contains("not found") {
            return Err(JoplinError::not_found(
                format!("Resource not found: {context}"),
                detail,
            ));
        }

        Err(JoplinError::api(
            format!("Joplin API error: {context}"),
            detail,
        ))
    }

    /// Classify a transport-level failure into the error taxonomy.
    fn translate(&self, error: reqwest::Error, context: &str) -> JoplinError {
        if error.is_connect() || error.is_timeout() {
            return JoplinError::connection(
                format!(
                    "Cannot connect to Joplin at {}:{}. \
                     Is Joplin running with the Web Clipper service enabled?",
                    self.host, self.port
                ),
                error.to_string(),
            );
        }

        let marker = error.to_string().to_lowercase();
        if marker.contains("401") || marker.contains("403") || marker.contains("unauthorized") {
            return JoplinError::auth(
                "Authentication failed. Check your JOPLIN_API_TOKEN.",
                error.to_string(),
            );
        }
        if marker.contains("404") || marker.contains("not found") {
            return JoplinError::not_found(
                format!("Resource not found: {context}"),
                error.to_string(),
            );
        }

        JoplinError::api(format!("Joplin API error: {context}"), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_millis() {
        let ts: Timestamp = serde_json::from_value(serde_json::json!(1700000000000i64)).unwrap();
        assert!(matches!(ts, Timestamp::Millis(1700000000000)));
    }

    #[test]
    fn test_timestamp_from_datetime_string() {
        let ts: Timestamp =
            serde_json::from_value(serde_json::json!("2024-01-15T10:30:00Z")).unwrap();
        assert!(matches!(ts, Timestamp::DateTime(_)));
    }

    #[test]
    fn test_flag_truthiness() {
        let completed: Flag = serde_json::from_value(serde_json::json!(1700000000000i64)).unwrap();
        assert!(completed.as_bool());
        let zero: Flag = serde_json::from_value(serde_json::json!(0)).unwrap();
        assert!(!zero.as_bool());
        let boolean: Flag = serde_json::from_value(serde_json::json!(true)).unwrap();
        assert!(boolean.as_bool());
    }

    #[test]
    fn test_raw_note_tolerates_missing_fields() {
        let raw: RawNote = serde_json::from_value(serde_json::json!({ "id": "n1" })).unwrap();
        assert_eq!(raw.id, "n1");
        assert_eq!(raw.title, "");
        assert!(raw.body.is_none());
        assert!(raw.created_time.is_none());
    }

    #[test]
    fn test_note_fields_partial_serialization() {
        let fields = NoteFields {
            title: Some("T".to_string()),
            is_todo: Some(1),
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, serde_json::json!({ "title": "T", "is_todo": 1 }));
    }

    #[test]
    fn test_note_fields_empty() {
        assert!(NoteFields::default().is_empty());
        assert!(!NoteFields {
            body: Some("B".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_notebook_id_maps_to_parent_id_on_the_wire() {
        let fields = NotebookFields {
            title: None,
            parent_id: Some("p1".to_string()),
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, serde_json::json!({ "parent_id": "p1" }));

        let note = NoteFields {
            notebook_id: Some("p2".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value, serde_json::json!({ "parent_id": "p2" }));
    }

    #[test]
    fn test_page_default_has_more() {
        let page: Page<RawTag> =
            serde_json::from_value(serde_json::json!({ "items": [] })).unwrap();
        assert!(!page.has_more);
        assert!(page.items.is_empty());
    }
}
