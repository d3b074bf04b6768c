//! Tag tools: listing, CRUD, and note attachment.

use serde::Serialize;

use crate::client::JoplinClient;
use crate::error::Result;
use crate::models::Tag;
use crate::tools::clamp_limit;

/// Confirmation payload for tag attach/detach operations.
#[derive(Debug, Serialize)]
pub struct TagNoteMessage {
    pub message: String,
}

/// List all tags.
pub async fn list_tags(client: &JoplinClient, limit: Option<i64>) -> Result<Vec<Tag>> {
    let limit = clamp_limit(limit)?;
    let tags = client.get_tags(limit).await?;
    Ok(tags.into_iter().map(Tag::from).collect())
}

/// Get a tag by ID.
pub async fn get_tag(client: &JoplinClient, tag_id: &str) -> Result<Tag> {
    Ok(Tag::from(client.get_tag(tag_id).await?))
}

/// Create a tag and return the fully-populated record.
pub async fn create_tag(client: &JoplinClient, title: &str) -> Result<Tag> {
    Ok(Tag::from(client.create_tag(title).await?))
}

/// Attach a tag to a note. Success is signaled by the absence of an error.
pub async fn add_tag_to_note(
    client: &JoplinClient,
    tag_id: &str,
    note_id: &str,
) -> Result<TagNoteMessage> {
    client.add_tag_to_note(tag_id, note_id).await?;
    Ok(TagNoteMessage {
        message: format!("Tag {tag_id} added to note {note_id}"),
    })
}

/// Detach a tag from a note. Success is signaled by the absence of an error.
pub async fn remove_tag_from_note(
    client: &JoplinClient,
    tag_id: &str,
    note_id: &str,
) -> Result<TagNoteMessage> {
    client.remove_tag_from_note(tag_id, note_id).await?;
    Ok(TagNoteMessage {
        message: format!("Tag {tag_id} removed from note {note_id}"),
    })
}
