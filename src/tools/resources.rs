//! Resource tools: attachment metadata only, binary content is never fetched.

use crate::client::JoplinClient;
use crate::error::Result;
use crate::models::Resource;

/// Get resource metadata for a note's attachments.
pub async fn get_note_resources(client: &JoplinClient, note_id: &str) -> Result<Vec<Resource>> {
    let resources = client.get_note_resources(note_id).await?;
    Ok(resources.into_iter().map(Resource::from).collect())
}
