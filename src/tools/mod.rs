//! Tool layer: one module per entity kind.
//!
//! Each operation validates inputs, calls the [`crate::client::JoplinClient`]
//! gateway, and shapes raw records into domain models. Taxonomy errors
//! propagate unmodified to the server adapter, which is the only place they
//! become wire-level error payloads.

pub mod notebooks;
pub mod notes;
pub mod params;
pub mod resources;
pub mod tags;

use crate::error::{JoplinError, Result};

/// Page size ceiling sent to the backend.
pub const MAX_LIMIT: i64 = 100;

/// Default page size when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Validate and clamp a caller-supplied page limit.
///
/// Rejects limits below 1 before any backend call; values above [`MAX_LIMIT`]
/// are clamped rather than rejected.
pub(crate) fn clamp_limit(limit: Option<i64>) -> Result<u32> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 1 {
        return Err(JoplinError::validation("limit must be at least 1"));
    }
    Ok(limit.min(MAX_LIMIT) as u32)
}
