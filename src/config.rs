//! Connection settings for the Joplin Data API.
//!
//! Resolved once at process start from environment variables and passed by
//! reference into the gateway; nothing else reads the environment.

use crate::error::{JoplinError, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 41184;

/// Connection settings for a Joplin instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Joplin API token for authentication.
    pub api_token: String,
    /// Joplin server host.
    pub host: String,
    /// Joplin Web Clipper service port.
    pub port: u16,
}

impl Config {
    /// Resolve configuration from `JOPLIN_API_TOKEN`, `JOPLIN_HOST`, and
    /// `JOPLIN_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_token = lookup("JOPLIN_API_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                JoplinError::config(
                    "JOPLIN_API_TOKEN environment variable is required. \
                     Get your token from Joplin: Tools > Options > Web Clipper",
                )
            })?;

        let host = lookup("JOPLIN_HOST")
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("JOPLIN_PORT").filter(|port| !port.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| {
                JoplinError::config(format!("JOPLIN_PORT must be a valid integer, got: {raw}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_token,
            host,
            port,
        })
    }

    /// Base URL of the Joplin Data API.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
