mod blob;
mod logging;
mod metadata;
mod server;

#[cfg(test)]
mod tests;

pub use blob::*;
pub use logging::*;
pub use metadata::*;
pub use server::*;

use serde::Deserialize;

/// Environment variable consulted when `[blob] api_key` is not set.
pub const APPWRITE_API_KEY_ENV: &str = "FILEDOCK_APPWRITE_API_KEY";

/// Environment variable consulted when `[metadata] url` is not set.
pub const DATABASE_URL_ENV: &str = "FILEDOCK_DATABASE_URL";

/// Top-level configuration for the filedock server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct FiledockConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object store configuration.
    #[serde(default)]
    pub blob: BlobConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Static frontend configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

impl FiledockConfig {
    /// Fill secrets missing from the file from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Fill secrets missing from the file using `lookup`. Values already
    /// present in the file win.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.blob.api_key.is_none() {
            self.blob.api_key = lookup(APPWRITE_API_KEY_ENV).filter(|v| !v.is_empty());
        }
        if self.metadata.url.is_none() {
            self.metadata.url = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty());
        }
    }
}
