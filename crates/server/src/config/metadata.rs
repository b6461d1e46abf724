use serde::Deserialize;

/// Metadata store backend configuration.
#[derive(Deserialize)]
pub struct MetadataConfig {
    /// Backend name: `"memory"` or `"postgres"`.
    #[serde(default = "default_metadata_backend")]
    pub backend: String,
    /// Connection URL for the postgres backend. Falls back to
    /// `FILEDOCK_DATABASE_URL`.
    pub url: Option<String>,
    /// Connection pool size.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Schema holding the tables.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Prefix applied to table names.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

impl std::fmt::Debug for MetadataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataConfig")
            .field("backend", &self.backend)
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("pool_size", &self.pool_size)
            .field("schema", &self.schema)
            .field("table_prefix", &self.table_prefix)
            .finish()
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            backend: default_metadata_backend(),
            url: None,
            pool_size: default_pool_size(),
            schema: default_schema(),
            table_prefix: default_table_prefix(),
        }
    }
}

fn default_metadata_backend() -> String {
    "memory".to_owned()
}

fn default_pool_size() -> u32 {
    5
}

fn default_schema() -> String {
    "public".to_owned()
}

fn default_table_prefix() -> String {
    "filedock_".to_owned()
}
