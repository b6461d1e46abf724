use std::sync::Arc;

use filedock_metadata::{MetadataStore, StatusStore};

use crate::config::MetadataConfig;
use crate::error::ServerError;

/// The metadata-side stores the server needs. Backends that talk to a
/// database share one connection pool between them.
#[derive(Clone)]
pub struct MetadataStores {
    /// File records.
    pub files: Arc<dyn MetadataStore>,
    /// Status check-ins.
    pub status: Arc<dyn StatusStore>,
}

/// Create the metadata and status stores from the server configuration.
///
/// For database backends this connects and runs schema migrations, so it is
/// also what the `migrate` subcommand calls.
#[allow(clippy::unused_async)]
pub async fn create_metadata_stores(config: &MetadataConfig) -> Result<MetadataStores, ServerError> {
    match config.backend.as_str() {
        "memory" => Ok(MetadataStores {
            files: Arc::new(filedock_metadata_memory::MemoryMetadataStore::new()),
            status: Arc::new(filedock_metadata_memory::MemoryStatusStore::new()),
        }),

        #[cfg(feature = "postgres")]
        "postgres" => {
            let pg_config = postgres_config(config)?;
            let pool = filedock_metadata_postgres::connect(&pg_config).await?;
            let files = filedock_metadata_postgres::PostgresMetadataStore::from_pool(
                pool.clone(),
                pg_config.clone(),
            )
            .await?;
            let status =
                filedock_metadata_postgres::PostgresStatusStore::from_pool(pool, pg_config).await?;
            Ok(MetadataStores {
                files: Arc::new(files),
                status: Arc::new(status),
            })
        }

        #[cfg(not(feature = "postgres"))]
        "postgres" => Err(ServerError::Config(
            "postgres metadata backend requires the 'postgres' feature".into(),
        )),

        other => Err(ServerError::Config(format!(
            "unknown metadata backend: {other}"
        ))),
    }
}

#[cfg(feature = "postgres")]
fn postgres_config(
    config: &MetadataConfig,
) -> Result<filedock_metadata_postgres::PostgresMetadataConfig, ServerError> {
    let url = config
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            ServerError::Config(format!(
                "[metadata] url is required for postgres (or set {})",
                crate::config::DATABASE_URL_ENV
            ))
        })?;

    let mut pg_config = filedock_metadata_postgres::PostgresMetadataConfig::new(url);
    pg_config.pool_size = config.pool_size;
    pg_config.schema.clone_from(&config.schema);
    pg_config.table_prefix.clone_from(&config.table_prefix);
    Ok(pg_config)
}
