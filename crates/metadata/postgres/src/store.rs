use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use filedock_core::FileRecord;
use filedock_metadata::error::MetadataError;
use filedock_metadata::store::MetadataStore;

use crate::config::PostgresMetadataConfig;
use crate::migrations;

/// Open a connection pool for `config`.
///
/// # Errors
///
/// Returns [`MetadataError::Storage`] if the URL is invalid or the database
/// cannot be reached.
pub async fn connect(config: &PostgresMetadataConfig) -> Result<PgPool, MetadataError> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect(&config.url)
        .await
        .map_err(|e| MetadataError::Storage(e.to_string()))
}

/// Map a sqlx error, turning unique-key violations into
/// [`MetadataError::Duplicate`].
pub(crate) fn map_insert_error(e: &sqlx::Error, object_id: &str) -> MetadataError {
    if e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        MetadataError::Duplicate(object_id.to_owned())
    } else {
        MetadataError::Storage(e.to_string())
    }
}

/// PostgreSQL-backed implementation of [`MetadataStore`].
pub struct PostgresMetadataStore {
    pool: PgPool,
    config: Arc<PostgresMetadataConfig>,
}

impl PostgresMetadataStore {
    /// Create a new store from the provided configuration.
    ///
    /// Connects to `PostgreSQL`, creates the connection pool, and runs
    /// migrations to ensure the required tables exist.
    pub async fn new(config: PostgresMetadataConfig) -> Result<Self, MetadataError> {
        let pool = connect(&config).await?;
        Self::from_pool(pool, config).await
    }

    /// Create from an existing pool, running migrations first.
    pub async fn from_pool(
        pool: PgPool,
        config: PostgresMetadataConfig,
    ) -> Result<Self, MetadataError> {
        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl MetadataStore for PostgresMetadataStore {
    async fn insert(&self, record: &FileRecord) -> Result<(), MetadataError> {
        let sql = format!(
            "INSERT INTO {} (
                id, object_id, original_name, size_bytes, mime_type,
                uploaded_by, upload_date, tags, description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            self.config.files_table()
        );

        #[allow(clippy::cast_possible_wrap)]
        let size_bytes = record.size_bytes as i64;

        sqlx::query(&sql)
            .bind(&record.id)
            .bind(&record.object_id)
            .bind(&record.original_name)
            .bind(size_bytes)
            .bind(&record.content_type)
            .bind(&record.uploaded_by)
            .bind(record.uploaded_at)
            .bind(&record.tags)
            .bind(&record.description)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(&e, &record.object_id))?;

        debug!(object_id = %record.object_id, "file record inserted");
        Ok(())
    }

    async fn find_by_object_id(
        &self,
        object_id: &str,
    ) -> Result<Option<FileRecord>, MetadataError> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM {} WHERE object_id = $1",
            self.config.files_table()
        );

        let row = sqlx::query_as::<_, FileRow>(&sql)
            .bind(object_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<FileRecord>, MetadataError> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM {} ORDER BY seq",
            self.config.files_table()
        );

        let rows = sqlx::query_as::<_, FileRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_object_id(&self, object_id: &str) -> Result<u64, MetadataError> {
        let sql = format!(
            "DELETE FROM {} WHERE object_id = $1",
            self.config.files_table()
        );

        let result = sqlx::query(&sql)
            .bind(object_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

/// Public columns of the files table (everything except `seq`).
const FILE_COLUMNS: &str = "id, object_id, original_name, size_bytes, mime_type, \
                            uploaded_by, upload_date, tags, description";

#[derive(sqlx::FromRow)]
struct FileRow {
    id: String,
    object_id: String,
    original_name: String,
    size_bytes: i64,
    mime_type: String,
    uploaded_by: Option<String>,
    upload_date: DateTime<Utc>,
    tags: Vec<String>,
    description: Option<String>,
}

impl From<FileRow> for FileRecord {
    fn from(row: FileRow) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let size_bytes = row.size_bytes as u64;

        Self {
            id: row.id,
            object_id: row.object_id,
            original_name: row.original_name,
            size_bytes,
            content_type: row.mime_type,
            uploaded_by: row.uploaded_by,
            uploaded_at: row.upload_date,
            tags: row.tags,
            description: row.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct FakeDbError(ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fake database error")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    #[test]
    fn unique_violation_is_duplicate() {
        let err = sqlx::Error::Database(Box::new(FakeDbError(ErrorKind::UniqueViolation)));
        let mapped = map_insert_error(&err, "obj-1");
        assert!(matches!(mapped, MetadataError::Duplicate(ref id) if id == "obj-1"));
    }

    #[test]
    fn other_database_error_is_storage() {
        let err = sqlx::Error::Database(Box::new(FakeDbError(ErrorKind::Other)));
        let mapped = map_insert_error(&err, "obj-1");
        assert!(matches!(mapped, MetadataError::Storage(ref m) if m.contains("fake database error")));
    }

    #[test]
    fn pool_timeout_is_storage() {
        let mapped = map_insert_error(&sqlx::Error::PoolTimedOut, "obj-1");
        assert!(matches!(mapped, MetadataError::Storage(_)));
    }
}
