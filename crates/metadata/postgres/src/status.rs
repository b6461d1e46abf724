use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use filedock_core::StatusCheck;
use filedock_metadata::error::MetadataError;
use filedock_metadata::store::StatusStore;

use crate::config::PostgresMetadataConfig;
use crate::migrations;

/// PostgreSQL-backed implementation of [`StatusStore`].
pub struct PostgresStatusStore {
    pool: PgPool,
    config: Arc<PostgresMetadataConfig>,
}

impl PostgresStatusStore {
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
impl StatusStore for PostgresStatusStore {
    async fn insert(&self, check: &StatusCheck) -> Result<(), MetadataError> {
        let sql = format!(
            "INSERT INTO {} (id, client_name, timestamp) VALUES ($1, $2, $3)",
            self.config.status_table()
        );

        sqlx::query(&sql)
            .bind(&check.id)
            .bind(&check.client_name)
            .bind(check.timestamp)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<StatusCheck>, MetadataError> {
        let sql = format!(
            "SELECT id, client_name, timestamp FROM {} ORDER BY seq",
            self.config.status_table()
        );

        let rows = sqlx::query_as::<_, StatusRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MetadataError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
struct StatusRow {
    id: String,
    client_name: String,
    timestamp: DateTime<Utc>,
}

impl From<StatusRow> for StatusCheck {
    fn from(row: StatusRow) -> Self {
        Self {
            id: row.id,
            client_name: row.client_name,
            timestamp: row.timestamp,
        }
    }
}
