use sqlx::PgPool;
use tracing::info;

use crate::config::PostgresMetadataConfig;

/// Run database migrations, creating required tables if they do not exist.
///
/// Creates the file metadata and status-check tables in the configured schema
/// with the configured table prefix. Safe to run repeatedly.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if any DDL statement fails.
pub async fn run_migrations(
    pool: &PgPool,
    config: &PostgresMetadataConfig,
) -> Result<(), sqlx::Error> {
    let schema = &config.schema;
    let prefix = &config.table_prefix;
    let files_table = config.files_table();
    let status_table = config.status_table();

    let create_schema = format!("CREATE SCHEMA IF NOT EXISTS {schema}");

    // `seq` preserves insertion order for listing and never leaves the backend.
    let create_files = format!(
        "CREATE TABLE IF NOT EXISTS {files_table} (
            id            TEXT PRIMARY KEY,
            seq           BIGSERIAL NOT NULL,
            object_id     TEXT NOT NULL,
            original_name TEXT NOT NULL,
            size_bytes    BIGINT NOT NULL,
            mime_type     TEXT NOT NULL,
            uploaded_by   TEXT,
            upload_date   TIMESTAMPTZ NOT NULL,
            tags          TEXT[] NOT NULL DEFAULT '{{}}',
            description   TEXT
        )"
    );

    let create_status = format!(
        "CREATE TABLE IF NOT EXISTS {status_table} (
            id          TEXT PRIMARY KEY,
            seq         BIGSERIAL NOT NULL,
            client_name TEXT NOT NULL,
            timestamp   TIMESTAMPTZ NOT NULL
        )"
    );

    let indexes = [
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{prefix}files_object_id ON {files_table} (object_id)"
        ),
        format!("CREATE INDEX IF NOT EXISTS idx_{prefix}files_seq ON {files_table} (seq)"),
        format!("CREATE INDEX IF NOT EXISTS idx_{prefix}status_seq ON {status_table} (seq)"),
    ];

    sqlx::query(&create_schema).execute(pool).await?;
    sqlx::query(&create_files).execute(pool).await?;
    sqlx::query(&create_status).execute(pool).await?;
    for idx in &indexes {
        sqlx::query(idx).execute(pool).await?;
    }

    info!(files_table = %files_table, status_table = %status_table, "metadata migrations applied");
    Ok(())
}
