use super::*;

#[test]
fn empty_file_uses_defaults() {
    let config: FiledockConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_upload_bytes, 100 * 1024 * 1024);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.blob.backend, "memory");
    assert_eq!(config.blob.timeout_seconds, 30);
    assert!(config.blob.max_object_bytes.is_none());
    assert_eq!(config.metadata.backend, "memory");
    assert_eq!(config.metadata.pool_size, 5);
    assert_eq!(config.metadata.schema, "public");
    assert_eq!(config.metadata.table_prefix, "filedock_");
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.ansi);
    assert!(!config.ui.enabled);
    assert_eq!(config.ui.dist_path, "frontend/build");
}

#[test]
fn memory_blob_size_limit() {
    let toml = r#"
        [blob]
        backend = "memory"
        max_object_bytes = 1024
    "#;

    let config: FiledockConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.blob.max_object_bytes, Some(1024));
}

#[test]
fn appwrite_and_postgres_config() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000
        max_upload_bytes = 1048576

        [blob]
        backend = "appwrite"
        endpoint = "https://cloud.appwrite.io/v1"
        project_id = "proj"
        api_key = "secret"
        bucket_id = "uploads"
        timeout_seconds = 10

        [metadata]
        backend = "postgres"
        url = "postgres://filedock:pw@db:5432/filedock"
        pool_size = 10

        [logging]
        level = "debug"
        ansi = false
    "#;

    let config: FiledockConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.max_upload_bytes, 1_048_576);
    assert_eq!(config.blob.backend, "appwrite");
    assert_eq!(config.blob.endpoint.as_deref(), Some("https://cloud.appwrite.io/v1"));
    assert_eq!(config.blob.project_id.as_deref(), Some("proj"));
    assert_eq!(config.blob.bucket_id.as_deref(), Some("uploads"));
    assert_eq!(config.blob.timeout_seconds, 10);
    assert_eq!(config.metadata.backend, "postgres");
    assert_eq!(config.metadata.pool_size, 10);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.ansi);
}

#[test]
fn s3_config() {
    let toml = r#"
        [blob]
        backend = "s3"
        region = "eu-west-1"
        bucket = "filedock-uploads"
        prefix = "files/"
        endpoint_url = "http://localhost:9000"
    "#;

    let config: FiledockConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.blob.backend, "s3");
    assert_eq!(config.blob.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.blob.bucket.as_deref(), Some("filedock-uploads"));
    assert_eq!(config.blob.prefix.as_deref(), Some("files/"));
    assert_eq!(config.blob.endpoint_url.as_deref(), Some("http://localhost:9000"));
}

#[test]
fn ui_config() {
    let toml = r#"
        [ui]
        enabled = true
        dist_path = "/srv/filedock/ui"
    "#;

    let config: FiledockConfig = toml::from_str(toml).unwrap();
    assert!(config.ui.enabled);
    assert_eq!(config.ui.dist_path, "/srv/filedock/ui");
}

#[test]
fn env_fills_missing_secrets() {
    let mut config: FiledockConfig = toml::from_str("").unwrap();
    config.apply_env_with(|key| match key {
        APPWRITE_API_KEY_ENV => Some("env-key".to_owned()),
        DATABASE_URL_ENV => Some("postgres://env/filedock".to_owned()),
        _ => None,
    });
    assert_eq!(config.blob.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.metadata.url.as_deref(), Some("postgres://env/filedock"));
}

#[test]
fn file_values_take_precedence_over_env() {
    let toml = r#"
        [blob]
        api_key = "file-key"

        [metadata]
        url = "postgres://file/filedock"
    "#;

    let mut config: FiledockConfig = toml::from_str(toml).unwrap();
    config.apply_env_with(|_| Some("from-env".to_owned()));
    assert_eq!(config.blob.api_key.as_deref(), Some("file-key"));
    assert_eq!(config.metadata.url.as_deref(), Some("postgres://file/filedock"));
}

#[test]
fn empty_env_values_are_ignored() {
    let mut config: FiledockConfig = toml::from_str("").unwrap();
    config.apply_env_with(|_| Some(String::new()));
    assert!(config.blob.api_key.is_none());
    assert!(config.metadata.url.is_none());
}

#[test]
fn debug_redacts_secrets() {
    let toml = r#"
        [blob]
        api_key = "super-secret-key"

        [metadata]
        url = "postgres://user:hunter2@db/filedock"
    "#;

    let config: FiledockConfig = toml::from_str(toml).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("[REDACTED]"));
}
