use serde::Deserialize;

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest request body accepted by the API, in bytes. Uploads above
    /// this size are rejected with `413 Payload Too Large`.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Graceful shutdown timeout in seconds.
    ///
    /// Maximum time to wait for in-flight requests once a shutdown signal
    /// has been received.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

/// Static frontend configuration.
#[derive(Debug, Deserialize)]
pub struct UiConfig {
    /// Whether to serve the frontend as the router fallback.
    #[serde(default)]
    pub enabled: bool,
    /// Directory holding the built frontend (must contain `index.html`).
    #[serde(default = "default_ui_dist_path")]
    pub dist_path: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dist_path: default_ui_dist_path(),
        }
    }
}

fn default_ui_dist_path() -> String {
    "frontend/build".to_owned()
}
