use serde::Deserialize;

/// Log output configuration.
///
/// `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive (e.g. `"info"` or `"filedock=debug,info"`).
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit ANSI colour codes.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            ansi: default_ansi(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_ansi() -> bool {
    true
}
