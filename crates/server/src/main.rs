use std::future::IntoFuture;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::Notify;
use tracing::{info, warn};

use filedock_files::FileService;
use filedock_server::api::AppState;
use filedock_server::blob_factory::create_blob_store;
use filedock_server::config::FiledockConfig;
use filedock_server::metadata_factory::create_metadata_stores;

/// filedock HTTP server.
#[derive(Parser, Debug)]
#[command(name = "filedock-server", about = "Standalone HTTP server for filedock")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "filedock.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect the configured backends, run schema migrations, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let mut config: FiledockConfig = if config_exists {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };
    config.apply_env();

    filedock_server::telemetry::init(&config.logging);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(Commands::Migrate) = cli.command {
        return run_migrate(&config).await;
    }

    let blobs = create_blob_store(&config.blob).await?;
    info!(backend = %config.blob.backend, "object store initialized");

    let metadata = create_metadata_stores(&config.metadata).await?;
    info!(backend = %config.metadata.backend, "metadata store initialized");

    let state = AppState {
        files: FileService::new(blobs, metadata.files),
        status: metadata.status,
        max_upload_bytes: config.server.max_upload_bytes,
        ui_path: Some(config.ui.dist_path.clone()),
        ui_enabled: config.ui.enabled,
    };
    let app = filedock_server::api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "filedock-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM. In-flight requests
    // get `shutdown_timeout_seconds` to finish once the signal arrives.
    let signalled = Arc::new(Notify::new());
    let signal = {
        let signalled = Arc::clone(&signalled);
        async move {
            shutdown_signal().await;
            signalled.notify_one();
        }
    };
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    let drain_deadline = async {
        signalled.notified().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        () = drain_deadline => {
            warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, dropping in-flight requests"
            );
        }
    }

    info!("filedock-server shut down");
    Ok(())
}

/// Run the `migrate` subcommand: build the configured stores, which applies
/// any pending schema migrations, then exit.
async fn run_migrate(config: &FiledockConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(backend = %config.metadata.backend, "running metadata backend migrations...");
    let _stores = create_metadata_stores(&config.metadata).await?;
    info!(backend = %config.metadata.backend, "metadata backend migrations complete");

    let _blobs = create_blob_store(&config.blob).await?;
    info!(backend = %config.blob.backend, "object store configuration verified");

    info!("all migrations complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM. If a handler cannot be installed the
/// corresponding branch never completes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
