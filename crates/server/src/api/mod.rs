pub mod files;
pub mod health;
pub mod openapi;
pub mod root;
pub mod schemas;
pub mod status;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use filedock_files::FileService;
use filedock_metadata::StatusStore;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// File coordinator over the object and metadata stores.
    pub files: FileService,
    /// Status check-in store.
    pub status: Arc<dyn StatusStore>,
    /// Request body limit applied to every route, in bytes.
    pub max_upload_bytes: usize,
    /// Directory holding the static frontend, if any.
    pub ui_path: Option<String>,
    /// Whether the static frontend is served.
    pub ui_enabled: bool,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api", get(root::root))
        .route("/api/", get(root::root))
        .route(
            "/api/status",
            post(status::create_status_check).get(status::list_status_checks),
        )
        .route("/api/files/upload", post(files::upload_file))
        .route("/api/files/list", get(files::list_files))
        .route("/api/files/download/{object_id}", get(files::download_file))
        .route("/api/files/delete/{object_id}", delete(files::delete_file))
        .route("/api/files/info/{object_id}", get(files::file_info))
        .route("/health", get(health::health));

    let mut router = api
        // Swagger UI must be merged BEFORE the UI fallback, otherwise the fallback
        // will swallow /swagger-ui requests.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(path_str) = state.ui_path.as_ref().filter(|_| state.ui_enabled) {
        let path = std::path::PathBuf::from(path_str);
        if path.exists() {
            let index_path = path.join("index.html");
            router = router.fallback_service(ServeDir::new(path).fallback(ServeFile::new(index_path)));
        } else {
            tracing::warn!(
                path = %path.display(),
                "frontend directory not found, UI will not be served"
            );
        }
    }

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    router
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
