#![allow(clippy::needless_for_each)]

use filedock_core::{FileRecord, StatusCheck, StatusCheckCreate};

use super::schemas::{
    ErrorResponse, FileListResponse, HealthResponse, MessageResponse, UploadForm,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "filedock",
        version = "0.1.0",
        description = "File manager API. Binary content lives in an object store; a metadata record per file lives in a separate metadata store, joined by the object store id (`appwrite_file_id` on the wire).",
        license(name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    tags(
        (name = "Root", description = "Service greeting"),
        (name = "Health", description = "Liveness probe"),
        (name = "Status", description = "Client check-in scratchpad"),
        (name = "Files", description = "Upload, list, download, inspect and delete files")
    ),
    paths(
        super::root::root,
        super::health::health,
        super::status::create_status_check,
        super::status::list_status_checks,
        super::files::upload_file,
        super::files::list_files,
        super::files::download_file,
        super::files::delete_file,
        super::files::file_info,
    ),
    components(schemas(
        FileRecord,
        StatusCheck,
        StatusCheckCreate,
        ErrorResponse,
        MessageResponse,
        FileListResponse,
        HealthResponse,
        UploadForm,
    ))
)]
pub struct ApiDoc;
