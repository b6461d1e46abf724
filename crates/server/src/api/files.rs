use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use filedock_blob::BlobError;
use filedock_core::{DEFAULT_CONTENT_TYPE, FileRecord, NewFile};
use filedock_files::FilesError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{error, warn};

use super::AppState;
use super::schemas::{ErrorResponse, FileListResponse, MessageResponse, UploadForm};
use crate::error::ApiError;

/// Name of the multipart part carrying the upload.
pub const FILE_FIELD: &str = "file";

const NOT_FOUND_MESSAGE: &str = "File metadata not found";

/// Characters left unescaped in an RFC 8187 `filename*` value (`attr-char`).
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Build the `Content-Disposition` value for a download.
///
/// Printable ASCII names are emitted bare (`attachment; filename=hello.txt`).
/// Anything else gets an ASCII fallback plus an RFC 8187 `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let plain = !filename.is_empty()
        && filename
            .chars()
            .all(|c| (c.is_ascii_graphic() || c == ' ') && !matches!(c, '"' | ';' | '\\'));
    if plain {
        return format!("attachment; filename={filename}");
    }

    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && !matches!(c, '"' | ';' | '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(filename, ATTR_CHAR);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn multipart_error(e: &MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Upload exceeds the maximum allowed size".into())
    } else {
        ApiError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}

/// Read the `file` part of an upload form into a [`NewFile`].
async fn read_upload(mut multipart: Multipart) -> Result<NewFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::Validation("File part has no filename".into()))?;
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.map_err(|e| multipart_error(&e))?;

        let mut file = NewFile::new(filename, data);
        if let Some(ct) = content_type {
            file = file.with_content_type(ct);
        }
        return Ok(file);
    }

    Err(ApiError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// `POST /api/files/upload` -- store a file and record its metadata.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "Files",
    summary = "Upload a file",
    description = "Stores the `file` part in the object store, then records its metadata. \
                   The returned record's `appwrite_file_id` addresses the file in every other endpoint.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = FileRecord),
        (status = 413, description = "File exceeds the upload limit", body = ErrorResponse),
        (status = 422, description = "No file part or no filename", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileRecord>, ApiError> {
    let multipart = multipart.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let file = read_upload(multipart).await?;
    let filename = file.filename.clone();

    match state.files.upload(file).await {
        Ok(record) => Ok(Json(record)),
        Err(FilesError::Validation(msg)) => Err(ApiError::Validation(msg)),
        Err(FilesError::Blob(BlobError::TooLarge { size, limit })) => {
            warn!(filename = %filename, size, limit, "upload rejected by object store size limit");
            Err(ApiError::PayloadTooLarge(
                "Upload exceeds the maximum allowed size".into(),
            ))
        }
        Err(e) => {
            error!(error = %e, filename = %filename, "upload failed");
            Err(ApiError::Internal("Upload failed".into()))
        }
    }
}

/// `GET /api/files/list` -- list every stored file.
#[utoipa::path(
    get,
    path = "/api/files/list",
    tag = "Files",
    summary = "List files",
    description = "Returns every file record, oldest upload first.",
    responses(
        (status = 200, description = "All file records", body = FileListResponse),
        (status = 500, description = "Metadata store failure", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.files.list().await.map_err(|e| {
        error!(error = %e, "failed to list files");
        ApiError::Internal("Error listing files".into())
    })?;
    Ok(Json(FileListResponse { files }))
}

/// `GET /api/files/download/{object_id}` -- fetch the file content.
#[utoipa::path(
    get,
    path = "/api/files/download/{object_id}",
    tag = "Files",
    summary = "Download a file",
    description = "Returns the stored bytes with the recorded content type and an attachment disposition carrying the original filename.",
    params(("object_id" = String, Path, description = "Object store id returned by upload")),
    responses(
        (status = 200, description = "File content, served with the recorded content type"),
        (status = 404, description = "Unknown id or content missing from the object store", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.files.download(&object_id).await.map_err(|e| match e {
        FilesError::NotFound(_) => ApiError::NotFound(NOT_FOUND_MESSAGE.into()),
        FilesError::BlobMissing(_) => ApiError::NotFound("File not found".into()),
        other => {
            error!(error = %other, object_id = %object_id, "download failed");
            ApiError::NotFound("File not found".into())
        }
    })?;

    let content_type = HeaderValue::from_str(&download.record.content_type).unwrap_or_else(|_| {
        warn!(
            object_id = %object_id,
            content_type = %download.record.content_type,
            "recorded content type is not a valid header value"
        );
        HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
    });
    let disposition = HeaderValue::from_str(&content_disposition(&download.record.original_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(download.data),
    )
        .into_response())
}

/// `DELETE /api/files/delete/{object_id}` -- remove a file.
#[utoipa::path(
    delete,
    path = "/api/files/delete/{object_id}",
    tag = "Files",
    summary = "Delete a file",
    description = "Removes the content from the object store, then the metadata record.",
    params(("object_id" = String, Path, description = "Object store id returned by upload")),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 404, description = "No metadata record for this id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.files.delete(&object_id).await {
        Ok(()) => Ok(Json(MessageResponse::new("File deleted successfully"))),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound(NOT_FOUND_MESSAGE.into())),
        Err(e) => {
            error!(error = %e, object_id = %object_id, "delete failed");
            Err(ApiError::Internal("Deletion error".into()))
        }
    }
}

/// `GET /api/files/info/{object_id}` -- fetch a file's metadata record.
#[utoipa::path(
    get,
    path = "/api/files/info/{object_id}",
    tag = "Files",
    summary = "Get file metadata",
    params(("object_id" = String, Path, description = "Object store id returned by upload")),
    responses(
        (status = 200, description = "File record", body = FileRecord),
        (status = 404, description = "No metadata record for this id", body = ErrorResponse),
        (status = 500, description = "Metadata store failure", body = ErrorResponse)
    )
)]
pub async fn file_info(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<FileRecord>, ApiError> {
    match state.files.info(&object_id).await {
        Ok(record) => Ok(Json(record)),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound(NOT_FOUND_MESSAGE.into())),
        Err(e) => {
            error!(error = %e, object_id = %object_id, "info lookup failed");
            Err(ApiError::Internal("Error getting file info".into()))
        }
    }
}
