use filedock_blob::BlobError;

/// Classify an AWS SDK error string into the matching [`BlobError`].
///
/// Timeouts and connection failures become [`BlobError::Connection`];
/// everything else is a [`BlobError::Storage`].
pub fn classify_sdk_error(error_str: &str) -> BlobError {
    let lower = error_str.to_lowercase();
    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("dispatch failure")
    {
        BlobError::Connection(error_str.to_owned())
    } else {
        BlobError::Storage(error_str.to_owned())
    }
}
