use serde::Deserialize;

/// Subset of the Appwrite file object returned by the create-file call.
#[derive(Debug, Deserialize)]
pub(crate) struct AppwriteFile {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "sizeOriginal")]
    pub size_original: u64,
}

/// Error envelope returned by Appwrite on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct AppwriteErrorBody {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
