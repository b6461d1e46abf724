use bytes::Bytes;

/// A fully buffered upload, as received from the client.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Client-declared filename.
    pub filename: String,
    /// Client-declared content type, if any.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl NewFile {
    /// Create an upload without a declared content type.
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Set the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
