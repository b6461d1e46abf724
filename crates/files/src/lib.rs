//! File lifecycle coordinator.
//!
//! [`FileService`] turns each file operation into an ordered pair of calls
//! against a [`BlobStore`](filedock_blob::BlobStore) holding content and a
//! [`MetadataStore`](filedock_metadata::MetadataStore) holding
//! [`FileRecord`](filedock_core::FileRecord)s, and defines what happens when
//! only one half succeeds.

mod error;
mod service;

pub use error::FilesError;
pub use service::{Download, FileService};
