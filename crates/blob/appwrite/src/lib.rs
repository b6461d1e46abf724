//! [Appwrite Storage](https://appwrite.io/docs/products/storage) backend for
//! filedock.
//!
//! Files are stored in a single bucket through the Appwrite REST API using a
//! server API key. Appwrite assigns the file id on upload.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use filedock_blob_appwrite::{AppwriteBlobStore, AppwriteConfig};
//!
//! let config = AppwriteConfig::new(
//!     "https://cloud.appwrite.io/v1",
//!     "my-project",
//!     "server-api-key",
//!     "uploads",
//! );
//! let store = AppwriteBlobStore::new(config).expect("client should build");
//! ```

pub mod config;
pub mod error;
pub mod store;
mod types;

pub use config::AppwriteConfig;
pub use error::AppwriteError;
pub use store::AppwriteBlobStore;
