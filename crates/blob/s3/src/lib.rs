//! Amazon S3 backend for filedock.
//!
//! Objects are written to a single bucket under an optional key prefix. The
//! store generates a UUID for every upload; that UUID (without the prefix) is
//! the blob id handed back to callers.
//!
//! Any S3-compatible service (`MinIO`, `LocalStack`) works by setting an
//! endpoint URL, in which case path-style addressing is used.

pub mod auth;
pub mod config;
pub mod error;
pub mod store;

pub use config::S3BlobConfig;
pub use store::S3BlobStore;
