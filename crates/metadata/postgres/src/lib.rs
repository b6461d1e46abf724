pub mod config;
pub mod migrations;
pub mod status;
pub mod store;

pub use config::PostgresMetadataConfig;
pub use status::PostgresStatusStore;
pub use store::{PostgresMetadataStore, connect};
