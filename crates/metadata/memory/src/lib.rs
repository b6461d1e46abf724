mod status;
mod store;

pub use status::MemoryStatusStore;
pub use store::MemoryMetadataStore;
