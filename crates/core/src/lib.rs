pub mod record;
pub mod status;
pub mod upload;

pub use record::{DEFAULT_CONTENT_TYPE, FileRecord, resolve_content_type};
pub use status::{StatusCheck, StatusCheckCreate};
pub use upload::NewFile;
