pub mod fs;
pub mod http;
pub mod json;
pub mod tagging;

pub use fs::FsImageStore;
pub use http::ReqwestImageFetcher;
pub use json::{parse_records, JsonRecordSource};
pub use tagging::{ExifDateTagger, DEFAULT_JPEG_QUALITY};
