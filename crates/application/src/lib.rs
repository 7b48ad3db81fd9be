mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{ExifTagger, ImageFetcher, ImageStore, RecordSource};
pub use service::ApplicationService;
pub use use_cases::ImportImagesCommand;
