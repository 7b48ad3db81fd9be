mod date;
mod error;
mod naming;
mod record;
mod report;

pub use date::{accepted_patterns, CaptureDate, DateFormat, ACCEPTED_FORMATS};
pub use error::DomainError;
pub use naming::FilenameRegistry;
pub use record::{extension_for_url, ImageRecord, DEFAULT_EXTENSION};
pub use report::{ImportReport, RecordOutcome};
pub use url::Url;
