use std::path::Path;

use chrono::NaiveDateTime;
use lillio_download_domain::{ImageRecord, Url};

use crate::ApplicationError;

pub trait RecordSource {
    /// Decodes the ordered record list stored at `path`.
    fn load_records(&self, path: &Path) -> Result<Vec<ImageRecord>, ApplicationError>;
}

pub trait ImageFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ApplicationError>;
}

pub trait ImageStore {
    fn ensure_directory(&self, directory: &Path) -> Result<(), ApplicationError>;

    /// Writes `bytes` to `path`, replacing whatever was there.
    fn write_image(&self, path: &Path, bytes: &[u8]) -> Result<(), ApplicationError>;

    /// Sets creation (where supported) and modification times, interpreted as local time.
    fn set_timestamps(&self, path: &Path, taken_at: NaiveDateTime)
        -> Result<(), ApplicationError>;
}

pub trait ExifTagger {
    /// Rewrites the image at `path` with its EXIF date tags set to `timestamp`.
    fn write_capture_date(&self, path: &Path, timestamp: &str) -> Result<(), ApplicationError>;
}
