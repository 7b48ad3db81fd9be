use std::path::Path;

use lillio_download_domain::{
    extension_for_url, CaptureDate, FilenameRegistry, ImageRecord, ImportReport, RecordOutcome,
};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, ExifTagger, ImageFetcher, ImageStore, ImportImagesCommand, RecordSource,
};

pub struct ApplicationService {
    records: Box<dyn RecordSource>,
    fetcher: Box<dyn ImageFetcher>,
    store: Box<dyn ImageStore>,
    tagger: Box<dyn ExifTagger>,
}

impl ApplicationService {
    pub fn new(
        records: Box<dyn RecordSource>,
        fetcher: Box<dyn ImageFetcher>,
        store: Box<dyn ImageStore>,
        tagger: Box<dyn ExifTagger>,
    ) -> Self {
        Self {
            records,
            fetcher,
            store,
            tagger,
        }
    }

    /// Downloads every record of the input file into the output directory, one at a time.
    ///
    /// Unparseable dates and EXIF failures are recorded in the report; anything else
    /// stops the run and leaves already written files in place.
    pub fn import_images(
        &self,
        command: ImportImagesCommand,
    ) -> Result<ImportReport, ApplicationError> {
        if command.input_path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "input path must not be empty".to_string(),
            ));
        }
        if command.output_dir.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "output directory must not be empty".to_string(),
            ));
        }

        self.store.ensure_directory(&command.output_dir)?;
        let records = self.records.load_records(&command.input_path)?;
        debug!(count = records.len(), "loaded image records");

        let mut registry = FilenameRegistry::default();
        let mut report = ImportReport::default();
        for record in &records {
            let outcome = self.import_record(record, &command.output_dir, &mut registry)?;
            report.record(outcome);
        }

        Ok(report)
    }

    fn import_record(
        &self,
        record: &ImageRecord,
        output_dir: &Path,
        registry: &mut FilenameRegistry,
    ) -> Result<RecordOutcome, ApplicationError> {
        let capture = match CaptureDate::parse(&record.date) {
            Ok(capture) => capture,
            Err(error) => {
                warn!("Invalid date format: {}. Skipping this entry.", record.date);
                return Ok(RecordOutcome::Skipped {
                    raw_date: record.date.clone(),
                    reason: error.to_string(),
                });
            }
        };

        let file_name = registry.claim(&capture.base_filename());
        let url = record.parse_link()?;
        let path = output_dir.join(format!("{file_name}{}", extension_for_url(&url)));

        info!("Downloading {} to {}", url, path.display());
        let bytes = self.fetcher.fetch(&url)?;
        self.store.write_image(&path, &bytes)?;

        let taken_at = capture.at_midnight();
        self.store.set_timestamps(&path, taken_at)?;

        match self.tagger.write_capture_date(&path, &capture.exif_timestamp()) {
            Ok(()) => {
                // Re-saving the image bumped its modification time.
                self.store.set_timestamps(&path, taken_at)?;
                Ok(RecordOutcome::Written { path })
            }
            Err(error) => {
                warn!("Failed to set EXIF data for {}: {error}", path.display());
                Ok(RecordOutcome::TaggingFailed {
                    path,
                    reason: error.to_string(),
                })
            }
        }
    }
}
