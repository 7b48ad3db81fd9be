mod config;
mod logging;

use std::process::ExitCode;

use config::AppConfig;
use lillio_download_adapters::{ExifDateTagger, FsImageStore, JsonRecordSource, ReqwestImageFetcher};
use lillio_download_application::{ApplicationError, ApplicationService, ImportImagesCommand};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    logging::init_logging();
    let config = AppConfig::default();

    match run(&config) {
        Ok(()) => {
            info!("All images have been processed successfully.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("An error occurred: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(config: &AppConfig) -> Result<(), ApplicationError> {
    let service = build_application_service(config)?;
    let report = service.import_images(ImportImagesCommand {
        input_path: config.input_path.clone(),
        output_dir: config.output_dir.clone(),
    })?;
    debug!(
        records = report.outcomes.len(),
        skipped = report.skipped(),
        tagging_failures = report.tagging_failures(),
        "import finished"
    );
    Ok(())
}

fn build_application_service(config: &AppConfig) -> Result<ApplicationService, ApplicationError> {
    Ok(ApplicationService::new(
        Box::new(JsonRecordSource),
        Box::new(ReqwestImageFetcher::new()?),
        Box::new(FsImageStore),
        Box::new(ExifDateTagger::with_jpeg_quality(config.jpeg_quality)),
    ))
}
