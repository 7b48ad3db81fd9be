use std::time::Duration;

use lillio_download_application::{ApplicationError, ImageFetcher};
use lillio_download_domain::Url;
use reqwest::blocking::Client;
use tracing::debug;

const USER_AGENT: &str = concat!("lillio-download/", env!("CARGO_PKG_VERSION"));

/// Fetches whole response bodies with a blocking client; no retries, no request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestImageFetcher {
    client: Client,
}

impl ReqwestImageFetcher {
    pub fn new() -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|error| ApplicationError::Download(error.to_string()))?;
        Ok(Self { client })
    }
}

impl ImageFetcher for ReqwestImageFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ApplicationError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|error| ApplicationError::Download(error.to_string()))?;

        let bytes = response
            .bytes()
            .map_err(|error| ApplicationError::Download(error.to_string()))?;
        debug!(%url, size = bytes.len(), "downloaded image");
        Ok(bytes.to_vec())
    }
}
