use serde::{Deserialize, Serialize};
use url::Url;

use crate::DomainError;

pub const DEFAULT_EXTENSION: &str = ".jpg";

/// One entry of the input list. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
}

impl ImageRecord {
    pub fn parse_link(&self) -> Result<Url, DomainError> {
        Url::parse(&self.link).map_err(|error| DomainError::InvalidLink {
            link: self.link.clone(),
            reason: error.to_string(),
        })
    }
}

/// Extension (with its leading dot) of the last path segment, `.jpg` when there is none.
pub fn extension_for_url(url: &Url) -> String {
    let segment = url.path().rsplit('/').next().unwrap_or_default();
    match segment.rfind('.') {
        Some(index) if index + 1 < segment.len() => segment[index..].to_string(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
