use thiserror::Error;

use crate::date::accepted_patterns;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(
        "invalid date format: {0:?}, expected one of {patterns}",
        patterns = accepted_patterns()
    )]
    UnparseableDate(String),
    #[error("invalid image link {link:?}: {reason}")]
    InvalidLink { link: String, reason: String },
}
