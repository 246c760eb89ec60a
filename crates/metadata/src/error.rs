use std::time::Duration;

use thiserror::Error;

/// Why a metadata lookup did not produce a record.
///
/// These never reach the caller of [`Resolver::resolve`](crate::Resolver::resolve),
/// which substitutes a fallback record; they are surfaced by the individual
/// [`MetadataSource`](crate::MetadataSource) implementations and logged.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("metadata lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("response carried no usable metadata: {0}")]
    Parse(String),

    #[error("invalid metadata configuration: {0}")]
    InvalidConfig(String),
}
