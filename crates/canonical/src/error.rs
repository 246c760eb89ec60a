use thiserror::Error;

/// Errors raised while validating platform configuration.
///
/// Parsing and URL building never fail; only configuration can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid platform configuration: {0}")]
    InvalidConfig(String),
}
