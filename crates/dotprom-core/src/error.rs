//! Shared error type across dotprom crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, DotpromError>;

/// Unified error type used by core and exporter.
///
/// Observation calls (`record_count`, `record_timing`) never return these;
/// they are fail-safe by contract. The error surface exists for config
/// loading and validation paths only.
#[derive(Debug, Error)]
pub enum DotpromError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}
