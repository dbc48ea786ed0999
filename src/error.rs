//! Crate-wide error types.

use thiserror::Error;

/// Errors surfaced by route compilation, configuration validation, and the
/// server lifecycle.
///
/// Per-request failures (bad bodies, auth rejections, unmatched routes) are
/// never represented here; they are answered inside the request cycle and
/// never terminate the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed route descriptors, conflicting registrations, or invalid
    /// configuration values. Detected eagerly at build time, fatal to
    /// startup.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Partial or unusable TLS settings.
    #[error("invalid TLS configuration: {0}")]
    TlsConfig(String),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid lifecycle transition, e.g. starting a server twice.
    #[error("invalid lifecycle transition: {0}")]
    Lifecycle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
