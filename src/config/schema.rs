//! Configuration schema definitions.
//!
//! The embedding application owns these structs and passes them by value
//! into server construction. All data fields derive Serde traits; the
//! authentication capability is runtime-only and skipped.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::middleware::TokenMiddleware;

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Read/write timeout of the default profile, suited to interactive APIs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Read/write timeout of the [`ServerConfig::streaming`] profile, suited to
/// long-poll and streaming deployments.
pub const STREAMING_TIMEOUT: Duration = Duration::from_secs(120);

/// Root server configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub listen: String,

    /// Leading path segment stripped before route matching (may be empty).
    pub path_prefix: String,

    /// Emit permissive CORS headers and answer preflight requests.
    pub cors: bool,

    /// PEM certificate chain path. TLS is active iff both this and
    /// `key_file` are set.
    pub cert_file: Option<PathBuf>,

    /// PEM private key path.
    pub key_file: Option<PathBuf>,

    /// Bound on reading an individual request.
    pub read_timeout: Duration,

    /// Bound on writing an individual response.
    pub write_timeout: Duration,

    /// TLS negotiation policy; `None` uses [`TlsSettings::default`].
    pub tls: Option<TlsSettings>,

    /// Route every request through `token_middleware` before routing.
    pub auth_enabled: bool,

    /// Authentication capability; required when `auth_enabled` is set.
    #[serde(skip)]
    pub token_middleware: Option<TokenMiddleware>,

    /// Log every request before any other processing.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            path_prefix: String::new(),
            cors: false,
            cert_file: None,
            key_file: None,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
            tls: None,
            auth_enabled: false,
            token_middleware: None,
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Profile for long-poll and streaming deployments: identical to the
    /// default profile apart from 120 second read/write timeouts.
    pub fn streaming() -> Self {
        Self {
            read_timeout: STREAMING_TIMEOUT,
            write_timeout: STREAMING_TIMEOUT,
            ..Self::default()
        }
    }

    /// Whether both TLS files are configured.
    pub fn tls_active(&self) -> bool {
        self.cert_file.is_some() && self.key_file.is_some()
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("listen", &self.listen)
            .field("path_prefix", &self.path_prefix)
            .field("cors", &self.cors)
            .field("cert_file", &self.cert_file)
            .field("key_file", &self.key_file)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("tls", &self.tls)
            .field("auth_enabled", &self.auth_enabled)
            .field("token_middleware", &self.token_middleware.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}

/// Minimum accepted TLS protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsVersion {
    Tls12,
    Tls13,
}

/// Elliptic curves for key exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
}

/// TLS negotiation policy, passed through to the TLS backend.
///
/// Entries the backend does not offer are skipped at listener construction
/// with a warning; see `net::tls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    /// Minimum protocol version to negotiate.
    pub min_version: TlsVersion,

    /// Key-exchange curves in preference order.
    pub curve_preferences: Vec<Curve>,

    /// TLS 1.2 cipher suite allow-list, by IANA-style name.
    pub cipher_suites: Vec<String>,
}

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            min_version: TlsVersion::Tls12,
            curve_preferences: vec![Curve::P521, Curve::P384, Curve::P256],
            cipher_suites: vec![
                "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384".to_string(),
                "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA".to_string(),
                "TLS_RSA_WITH_AES_256_GCM_SHA384".to_string(),
                "TLS_RSA_WITH_AES_256_CBC_SHA".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.read_timeout, Duration::from_secs(15));
        assert_eq!(config.write_timeout, Duration::from_secs(15));
        assert!(config.path_prefix.is_empty());
        assert!(!config.cors);
        assert!(!config.auth_enabled);
        assert!(!config.debug);
        assert!(!config.tls_active());
    }

    #[test]
    fn streaming_profile_widens_timeouts_only() {
        let config = ServerConfig::streaming();
        assert_eq!(config.read_timeout, Duration::from_secs(120));
        assert_eq!(config.write_timeout, Duration::from_secs(120));
        assert_eq!(config.listen, ServerConfig::default().listen);
    }

    #[test]
    fn tls_defaults_match_policy() {
        let tls = TlsSettings::default();
        assert_eq!(tls.min_version, TlsVersion::Tls12);
        assert_eq!(
            tls.curve_preferences,
            vec![Curve::P521, Curve::P384, Curve::P256]
        );
        assert!(tls
            .cipher_suites
            .iter()
            .all(|name| name.contains("AES_256")));
    }
}
