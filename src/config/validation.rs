//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check cross-field invariants (TLS files both-or-neither, auth
//!   capability present when enabled)
//! - Validate value shapes (listen address parses, prefix starts with '/')
//!
//! # Design Decisions
//! - Runs before a configuration is accepted into the server
//! - Any failure is fatal to startup, never deferred to request time

use std::net::SocketAddr;

use crate::config::ServerConfig;
use crate::error::{Error, Result};

impl ServerConfig {
    /// Validate the configuration, returning a descriptive error on the
    /// first failure.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for a malformed listen address, a path
    /// prefix without a leading slash, or `auth_enabled` without a
    /// `token_middleware`; [`Error::TlsConfig`] when exactly one of
    /// `cert_file` / `key_file` is set.
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            Error::Configuration(format!("listen address {:?}: {e}", self.listen))
        })?;

        if !self.path_prefix.is_empty() && !self.path_prefix.starts_with('/') {
            return Err(Error::Configuration(format!(
                "path prefix {:?} must start with '/'",
                self.path_prefix
            )));
        }

        match (&self.cert_file, &self.key_file) {
            (Some(_), None) => {
                return Err(Error::TlsConfig(
                    "cert_file is set but key_file is empty".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(Error::TlsConfig(
                    "key_file is set but cert_file is empty".into(),
                ))
            }
            _ => {}
        }

        if self.auth_enabled && self.token_middleware.is_none() {
            return Err(Error::Configuration(
                "auth_enabled requires a token_middleware".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_unparsable_listen_address() {
        let config = ServerConfig {
            listen: "not-an-address".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn rejects_prefix_without_leading_slash() {
        let config = ServerConfig {
            path_prefix: "api".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn rejects_cert_without_key() {
        let config = ServerConfig {
            cert_file: Some("server.crt".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::TlsConfig(_))));
    }

    #[test]
    fn rejects_key_without_cert() {
        let config = ServerConfig {
            key_file: Some("server.key".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::TlsConfig(_))));
    }

    #[test]
    fn accepts_cert_and_key_together() {
        let config = ServerConfig {
            cert_file: Some("server.crt".into()),
            key_file: Some("server.key".into()),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_auth_without_capability() {
        let config = ServerConfig {
            auth_enabled: true,
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));
    }
}
