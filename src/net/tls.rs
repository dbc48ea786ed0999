//! TLS configuration and certificate loading.
//!
//! The certificate chain and private key are PEM files on disk. The
//! negotiation policy (minimum version, curve preference order, cipher
//! allow-list) is carried as configuration data and mapped onto rustls as
//! far as the provider supports it: the allow-list filters the provider's
//! TLS 1.2 suites by name (TLS 1.3 suites are not subject to legacy
//! allow-lists), unsupported curves are skipped, and an allow-list that
//! matches nothing falls back to the provider defaults.

use std::path::Path;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::{ring, CryptoProvider};
use rustls::{NamedGroup, SupportedCipherSuite};

use crate::config::{Curve, TlsSettings, TlsVersion};
use crate::error::{Error, Result};

/// Load PEM cert/key files and build a listener TLS config honoring
/// `settings`.
pub async fn load(
    cert_path: &Path,
    key_path: &Path,
    settings: &TlsSettings,
) -> Result<RustlsConfig> {
    let cert_pem = tokio::fs::read(cert_path).await.map_err(|e| {
        Error::TlsConfig(format!("certificate file {}: {e}", cert_path.display()))
    })?;
    let key_pem = tokio::fs::read(key_path).await.map_err(|e| {
        Error::TlsConfig(format!("private key file {}: {e}", key_path.display()))
    })?;

    let config = build_server_config(&cert_pem, &key_pem, settings)?;
    Ok(RustlsConfig::from_config(config))
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and key
/// bytes plus the negotiation policy.
///
/// # Errors
///
/// [`Error::TlsConfig`] if the material cannot be parsed or rustls rejects
/// the resulting configuration.
pub fn build_server_config(
    cert_pem: &[u8],
    key_pem: &[u8],
    settings: &TlsSettings,
) -> Result<Arc<rustls::ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(cert_pem))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::TlsConfig(format!("failed to parse certificate chain: {e}")))?;
    if certs.is_empty() {
        return Err(Error::TlsConfig(
            "no certificate found in PEM data".into(),
        ));
    }

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(key_pem))
        .map_err(|e| Error::TlsConfig(format!("failed to read private key: {e}")))?
        .ok_or_else(|| Error::TlsConfig("no private key found in PEM data".into()))?;

    let versions: &[&rustls::SupportedProtocolVersion] = match settings.min_version {
        TlsVersion::Tls12 => &[&rustls::version::TLS12, &rustls::version::TLS13],
        TlsVersion::Tls13 => &[&rustls::version::TLS13],
    };

    let config = rustls::ServerConfig::builder_with_provider(Arc::new(provider_for(settings)))
        .with_protocol_versions(versions)
        .map_err(|e| Error::TlsConfig(format!("unusable protocol/cipher policy: {e}")))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| Error::TlsConfig(format!("certificate rejected: {e}")))?;

    Ok(Arc::new(config))
}

/// Restrict the ring provider to the configured curves and TLS 1.2 suites.
fn provider_for(settings: &TlsSettings) -> CryptoProvider {
    let base = ring::default_provider();

    let cipher_suites: Vec<SupportedCipherSuite> = if settings.cipher_suites.is_empty() {
        base.cipher_suites.clone()
    } else {
        let selected: Vec<SupportedCipherSuite> = base
            .cipher_suites
            .iter()
            .copied()
            .filter(|suite| match suite {
                // TLS 1.3 suites are not subject to the legacy allow-list.
                SupportedCipherSuite::Tls13(_) => true,
                SupportedCipherSuite::Tls12(_) => {
                    let name = format!("{:?}", suite.suite());
                    settings.cipher_suites.iter().any(|allowed| *allowed == name)
                }
            })
            .collect();
        if !selected
            .iter()
            .any(|s| matches!(s, SupportedCipherSuite::Tls12(_)))
        {
            tracing::warn!(
                "cipher allow-list matches no TLS 1.2 suite offered by the provider"
            );
        }
        selected
    };

    let mut kx_groups = Vec::new();
    for curve in &settings.curve_preferences {
        let name = named_group(*curve);
        match base.kx_groups.iter().find(|group| group.name() == name) {
            Some(group) => kx_groups.push(*group),
            None => {
                tracing::warn!(curve = ?curve, "curve not offered by the TLS provider, skipping")
            }
        }
    }
    if kx_groups.is_empty() {
        kx_groups = base.kx_groups.clone();
    }

    CryptoProvider {
        cipher_suites,
        kx_groups,
        ..base
    }
}

fn named_group(curve: Curve) -> NamedGroup {
    match curve {
        Curve::P256 => NamedGroup::secp256r1,
        Curve::P384 => NamedGroup::secp384r1,
        Curve::P521 => NamedGroup::secp521r1,
    }
}
