//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! cert/key PEM files + TlsSettings
//!     → tls.rs (parse material, map policy onto the rustls provider)
//!     → axum-server RustlsConfig
//!     → TLS listener
//! ```
//!
//! # Design Decisions
//! - TLS is optional; the lifecycle selects plain or TLS from config
//! - Policy entries the provider does not offer are skipped with a
//!   warning, never a startup failure

pub mod tls;
