//! Server lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (server.rs):
//!     Validate config → Compile routes → Wrap middleware → Bind listener
//!
//! Shutdown (server.rs, shutdown.rs):
//!     Trigger observed → Stop accepting → Drain in-flight up to deadline
//!     → Force-close the rest → Release listener
//! ```
//!
//! # Design Decisions
//! - One state chain per server: Created → Listening → ShuttingDown → Stopped
//! - `start` occupies the calling task until shutdown completes; shutdown
//!   is invoked from another task
//! - Shutdown overruns are reported as warnings, never errors
//! - The core never installs process signal handlers; external sources
//!   drive the shutdown coordinator

pub mod server;
pub mod shutdown;

pub use server::{serve, HttpServer};
pub use shutdown::Shutdown;
