//! Shutdown coordination.
//!
//! External shutdown sources (SIGTERM handlers, admin endpoints, tests)
//! trigger the coordinator with a drain deadline; a supervisor task
//! subscribes and drives [`HttpServer::shutdown`](super::HttpServer::shutdown)
//! with it.

use std::time::Duration;

use tokio::sync::broadcast;

/// Broadcast coordinator for graceful shutdown.
///
/// Any number of long-running tasks can subscribe; the payload of each
/// request is the deadline for draining in-flight work.
pub struct Shutdown {
    tx: broadcast::Sender<Duration>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to shutdown requests.
    pub fn subscribe(&self) -> broadcast::Receiver<Duration> {
        self.tx.subscribe()
    }

    /// Request shutdown with the given drain deadline.
    pub fn trigger(&self, deadline: Duration) {
        let _ = self.tx.send(deadline);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
