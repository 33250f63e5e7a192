//! Graceful stop for the boundary service.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM ──▶ signals::spawn_signal_listener ──▶ Shutdown::trigger
//!                                                           │
//!                         HttpServer::run (drains in-flight requests) ◀──┘
//! ```
//!
//! Tests skip the signal listener and call `trigger` directly.

use tokio::sync::broadcast;

/// Stop signal shared by the signal listener and the HTTP server.
///
/// Cloning shares the same channel. A receiver taken with `subscribe` only
/// sees triggers sent after it was created, so the server subscribes before
/// the listener is spawned.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver handed to [`crate::HttpServer::run`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask the server to stop accepting connections and drain.
    /// A trigger with nobody subscribed is dropped.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clone_triggers_the_original_subscribers() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();

        shutdown.clone().trigger();

        assert!(server.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_trigger_reaches_all_subscribers() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_subscribers_is_harmless() {
        Shutdown::default().trigger();
    }
}
