use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Payload pushed over a live notification channel
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    /// Short title, mirrors the durable notification title
    pub title: String,

    /// Message body
    pub message: String,

    /// Event kind, e.g. "contact_request"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Registry of live push connections, keyed by user identity
///
/// A connection belongs to exactly one identity's private channel; delivery
/// is addressed by identity and never broadcast. The trait is the seam that
/// lets a clustered pub/sub replace the in-process map without touching the
/// consent workflow.
#[async_trait]
pub trait ChannelRegistry: Send + Sync {
    /// Bind a connection's sender to an identity
    ///
    /// Returns the connection id to pass back to `detach`.
    async fn attach(&self, user_id: &str, sender: UnboundedSender<PushMessage>) -> Uuid;

    /// Drop one connection of an identity
    async fn detach(&self, user_id: &str, connection_id: Uuid);

    /// Best-effort delivery to every live connection of an identity
    ///
    /// An identity without live connections is not an error; the durable
    /// notification remains the source of truth. Returns the number of
    /// connections the message was handed to.
    async fn deliver(&self, user_id: &str, message: PushMessage) -> usize;
}

/// ChannelRegistry for a single-process deployment
#[derive(Default)]
pub struct InMemoryChannelRegistry {
    channels: RwLock<HashMap<String, Vec<(Uuid, UnboundedSender<PushMessage>)>>>,
}

impl InMemoryChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelRegistry for InMemoryChannelRegistry {
    async fn attach(&self, user_id: &str, sender: UnboundedSender<PushMessage>) -> Uuid {
        let connection_id = Uuid::new_v4();
        let mut channels = self.channels.write().await;
        channels
            .entry(user_id.to_string())
            .or_default()
            .push((connection_id, sender));
        connection_id
    }

    async fn detach(&self, user_id: &str, connection_id: Uuid) {
        let mut channels = self.channels.write().await;
        if let Some(connections) = channels.get_mut(user_id) {
            connections.retain(|(id, _)| *id != connection_id);
            if connections.is_empty() {
                channels.remove(user_id);
            }
        }
    }

    async fn deliver(&self, user_id: &str, message: PushMessage) -> usize {
        let mut channels = self.channels.write().await;
        let Some(connections) = channels.get_mut(user_id) else {
            return 0;
        };

        // Sending doubles as pruning: connections whose receiver is gone
        // are dropped from the map
        connections.retain(|(_, sender)| sender.send(message.clone()).is_ok());
        let delivered = connections.len();
        if connections.is_empty() {
            channels.remove(user_id);
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn push() -> PushMessage {
        PushMessage {
            title: "Contact request".to_string(),
            message: "Acme wants to see your contact details".to_string(),
            kind: "contact_request".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delivery_is_scoped_to_the_identity() {
        let registry = InMemoryChannelRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.attach("user-a", tx_a).await;
        registry.attach("user-b", tx_b).await;

        let delivered = registry.deliver("user-a", push()).await;

        assert_eq!(delivered, 1);
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_absent_connections_are_not_an_error() {
        let registry = InMemoryChannelRegistry::new();
        let delivered = registry.deliver("nobody-home", push()).await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_all_connections_of_an_identity_receive_the_push() {
        let registry = InMemoryChannelRegistry::new();
        let (tx_1, mut rx_1) = mpsc::unbounded_channel();
        let (tx_2, mut rx_2) = mpsc::unbounded_channel();
        registry.attach("user-a", tx_1).await;
        registry.attach("user-a", tx_2).await;

        let delivered = registry.deliver("user-a", push()).await;

        assert_eq!(delivered, 2);
        assert!(rx_1.try_recv().is_ok());
        assert!(rx_2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_dead_connections_are_pruned_on_delivery() {
        let registry = InMemoryChannelRegistry::new();
        let (tx_gone, rx_gone) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.attach("user-a", tx_gone).await;
        registry.attach("user-a", tx_live).await;
        drop(rx_gone);

        let delivered = registry.deliver("user-a", push()).await;
        assert_eq!(delivered, 1);
        assert!(rx_live.try_recv().is_ok());

        // The dead sender is gone; only the live one remains
        let delivered = registry.deliver("user-a", push()).await;
        assert_eq!(delivered, 1);
    }

    #[tokio::test]
    async fn test_detach_removes_the_connection() {
        let registry = InMemoryChannelRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = registry.attach("user-a", tx).await;
        registry.detach("user-a", connection_id).await;

        let delivered = registry.deliver("user-a", push()).await;
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
    }
}
