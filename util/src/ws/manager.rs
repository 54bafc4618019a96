//! Topic-based broadcast fan-out for the live session feeds.
//!
//! One Tokio broadcast channel per topic, created lazily on first
//! subscription and dropped once a broadcast finds no remaining
//! subscribers. Subscriptions are long-lived; a client tears one down by
//! dropping its receiver (closing the socket).

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

type Topic = String;
type Sender = broadcast::Sender<String>;
type Receiver = broadcast::Receiver<String>;

/// Thread-safe registry of per-topic broadcast channels.
#[derive(Clone, Default)]
pub struct WebSocketManager {
    topics: Arc<RwLock<HashMap<Topic, Sender>>>,
}

impl WebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `topic`, creating its channel if this is the first
    /// subscriber.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(100).0)
            .subscribe()
    }

    /// Broadcasts `msg` to every subscriber of `topic`.
    ///
    /// A topic nobody ever subscribed to is a no-op; a topic whose last
    /// subscriber is gone is removed after the send.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut topics = self.topics.write().await;
        if let Some(sender) = topics.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::debug!("removing topic '{topic}': no subscribers left");
                topics.remove(topic);
            }
        }
    }

    /// Number of live subscribers on `topic`.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.topics.read().await;
        topics.get(topic).map_or(0, |s| s.receiver_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn every_subscriber_receives_a_broadcast() {
        let manager = WebSocketManager::new();
        let topic = "rollcall:course:1";

        let mut a = manager.subscribe(topic).await;
        let mut b = manager.subscribe(topic).await;

        manager.broadcast(topic, "started").await;

        let got_a = timeout(Duration::from_millis(50), a.recv())
            .await
            .unwrap()
            .unwrap();
        let got_b = timeout(Duration::from_millis(50), b.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got_a, "started");
        assert_eq!(got_b, "started");
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let manager = WebSocketManager::new();
        let mut rollcall = manager.subscribe("rollcall:course:1").await;
        let mut buzzer = manager.subscribe("buzzer:course:1").await;

        manager.broadcast("buzzer:course:1", "round open").await;

        let got = timeout(Duration::from_millis(50), buzzer.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got, "round open");
        assert!(timeout(Duration::from_millis(20), rollcall.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_a_noop() {
        let manager = WebSocketManager::new();
        manager.broadcast("nobody-listening", "silent").await;
        assert_eq!(manager.subscriber_count("nobody-listening").await, 0);
    }

    #[tokio::test]
    async fn topic_is_dropped_after_last_subscriber_leaves() {
        let manager = WebSocketManager::new();
        let topic = "rollcall:session:9";
        {
            let _rx = manager.subscribe(topic).await;
        }
        manager.broadcast(topic, "cleanup").await;
        assert_eq!(manager.subscriber_count(topic).await, 0);
        assert!(manager.topics.read().await.get(topic).is_none());
    }
}
