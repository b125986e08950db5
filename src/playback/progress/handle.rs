use super::PlayerEvent;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::sync::mpsc as tokio_mpsc;
use tracing::debug;

type SubscriptionId = u64;

struct Subscription {
    tx: tokio_mpsc::UnboundedSender<PlayerEvent>,
}

/// Fan-out point for controller events
#[derive(Clone, Default)]
pub struct PlayerEventHub {
    subscriptions: Arc<Mutex<HashMap<SubscriptionId, Subscription>>>,
    next_id: Arc<AtomicU64>,
}

impl PlayerEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all controller events.
    /// The subscription is removed on the next emit after the receiver is dropped.
    pub fn subscribe_all(&self) -> tokio_mpsc::UnboundedReceiver<PlayerEvent> {
        let (tx, rx) = tokio_mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut subs) = self.subscriptions.lock() {
            subs.insert(id, Subscription { tx });
        }
        rx
    }

    /// Deliver an event to every live subscriber
    pub fn emit(&self, event: PlayerEvent) {
        let Ok(mut subs) = self.subscriptions.lock() else {
            return;
        };

        let mut to_remove = Vec::new();
        for (id, subscription) in subs.iter() {
            // If send fails, receiver was dropped - mark for removal
            if subscription.tx.send(event.clone()).is_err() {
                to_remove.push(*id);
            }
        }

        for id in to_remove {
            debug!("Dropping closed player event subscription {}", id);
            subs.remove(&id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}
