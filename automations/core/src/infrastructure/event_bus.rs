// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! In-process event bus.
//!
//! Listeners are held in registration order and invoked sequentially on
//! the emitter's task. A listener failure is logged and isolated; it never
//! prevents the remaining listeners from seeing the event and never
//! reaches the emitter. `emit` itself is infallible.
//!
//! The listener list is snapshotted at the start of each emit, so a
//! registration that races an in-flight emit takes effect on the next
//! emit, and emit never holds the lock across listener calls.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::domain::event::TenantEvent;

/// A consumer of tenant events
#[async_trait]
pub trait EventListener: Send + Sync {
    /// Stable name used in log context
    fn name(&self) -> &str;

    /// Handle one event. Errors are logged by the bus and go no further.
    async fn on_event(&self, event: &TenantEvent) -> anyhow::Result<()>;
}

/// Ordered, broadcast-to-all event bus
pub struct EventBus {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Append a listener. Listeners see events in registration order.
    pub async fn register_listener(&self, listener: Arc<dyn EventListener>) {
        let mut listeners = self.listeners.write().await;
        debug!(listener = listener.name(), "Registering event listener");
        listeners.push(listener);
    }

    /// Number of registered listeners
    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }

    /// Deliver an event to every registered listener, in order
    pub async fn emit(&self, event: &TenantEvent) {
        let snapshot: Vec<Arc<dyn EventListener>> = self.listeners.read().await.clone();

        for listener in snapshot {
            if let Err(e) = listener.on_event(event).await {
                error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    tenant_id = %event.tenant_id,
                    listener = listener.name(),
                    error = %e,
                    "Event listener failed"
                );
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tenant::TenantId;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingListener {
        label: String,
        journal: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventListener for RecordingListener {
        fn name(&self) -> &str {
            &self.label
        }

        async fn on_event(&self, _event: &TenantEvent) -> anyhow::Result<()> {
            self.journal.lock().unwrap().push(self.label.clone());
            if self.fail {
                anyhow::bail!("listener {} broke", self.label);
            }
            Ok(())
        }
    }

    fn listener(label: &str, journal: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<RecordingListener> {
        Arc::new(RecordingListener {
            label: label.to_string(),
            journal: journal.clone(),
            fail,
        })
    }

    #[tokio::test]
    async fn test_emit_without_listeners_is_noop() {
        let bus = EventBus::new();
        let event = TenantEvent::new(TenantId::new(), "user.created", json!({}));
        bus.emit(&event).await;
        assert_eq!(bus.listener_count().await, 0);
    }

    #[tokio::test]
    async fn test_listeners_invoked_in_registration_order() {
        let bus = EventBus::new();
        let journal = Arc::new(Mutex::new(Vec::new()));
        bus.register_listener(listener("first", &journal, false)).await;
        bus.register_listener(listener("second", &journal, false)).await;
        bus.register_listener(listener("third", &journal, false)).await;

        let event = TenantEvent::new(TenantId::new(), "user.created", json!({}));
        bus.emit(&event).await;

        assert_eq!(*journal.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failing_listener_does_not_stop_later_listeners() {
        let bus = EventBus::new();
        let journal = Arc::new(Mutex::new(Vec::new()));
        bus.register_listener(listener("ok-1", &journal, false)).await;
        bus.register_listener(listener("broken", &journal, true)).await;
        bus.register_listener(listener("ok-2", &journal, false)).await;

        let event = TenantEvent::new(TenantId::new(), "doc.updated", json!({}));
        bus.emit(&event).await;

        assert_eq!(*journal.lock().unwrap(), vec!["ok-1", "broken", "ok-2"]);
    }

    #[tokio::test]
    async fn test_every_listener_sees_every_event() {
        let bus = EventBus::new();
        let journal = Arc::new(Mutex::new(Vec::new()));
        bus.register_listener(listener("a", &journal, false)).await;
        bus.register_listener(listener("b", &journal, false)).await;

        for _ in 0..3 {
            let event = TenantEvent::new(TenantId::new(), "tick", json!({}));
            bus.emit(&event).await;
        }

        assert_eq!(journal.lock().unwrap().len(), 6);
    }
}
