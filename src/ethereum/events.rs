//! Single-slot event subscriptions.
//!
//! Each event name has at most one active watcher. Registering a new
//! callback aborts the previous watcher; registering `None` clears the slot.

use std::sync::Arc;

use alloy::{
    contract::Event,
    network::Ethereum,
    rpc::types::Log,
    sol_types::SolEvent,
};
use dashmap::DashMap;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::{error::Result, ethereum::HttpProvider};

/// Callback invoked with a decoded event and the log it came from.
pub type EventCallback<E> = Arc<dyn Fn(E, Log) + Send + Sync>;

/// Watcher tasks keyed by event name.
#[derive(Default)]
pub struct EventSubscriptions {
    slots: DashMap<&'static str, JoinHandle<()>>,
}

impl EventSubscriptions {
    /// Create an empty set of subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `handle` in the slot for `name`, aborting whatever was there.
    pub fn replace(&self, name: &'static str, handle: Option<JoinHandle<()>>) {
        let previous = match handle {
            Some(handle) => self.slots.insert(name, handle),
            None => self.slots.remove(name).map(|(_, handle)| handle),
        };

        if let Some(previous) = previous {
            previous.abort();
            tracing::debug!(event = name, "Previous event listener removed");
        }
    }

    /// Watch `filter` and call `callback` for each decoded event.
    ///
    /// The filter is installed before the listener takes the slot, so a
    /// failure is returned and leaves any previous listener in place.
    pub async fn watch<E>(
        &self,
        name: &'static str,
        filter: Event<&HttpProvider, E, Ethereum>,
        callback: Option<EventCallback<E>>,
    ) -> Result<()>
    where
        E: SolEvent + Send + Sync + 'static,
    {
        let Some(callback) = callback else {
            self.replace(name, None);
            return Ok(());
        };

        let poller = filter.watch().await.inspect_err(|e| {
            tracing::warn!(event = name, error = %e, "Failed to install event filter");
        })?;

        let handle = tokio::spawn(async move {
            let mut stream = poller.into_stream();
            while let Some(item) = stream.next().await {
                match item {
                    Ok((event, log)) => callback(event, log),
                    Err(e) => tracing::warn!(event = name, error = %e, "Failed to decode event"),
                }
            }
            tracing::debug!(event = name, "Event stream ended");
        });

        tracing::debug!(event = name, "Event listener registered");
        self.replace(name, Some(handle));
        Ok(())
    }

    /// Whether a listener is registered for `name`.
    pub fn is_active(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Abort every listener.
    pub fn clear(&self) {
        self.slots.retain(|_, handle| {
            handle.abort();
            false
        });
    }
}

impl Drop for EventSubscriptions {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for EventSubscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.slots.iter().map(|entry| *entry.key()).collect();
        f.debug_struct("EventSubscriptions").field("active", &names).finish()
    }
}
