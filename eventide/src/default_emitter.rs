use std::{fmt, sync::Arc};

use crate::{
    EmitterConfig, EventEmitter, EventKey, KeyId, Label, Listener, Payload, Result,
    internal::{Entry, Registry, fan_out},
};

/// The default [`EventEmitter`]: two concurrent registries and a task-per-listener
/// dispatcher.
///
/// # Registries
///
/// Listeners live in one of two registries, both keyed by [`KeyId`]:
///
/// - **persistent** - filled by [`on`](EventEmitter::on), read on every emit
/// - **once** - filled by [`once`](EventEmitter::once), emptied by the first
///   emit for the key
///
/// Both are sharded concurrent maps, so registration, removal and dispatch
/// may happen from any number of tasks or threads, and unrelated keys don't
/// contend on one lock. No lock is held while listeners run: a listener may
/// register, remove or emit on the same emitter.
///
/// # Dispatch
///
/// `emit` snapshots the persistent listeners, takes the once listeners out of
/// their registry in one step, then spawns every listener as its own Tokio
/// task and awaits them all. It must therefore be called from within a Tokio
/// runtime. There is no timeout: a listener that never completes keeps its
/// `emit` pending.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use eventide::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result {
/// let emitter = DefaultEventEmitter::default();
/// let greeting: EventKey<String> = EventKey::named("greeting");
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// emitter.on(&greeting, Listener::new(move |name: Arc<String>| {
///     let sink = sink.clone();
///     async move {
///         sink.lock().unwrap().push(format!("Hello, {name}!"));
///         Ok(())
///     }
/// }));
///
/// emitter.emit(&greeting, "World".to_string()).await?;
/// assert_eq!(*seen.lock().unwrap(), vec!["Hello, World!".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DefaultEventEmitter {
    config: EmitterConfig,
    persistent: Registry,
    once: Registry,
}

impl DefaultEventEmitter {
    /// Create an emitter with the given configuration and no listeners.
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            persistent: Registry::default(),
            once: Registry::default(),
        }
    }

    /// Returns the configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }
}

impl EventEmitter for DefaultEventEmitter {
    fn has_listeners<T: Payload>(&self, key: &EventKey<T>) -> bool {
        self.persistent.contains(key.id()) || self.once.contains(key.id())
    }

    async fn emit<T: Payload>(
        &self,
        key: &EventKey<T>,
        payload: impl Into<Arc<T>> + Send,
    ) -> Result<()> {
        let mut entries = self.persistent.snapshot(key.id());
        let once = self.once.take(key.id());
        if entries.is_empty() && once.is_empty() {
            return Ok(());
        }

        tracing::trace!(
            key = %key.label(),
            persistent = entries.len(),
            once = once.len(),
            "dispatching event"
        );

        entries.extend(once);
        fan_out(key, entries, payload.into(), self.config.failure_policy()).await
    }

    fn on<T: Payload>(&self, key: &EventKey<T>, listener: Listener<T>) {
        self.persistent.push(key.id(), Entry::new(listener));
    }

    fn once<T: Payload>(&self, key: &EventKey<T>, listener: Listener<T>) {
        self.once.push(key.id(), Entry::new(listener));
    }

    fn remove<T: Payload>(&self, listener: &Listener<T>) {
        self.persistent.remove_listener(listener.id());
        self.once.remove_listener(listener.id());
    }

    fn clear(&self, key: Option<KeyId>) {
        match key {
            Some(key) => {
                self.persistent.clear_key(key);
                self.once.clear_key(key);
            }
            None => {
                self.persistent.clear();
                self.once.clear();
            }
        }
    }
}

impl fmt::Debug for DefaultEventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultEventEmitter")
            .field("config", &self.config)
            .field("persistent_keys", &self.persistent.keys())
            .field("once_keys", &self.once.keys())
            .finish()
    }
}
