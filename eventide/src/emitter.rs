use std::{future::Future, sync::Arc};

use crate::{EventKey, KeyId, Listener, Payload, Result};

/// Contract for typed, asynchronous event emitters.
///
/// Listeners are registered ahead of time against an [`EventKey`]; a later
/// [`emit`](Self::emit) on that key invokes all of them concurrently with the
/// same payload. Listeners come in two lifetimes:
///
/// - [`on`](Self::on) - called on every emit until removed
/// - [`once`](Self::once) - called on the first emit only, then discarded
///
/// [`DefaultEventEmitter`](crate::DefaultEventEmitter) is the implementation
/// shipped with the crate. Types that embed one can implement this trait by
/// delegation and pick up [`emit_with`](Self::emit_with) and the blocking
/// methods of [`EmitBlocking`](crate::EmitBlocking) for free.
///
/// # Ergonomics
///
/// `emit` returns a future but can be implemented as `async fn` directly.
/// No `#[async_trait]` macro is required.
pub trait EventEmitter: Send + Sync {
    /// Returns `true` if at least one listener, persistent or one-shot, is
    /// registered for `key`.
    ///
    /// Producers use this to skip building payloads nobody will see; see
    /// also [`emit_with`](Self::emit_with).
    fn has_listeners<T: Payload>(&self, key: &EventKey<T>) -> bool;

    /// Emits the event identified by `key` with `payload`.
    ///
    /// Every listener registered for `key` runs concurrently and receives a
    /// clone of the same `Arc<T>`. One-shot listeners are deregistered before
    /// any listener runs, so a `once` registration made while this emit is in
    /// flight waits for the next one. Resolves after every invocation has
    /// completed.
    ///
    /// # Errors
    ///
    /// Depends on the emitter's [`FailurePolicy`](crate::FailurePolicy): with
    /// `Isolate` this never fails, with `FailFast` it returns the first
    /// listener failure.
    fn emit<T: Payload>(
        &self,
        key: &EventKey<T>,
        payload: impl Into<Arc<T>> + Send,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Emits the event with a payload built by `builder`, only if someone is
    /// listening.
    ///
    /// `builder` is not called when [`has_listeners`](Self::has_listeners)
    /// reports `false`. Useful when the payload is expensive to build and
    /// it's not certain there will be a listener for that event.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use eventide::*;
    /// # #[tokio::main]
    /// # async fn main() -> Result {
    /// let emitter = DefaultEventEmitter::default();
    /// let report: EventKey<String> = EventKey::named("report");
    ///
    /// emitter
    ///     .emit_with(&report, || unreachable!("no listeners, no report"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    fn emit_with<T, F>(
        &self,
        key: &EventKey<T>,
        builder: F,
    ) -> impl Future<Output = Result<()>> + Send
    where
        T: Payload,
        F: FnOnce() -> T + Send,
    {
        async move {
            if !self.has_listeners(key) {
                return Ok(());
            }
            self.emit(key, builder()).await
        }
    }

    /// Registers `listener` to be called on every emit of `key`.
    ///
    /// Registering the same listener twice creates two entries, and it will
    /// be called twice per emit.
    fn on<T: Payload>(&self, key: &EventKey<T>, listener: Listener<T>);

    /// Registers `listener` to be called on the next emit of `key` only.
    fn once<T: Payload>(&self, key: &EventKey<T>, listener: Listener<T>);

    /// Removes every registration of `listener`, under any key, persistent
    /// and one-shot alike.
    ///
    /// Removing a listener that isn't registered does nothing.
    fn remove<T: Payload>(&self, listener: &Listener<T>);

    /// Discards all listeners for `key`, or every listener when `key` is `None`.
    ///
    /// ```rust
    /// # use eventide::*;
    /// let emitter = DefaultEventEmitter::default();
    /// let key: EventKey<u32> = EventKey::new();
    /// emitter.on(&key, Listener::new(|_: std::sync::Arc<u32>| async { Ok(()) }));
    ///
    /// emitter.clear(Some(key.id()));
    /// assert!(!emitter.has_listeners(&key));
    ///
    /// emitter.clear(None);
    /// ```
    fn clear(&self, key: Option<KeyId>);
}
