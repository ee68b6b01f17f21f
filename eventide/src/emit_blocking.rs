use std::sync::Arc;

use tokio::runtime::{Builder, Handle};

use crate::{EventEmitter, EventKey, Payload, Result};

/// Synchronous entry points to [`EventEmitter::emit`].
///
/// Implemented for every [`EventEmitter`], so calling code outside of any
/// async context only needs this trait in scope. Both methods block the
/// current thread until every listener has completed and return exactly what
/// `emit` would.
///
/// ```rust
/// use std::sync::Arc;
/// use eventide::*;
///
/// let emitter = DefaultEventEmitter::default();
/// let shutdown: EventKey<()> = EventKey::named("shutdown");
/// emitter.once(&shutdown, Listener::new(|_: Arc<()>| async { Ok(()) }));
///
/// emitter.emit_blocking(&shutdown, ())?;
/// # Ok::<(), eventide::Error>(())
/// ```
pub trait EmitBlocking: EventEmitter {
    /// Runs `emit` to completion on a private current-thread runtime.
    ///
    /// A new runtime is built per call; prefer
    /// [`emit_blocking_on`](Self::emit_blocking_on) when one is already
    /// available.
    ///
    /// # Errors
    ///
    /// [`Error::IoError`](crate::Error::IoError) if the runtime can't be
    /// built, otherwise the outcome of `emit`.
    ///
    /// # Panics
    ///
    /// When called from within an async execution context.
    fn emit_blocking<T: Payload>(
        &self,
        key: &EventKey<T>,
        payload: impl Into<Arc<T>> + Send,
    ) -> Result<()> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.emit(key, payload))
    }

    /// Runs `emit` to completion on the runtime behind `handle`.
    ///
    /// # Panics
    ///
    /// When called from within an async execution context.
    fn emit_blocking_on<T: Payload>(
        &self,
        handle: &Handle,
        key: &EventKey<T>,
        payload: impl Into<Arc<T>> + Send,
    ) -> Result<()> {
        handle.block_on(self.emit(key, payload))
    }
}

impl<E: EventEmitter> EmitBlocking for E {}
