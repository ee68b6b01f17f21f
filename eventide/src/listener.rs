use std::{
    fmt,
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use futures_util::{FutureExt, future::BoxFuture};

use crate::{Payload, Result};

/// Identity of a [`Listener`].
///
/// Assigned once by [`Listener::new`] and shared by all clones, so
/// [`EventEmitter::remove`](crate::EventEmitter::remove) can find every entry
/// created from the same listener, whichever key or registry it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static LAST_ID: AtomicU64 = AtomicU64::new(0);
        Self(LAST_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

type Callback<T> = dyn Fn(Arc<T>) -> BoxFuture<'static, Result<()>> + Send + Sync;

/// A callback invoked with the payload of an event.
///
/// Listeners receive the payload as `Arc<T>`: every listener of a single
/// emit gets a clone of the same allocation. The returned future runs in its
/// own Tokio task, so it must be `Send + 'static`; move what it needs out of
/// the `Arc` or clone captured state before the `async move` block.
///
/// Equality is referential. Two listeners built from textually identical
/// closures are different listeners; a clone is the same listener.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use eventide::Listener;
///
/// let audit = Listener::new(|line: Arc<String>| async move {
///     println!("audit: {line}");
///     Ok(())
/// });
///
/// assert_eq!(audit, audit.clone());
/// assert_ne!(audit, Listener::new(|_: Arc<String>| async { Ok(()) }));
/// ```
pub struct Listener<T> {
    id: ListenerId,
    callback: Arc<Callback<T>>,
}

impl<T: Payload> Listener<T> {
    /// Wraps an async closure as a listener with a fresh identity.
    ///
    /// Return `Err` to report a failure; the emitter's
    /// [`FailurePolicy`](crate::FailurePolicy) decides whether it is logged
    /// or handed back to the caller of `emit`.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            id: ListenerId::next(),
            callback: Arc::new(move |payload| f(payload).boxed()),
        }
    }

    /// Returns this listener's identity.
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn call(&self, payload: Arc<T>) -> BoxFuture<'static, Result<()>> {
        (self.callback)(payload)
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Listener<T> {}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("payload", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Error;

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = Listener::new(|_: Arc<u8>| async { Ok(()) });
        let b = Listener::new(|_: Arc<u8>| async { Ok(()) });
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn display_shows_counter_value() {
        let id = Listener::new(|_: Arc<u8>| async { Ok(()) }).id();
        assert_eq!(id.to_string(), format!("listener#{}", id.value()));

        let later = Listener::new(|_: Arc<u8>| async { Ok(()) }).id();
        assert!(later.value() > id.value());
    }

    #[tokio::test]
    async fn call_passes_payload_through() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener = Listener::new(move |n: Arc<u32>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(*n);
                Ok(())
            }
        });

        listener.call(Arc::new(7)).await.unwrap();
        listener.call(Arc::new(9)).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![7, 9]);
    }

    #[tokio::test]
    async fn call_returns_listener_error() {
        let listener = Listener::new(|_: Arc<()>| async {
            Err(Error::external(std::io::Error::other("boom")))
        });
        let err = listener.call(Arc::new(())).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
