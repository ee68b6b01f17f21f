use std::{borrow::Cow, fmt, hash, marker::PhantomData};

use crate::{KeyId, Label, Payload};

/// Typed identity of an event channel.
///
/// A key does two things: it uniquely identifies an event, and it fixes the
/// payload type `T` that listeners for that event receive. The emitter uses
/// the key's [`KeyId`] for lookup and its `T` to recover typed listeners, so a
/// listener registered for `EventKey<String>` can never be handed a payload of
/// another type.
///
/// Identity is per instance, not structural. Two keys created separately are
/// never equal, even if both carry `String` payloads and the same name.
/// Cloning a key yields another handle to the same identity.
///
/// Keys are usually created once by whoever defines the event and shared for
/// the emitter's lifetime, e.g. through a `static`:
///
/// ```rust
/// use std::sync::LazyLock;
/// use eventide::EventKey;
///
/// #[derive(Debug)]
/// struct OrderPlaced {
///     id: u64,
/// }
///
/// static ORDER_PLACED: LazyLock<EventKey<OrderPlaced>> =
///     LazyLock::new(|| EventKey::named("order.placed"));
///
/// let other: EventKey<OrderPlaced> = EventKey::named("order.placed");
/// assert_ne!(*ORDER_PLACED, other);
/// assert_eq!(*ORDER_PLACED, ORDER_PLACED.clone());
/// ```
pub struct EventKey<T> {
    id: KeyId,
    name: Option<Cow<'static, str>>,
    _payload: PhantomData<fn() -> T>, // covariant, always Send + Sync
}

impl<T: Payload> EventKey<T> {
    /// Create a new, unnamed key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: KeyId::new(),
            name: None,
            _payload: PhantomData,
        }
    }

    /// Create a new key with a diagnostic name.
    ///
    /// The name only shows up in logs. It takes no part in identity.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: KeyId::new(),
            name: Some(name.into()),
            _payload: PhantomData,
        }
    }
}

impl<T> EventKey<T> {
    /// Returns the type-erased identity of this key.
    #[inline]
    pub fn id(&self) -> KeyId {
        self.id
    }

    /// Returns the diagnostic name, if the key was created with one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<T: Payload> Default for EventKey<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventKey<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            _payload: PhantomData,
        }
    }
}

impl<T> PartialEq for EventKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EventKey<T> {}

impl<T> hash::Hash for EventKey<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> Label for EventKey<T> {
    fn label(&self) -> Cow<'static, str> {
        match &self.name {
            Some(name) => name.clone(),
            None => Cow::Owned(self.id.to_string()),
        }
    }
}

impl<T> fmt::Debug for EventKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("payload", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn separately_created_keys_differ() {
        let a: EventKey<String> = EventKey::named("same");
        let b: EventKey<String> = EventKey::named("same");
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_shares_identity() {
        let a: EventKey<u32> = EventKey::new();
        let b = a.clone();
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn label_prefers_name() {
        let named: EventKey<()> = EventKey::named("ping");
        assert_eq!(named.label(), "ping");
        assert_eq!(named.name(), Some("ping"));

        let unnamed: EventKey<()> = EventKey::new();
        assert_eq!(unnamed.label(), unnamed.id().to_string());
        assert_eq!(unnamed.name(), None);
    }

    #[test]
    fn debug_includes_payload_type() {
        let key: EventKey<String> = EventKey::named("debug");
        let debug_str = format!("{:?}", key);
        assert!(debug_str.contains("EventKey"));
        assert!(debug_str.contains("debug"));
        assert!(debug_str.contains("String"));
    }
}
