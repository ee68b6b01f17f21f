use std::{any::Any, sync::Arc};

use dashmap::DashMap;

use crate::{KeyId, Listener, ListenerId, Payload};

/// A registered listener with its payload type erased.
///
/// `listener` always holds a `Listener<T>` for the `T` of the key it was
/// registered under; [`Entry::downcast`] recovers it.
#[derive(Clone)]
pub(crate) struct Entry {
    id: ListenerId,
    listener: Arc<dyn Any + Send + Sync>,
}

impl Entry {
    pub(crate) fn new<T: Payload>(listener: Listener<T>) -> Self {
        Self {
            id: listener.id(),
            listener: Arc::new(listener),
        }
    }

    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn downcast<T: Payload>(&self) -> Option<&Listener<T>> {
        self.listener.downcast_ref::<Listener<T>>()
    }
}

/// Listener entries grouped by event key.
///
/// Backed by a sharded concurrent map, so registrations and dispatch on
/// unrelated keys rarely contend. Shard guards never escape a method: callers
/// get owned snapshots and can await freely.
#[derive(Default)]
pub(crate) struct Registry {
    entries: DashMap<KeyId, Vec<Entry>>,
}

impl Registry {
    pub(crate) fn push(&self, key: KeyId, entry: Entry) {
        self.entries.entry(key).or_default().push(entry);
    }

    pub(crate) fn contains(&self, key: KeyId) -> bool {
        self.entries
            .get(&key)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Copies the current entries for `key`, leaving them registered.
    pub(crate) fn snapshot(&self, key: KeyId) -> Vec<Entry> {
        self.entries
            .get(&key)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Removes and returns the entries for `key` in one step.
    ///
    /// An entry pushed concurrently either lands in the returned set or in a
    /// fresh set left behind for the next call, never both.
    pub(crate) fn take(&self, key: KeyId) -> Vec<Entry> {
        self.entries
            .remove(&key)
            .map(|(_, entries)| entries)
            .unwrap_or_default()
    }

    /// Drops every entry for `listener` under any key, along with keys left empty.
    pub(crate) fn remove_listener(&self, listener: ListenerId) {
        self.entries.retain(|_, entries| {
            entries.retain(|entry| entry.id != listener);
            !entries.is_empty()
        });
    }

    pub(crate) fn clear_key(&self, key: KeyId) {
        self.entries.remove(&key);
    }

    pub(crate) fn clear(&self) {
        self.entries.clear();
    }

    pub(crate) fn keys(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventKey;

    fn listener() -> Listener<String> {
        Listener::new(|_: Arc<String>| async { Ok(()) })
    }

    #[test]
    fn push_and_snapshot_keep_duplicates_in_order() {
        let registry = Registry::default();
        let key = EventKey::<String>::new().id();
        let a = listener();
        let b = listener();

        registry.push(key, Entry::new(a.clone()));
        registry.push(key, Entry::new(b.clone()));
        registry.push(key, Entry::new(a.clone()));

        let ids: Vec<_> = registry.snapshot(key).iter().map(Entry::id).collect();
        assert_eq!(ids, vec![a.id(), b.id(), a.id()]);
        assert!(registry.contains(key));
    }

    #[test]
    fn take_empties_the_key() {
        let registry = Registry::default();
        let key = EventKey::<String>::new().id();
        registry.push(key, Entry::new(listener()));

        assert_eq!(registry.take(key).len(), 1);
        assert!(!registry.contains(key));
        assert!(registry.take(key).is_empty());
    }

    #[test]
    fn remove_listener_spans_keys_and_drops_empty_collections() {
        let registry = Registry::default();
        let k1 = EventKey::<String>::new().id();
        let k2 = EventKey::<String>::new().id();
        let gone = listener();
        let kept = listener();

        registry.push(k1, Entry::new(gone.clone()));
        registry.push(k1, Entry::new(gone.clone()));
        registry.push(k2, Entry::new(gone.clone()));
        registry.push(k2, Entry::new(kept.clone()));

        registry.remove_listener(gone.id());

        assert!(!registry.contains(k1));
        assert_eq!(registry.keys(), 1);
        let ids: Vec<_> = registry.snapshot(k2).iter().map(Entry::id).collect();
        assert_eq!(ids, vec![kept.id()]);
    }

    #[test]
    fn downcast_recovers_typed_listener() {
        let typed = listener();
        let entry = Entry::new(typed.clone());
        assert_eq!(entry.downcast::<String>(), Some(&typed));
        assert!(entry.downcast::<u32>().is_none());
    }

    #[test]
    fn clear_key_and_clear() {
        let registry = Registry::default();
        let k1 = EventKey::<String>::new().id();
        let k2 = EventKey::<String>::new().id();
        registry.push(k1, Entry::new(listener()));
        registry.push(k2, Entry::new(listener()));

        registry.clear_key(k1);
        assert!(!registry.contains(k1));
        assert!(registry.contains(k2));

        registry.clear();
        assert_eq!(registry.keys(), 0);
    }
}
