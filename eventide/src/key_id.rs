use std::{fmt, hash};
use uuid::Uuid;

/// Type-erased identity of an [`EventKey`](crate::EventKey).
///
/// Every key created with [`EventKey::new`](crate::EventKey::new) or
/// [`EventKey::named`](crate::EventKey::named) draws a fresh random id, so two
/// keys never share one unless one is a clone of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyId(u128);

impl KeyId {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(KeyId::new(), KeyId::new());
    }

    #[test]
    fn display_is_uuid() {
        let id = KeyId::new();
        let shown = id.to_string();
        assert_eq!(Uuid::parse_str(&shown).ok().map(|u| u.as_u128()), Some(id.value()));
    }
}
