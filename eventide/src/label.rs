use std::borrow::Cow;

/// Human-readable label for diagnostics.
///
/// The emitter attaches the label of an [`EventKey`](crate::EventKey) to every
/// log record it writes for that key, so a named key shows up as
/// `key=user.logged_in` instead of a bare UUID.
///
/// # Example
///
/// ```rust
/// use eventide::{EventKey, Label};
///
/// let key: EventKey<String> = EventKey::named("greeting");
/// assert_eq!(key.label(), "greeting");
/// ```
pub trait Label {
    /// Returns a human-readable label for this item.
    fn label(&self) -> Cow<'static, str>;
}
