/// Marker trait for event payloads.
///
/// Payloads must be `Send + Sync + 'static` because they:
/// - Are wrapped in `Arc<T>` and shared by every listener of one emit (Sync)
/// - Cross task boundaries into spawned listener tasks (Send, 'static)
///
/// Unlike the listener closures, payloads do not need to be `Clone`: a single
/// allocation is handed out to all listeners.
///
/// The trait is implemented for every type meeting those bounds.
///
/// # Example
///
/// ```rust
/// use eventide::{EventKey, Payload};
///
/// #[derive(Debug)]
/// struct UserLoggedIn {
///     name: String,
/// }
///
/// fn assert_payload<T: Payload>() {}
/// assert_payload::<UserLoggedIn>();
///
/// let key: EventKey<UserLoggedIn> = EventKey::named("user.logged_in");
/// # let _ = key;
/// ```
pub trait Payload: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Payload for T {}
