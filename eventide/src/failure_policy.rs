use std::fmt;

/// Controls what happens when a listener fails during `emit`.
///
/// A listener fails when the future it returns resolves to `Err`, or when
/// its task panics. The policy is fixed when the emitter is built
/// (see [`EmitterConfig`](crate::EmitterConfig)) and applies to every emit.
///
/// # Policies
///
/// | Policy | On listener failure | `emit` returns |
/// |--------|---------------------|----------------|
/// | [`Isolate`](Self::Isolate) | Log a warning, continue | `Ok(())` |
/// | [`FailFast`](Self::FailFast) | Keep the first error | that error |
///
/// # Sibling listeners
///
/// Under both policies, every listener launched by an emit runs to
/// completion before `emit` returns. `FailFast` changes what the caller
/// sees, not which listeners run. Failures after the first one are logged
/// and dropped.
///
/// # Example
///
/// ```rust
/// use eventide::{DefaultEventEmitter, EmitterConfig, FailurePolicy};
///
/// let emitter = DefaultEventEmitter::new(
///     EmitterConfig::default().with_failure_policy(FailurePolicy::FailFast),
/// );
/// assert!(emitter.config().failure_policy().is_fail_fast());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Catch the failure, log it with `tracing::warn!` and keep dispatching.
    ///
    /// One listener's failure never affects its siblings or the caller.
    #[default]
    Isolate,

    /// Hand the first failure back to the caller of `emit`.
    FailFast,
}

impl FailurePolicy {
    /// Returns `true` if this is the [`Isolate`](Self::Isolate) policy.
    pub fn is_isolate(&self) -> bool {
        matches!(self, FailurePolicy::Isolate)
    }

    /// Returns `true` if this is the [`FailFast`](Self::FailFast) policy.
    pub fn is_fail_fast(&self) -> bool {
        matches!(self, FailurePolicy::FailFast)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "Isolate"),
            FailurePolicy::FailFast => write!(f, "FailFast"),
        }
    }
}
