use crate::FailurePolicy;

/// Construction-time configuration for [`DefaultEventEmitter`](crate::DefaultEventEmitter).
///
/// Use the builder methods to customize, or [`Default`] for a fail-soft
/// emitter.
///
/// # Examples
///
/// ```rust
/// use eventide::{EmitterConfig, FailurePolicy};
///
/// let config = EmitterConfig::default().with_failure_policy(FailurePolicy::FailFast);
/// assert_eq!(config, EmitterConfig::fail_fast());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitterConfig {
    /// What `emit` does when a listener fails.
    /// Default: [`FailurePolicy::Isolate`]
    failure_policy: FailurePolicy,
}

impl EmitterConfig {
    /// Configuration for an emitter that returns the first listener failure.
    pub fn fail_fast() -> Self {
        Self::default().with_failure_policy(FailurePolicy::FailFast)
    }

    /// Set the listener failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Returns the listener failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}
