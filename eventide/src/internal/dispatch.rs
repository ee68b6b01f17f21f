use std::{panic::AssertUnwindSafe, sync::Arc};

use futures_util::FutureExt;
use tokio::task::JoinSet;

use super::Entry;
use crate::{Error, EventKey, FailurePolicy, Label, ListenerId, Payload, Result};

/// A failed invocation. `listener` is `None` when the task itself was lost
/// (cancelled by runtime shutdown) before it could report.
struct Failure {
    listener: Option<ListenerId>,
    error: Error,
}

/// Spawns one task per entry, awaits all of them and applies `policy` to the
/// failures.
///
/// Every spawned task runs to completion before this returns, whatever the
/// policy. Dropping the returned future aborts the tasks still running.
pub(crate) async fn fan_out<T: Payload>(
    key: &EventKey<T>,
    entries: Vec<Entry>,
    payload: Arc<T>,
    policy: FailurePolicy,
) -> Result<()> {
    let mut tasks = JoinSet::new();

    for entry in &entries {
        let Some(listener) = entry.downcast::<T>() else {
            tracing::error!(
                key = %key.label(),
                listener = %entry.id(),
                payload = std::any::type_name::<T>(),
                "listener payload type does not match key, skipping"
            );
            continue;
        };

        let id = listener.id();
        let listener = listener.clone();
        let payload = Arc::clone(&payload);
        tasks.spawn(async move {
            // The closure itself runs under the guard, not just the future it returns.
            let call = AssertUnwindSafe(async move { listener.call(payload).await });
            let error = match call.catch_unwind().await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(error)) => error,
                Err(panic) => Error::panicked(id, panic),
            };
            Err(Failure {
                listener: Some(id),
                error,
            })
        });
    }

    let mut first_failure = None;
    while let Some(joined) = tasks.join_next().await {
        let Failure { listener, error } = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(failure)) => failure,
            Err(e) => Failure {
                listener: None,
                error: Error::from(e),
            },
        };

        match policy {
            FailurePolicy::FailFast if first_failure.is_none() => {
                tracing::debug!(
                    key = %key.label(),
                    listener = ?listener,
                    error = %error,
                    "listener failed, failing emit"
                );
                first_failure = Some(error);
            }
            FailurePolicy::FailFast => {
                tracing::warn!(
                    key = %key.label(),
                    listener = ?listener,
                    error = %error,
                    "additional listener failure suppressed"
                );
            }
            FailurePolicy::Isolate => {
                tracing::warn!(
                    key = %key.label(),
                    listener = ?listener,
                    error = %error,
                    "exception caught in listener"
                );
            }
        }
    }

    match first_failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
