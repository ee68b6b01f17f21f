use std::{any::Any, sync::Arc};

use tokio::task::JoinError;

use crate::ListenerId;

/// The single error type for all eventide operations.
///
/// Registration, removal and clearing never fail; errors only come out of
/// listener invocations (and the blocking wrapper's runtime). Listeners report
/// their own failures by returning [`Error::External`], typically built with
/// [`Error::external`]. Panics and cancellations of listener tasks are mapped
/// into variants of this enum so callers only need to handle one error type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("External error: {0}")]
    External(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("{listener} panicked: {message}")]
    ListenerPanicked {
        listener: ListenerId,
        message: String,
    },

    #[error("listener task was cancelled before completing")]
    ListenerCancelled,

    #[error("IO error: {0}")]
    IoError(#[source] Arc<std::io::Error>),

    #[error("Internal eventide error {0}")]
    Internal(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn external(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Arc::new(e))
    }

    pub(crate) fn panicked(listener: ListenerId, payload: Box<dyn Any + Send>) -> Self {
        Error::ListenerPanicked {
            listener,
            message: panic_message(payload),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::External(a), Self::External(b)) => Arc::ptr_eq(a, b),
            (
                Self::ListenerPanicked {
                    listener: a,
                    message: am,
                },
                Self::ListenerPanicked {
                    listener: b,
                    message: bm,
                },
            ) => a == b && am == bm,
            (Self::ListenerCancelled, Self::ListenerCancelled) => true,
            (Self::IoError(a), Self::IoError(b)) => Arc::ptr_eq(a, b),
            (Self::Internal(a), Self::Internal(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

// Listener tasks catch their own panics, so a join error that isn't a
// cancellation means the task wrapper itself failed.
impl From<JoinError> for Error {
    fn from(e: JoinError) -> Self {
        if e.is_cancelled() {
            Error::ListenerCancelled
        } else {
            Error::Internal(Arc::new(e))
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_equality_is_by_pointer() {
        let a = Error::external(std::io::Error::other("x"));
        let b = Error::external(std::io::Error::other("x"));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn panic_message_handles_str_and_string() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42u32)), "unknown panic");
    }

    #[test]
    fn panicked_carries_listener_and_message() {
        let listener = crate::Listener::new(|_: Arc<()>| async { Ok(()) }).id();
        let err = Error::panicked(listener, Box::new("listener blew up"));
        assert_eq!(
            err,
            Error::ListenerPanicked {
                listener,
                message: "listener blew up".into(),
            }
        );
        assert!(err.to_string().contains("listener blew up"));
    }

    #[tokio::test]
    async fn aborted_task_is_cancelled() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let Err(e) = handle.await else {
            panic!("task should have been aborted");
        };
        assert_eq!(Error::from(e), Error::ListenerCancelled);
    }
}
