#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Eventide
//!
//! A typed, asynchronous in-process event emitter for Tokio.
//!
//! Eventide decouples the code that announces something happened from the
//! code that reacts to it. Producers emit a payload under an [`EventKey`];
//! every listener registered for that key runs concurrently as its own task,
//! and `emit` resolves once all of them have finished. The payload type is
//! part of the key, so a listener can never be handed the wrong payload.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use eventide::*;
//!
//! #[derive(Debug)]
//! struct UserLoggedIn {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result {
//!     let emitter = DefaultEventEmitter::default();
//!     let logged_in: EventKey<UserLoggedIn> = EventKey::named("user.logged_in");
//!
//!     emitter.on(&logged_in, Listener::new(|event: Arc<UserLoggedIn>| async move {
//!         println!("welcome back, {}", event.name);
//!         Ok(())
//!     }));
//!
//!     emitter
//!         .emit(&logged_in, UserLoggedIn { name: "ada".into() })
//!         .await
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventEmitter`] | Contract: register, remove and emit |
//! | [`DefaultEventEmitter`] | The shipped emitter implementation |
//! | [`EventKey`] | Typed identity of an event, carries its payload type |
//! | [`Listener`] | Async callback with a stable [`ListenerId`] |
//! | [`Payload`] | Marker trait for payload types |
//! | [`EmitterConfig`] | Construction-time settings |
//! | [`FailurePolicy`] | Fail-soft or fail-fast handling of listener errors |
//! | [`EmitBlocking`] | Blocking `emit` for synchronous callers |
//!
//! ## Listener Lifetimes
//!
//! [`EventEmitter::on`] registers a listener for every future emit of a key;
//! [`EventEmitter::once`] for the next one only. One-shot listeners are
//! taken out of the emitter before the emit runs anything, so concurrent
//! emits never invoke the same one-shot registration twice.
//!
//! ## Failure Handling
//!
//! By default a failing or panicking listener is logged and isolated: its
//! siblings still run and `emit` returns `Ok(())`. Build the emitter with
//! [`EmitterConfig::fail_fast`] to get the first failure back instead:
//!
//! ```rust
//! # use std::sync::Arc;
//! # use eventide::*;
//! # #[tokio::main]
//! # async fn main() {
//! let emitter = DefaultEventEmitter::new(EmitterConfig::fail_fast());
//! let key: EventKey<u32> = EventKey::named("checked");
//! emitter.on(&key, Listener::new(|_: Arc<u32>| async {
//!     Err(Error::external(std::io::Error::other("rejected")))
//! }));
//!
//! assert!(emitter.emit(&key, 7u32).await.is_err());
//! # }
//! ```
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`KeyId`], [`ListenerId`],
//!   [`FailurePolicy`] and [`EmitterConfig`]
//!
//! ## Examples
//!
//! See the `examples/` directory of the crate:
//!
//! - `notifications.rs` - persistent and one-shot listeners, both failure policies

mod config;
mod default_emitter;
mod emit_blocking;
mod emitter;
mod error;
mod event_key;
mod failure_policy;
mod key_id;
mod label;
mod listener;
mod payload;

mod internal;

pub use config::EmitterConfig;
pub use default_emitter::DefaultEventEmitter;
pub use emit_blocking::EmitBlocking;
pub use emitter::EventEmitter;
pub use error::Error;
pub use event_key::EventKey;
pub use failure_policy::FailurePolicy;
pub use key_id::KeyId;
pub use label::Label;
pub use listener::{Listener, ListenerId};
pub use payload::Payload;

/// Convenience alias for `Result<T, eventide::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
