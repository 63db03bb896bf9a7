//! # Signals
//!
//! A small, type-keyed signal hub used to announce property changes and deprecations.
//!
//! ## Overview
//!
//! Every signal type owns one slot in the [`SignalHub`]. A slot fans out to:
//!
//! * **Listeners**: synchronous callbacks, invoked inline by [`SignalHub::emit`].
//! * **Subscribers**: `tokio` broadcast receivers for consumers living on an async runtime.
//!
//! Cloning a hub is cheap; every clone shares the same registry.
//!
//! # Example
//!
//! ```rust
//! use pmark_signals::{SignalHub, SignalReceiverExt, SignalError};
//!
//! #[derive(Debug)]
//! struct Changed { name: &'static str }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), SignalError> {
//!     let hub = SignalHub::new();
//!     let mut rx = hub.subscribe::<Changed>()?;
//!
//!     hub.emit(Changed { name: "text_color" })?;
//!
//!     let signal = rx.recv_signal().await.expect("hub is open");
//!     assert_eq!(signal.name, "text_color");
//!     Ok(())
//! }
//! ```

mod error;
mod hub;
mod receiver;

pub use error::{SignalError, SignalErrorExt};
pub use hub::{DEFAULT_CAPACITY, ListenerId, Signal, SignalHub};
pub use receiver::SignalReceiverExt;
