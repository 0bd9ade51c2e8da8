//! # SubMux
//!
//! Channel subscription multiplexing for publish/subscribe transports.
//!
//! - Fully `async`/`await` ready.
//! - Modular, bring your own [`Transport`].
//! - Shares a single transport-level subscription per channel between any
//!   number of listeners, activating and deactivating the transport exactly
//!   on the first-listener and last-listener transitions.
//! - Fans each inbound message back out to the listeners registered for its
//!   channel at the moment of delivery.
//!
//! Construct a [`SubMux`] with the [`Builder`], register listeners with
//! [`SubMux::subscribe`], and feed the transport's inbound messages to
//! [`SubMux::dispatch`] (or drive [`SubMux::pump`] with a message stream).

#![deny(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rustdoc::broken_intra_doc_links
)]
#![allow(clippy::doc_markdown)]
#![forbid(unsafe_code)]

pub use crate::builder::Builder;
pub use crate::dispatch::{MessageStream, ObserverId};
pub use crate::error::Error;
pub use crate::mux::SubMux;
pub use crate::transport::Transport;
pub use json;

pub use async_trait::async_trait;

mod builder;
pub mod data;
mod dispatch;
mod error;
mod mux;
mod registry;
mod transport;

#[cfg(feature = "mock")]
pub mod mock;
