//! Types used across the API surface.

pub mod channel;
pub mod message;
pub mod subscriber;
