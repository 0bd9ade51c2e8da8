//! Message and fan-out event types.

use super::channel;
use json::JsonValue;

/// An inbound transport message.
///
/// This is what the embedding application hands to [`SubMux::dispatch`] when
/// the transport reports a message. The channel name is transport-scoped: it
/// carries the process prefix exactly as it appeared on the wire.
///
/// [`SubMux::dispatch`]: crate::SubMux::dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Origin channel, in its transport-scoped (prefixed) form.
    pub channel: channel::Name,
    /// Opaque message payload. The multiplexer never inspects it.
    pub payload: JsonValue,
}

/// A fan-out event.
///
/// Yielded by [`MessageStream`] once per inbound message that had at least
/// one subscriber at the moment of delivery. Carries the handles of every
/// subscriber registered for the channel at that moment, in subscription
/// order.
///
/// [`MessageStream`]: crate::MessageStream
#[derive(Debug, Clone, PartialEq)]
pub struct Fanout<THandle> {
    /// Origin channel, in its logical (de-prefixed) form.
    pub channel: channel::Name,
    /// Handles subscribed to the channel when the message arrived.
    pub handles: Vec<THandle>,
    /// Opaque message payload, as received from the transport.
    pub payload: JsonValue,
}
