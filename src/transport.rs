use crate::data::channel;
use async_trait::async_trait;

/// Transport abstracts away the underlying publish/subscribe provider the
/// multiplexer activates channels on.
///
/// The multiplexer only ever needs two capabilities: turning delivery for a
/// channel on and off. Channel names handed to a transport are always in
/// their transport-scoped (prefixed) form.
///
/// Inbound messages do not travel through this trait. The embedding
/// application wires whatever event source the transport provides to
/// [`SubMux::dispatch`] or [`SubMux::pump`].
///
/// Both calls are fire-and-forget from the multiplexer's point of view: an
/// `Ok` means the transport accepted the request, not that the remote end
/// confirmed it. Connection handling, retries, and authentication are the
/// transport's business.
///
/// [`SubMux::dispatch`]: crate::SubMux::dispatch
/// [`SubMux::pump`]: crate::SubMux::pump
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport-specific error type this transport can generate.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Activate delivery of inbound messages for a channel.
    async fn subscribe(&self, channel: channel::Name) -> Result<(), Self::Error>;

    /// Deactivate delivery of inbound messages for a channel.
    async fn unsubscribe(&self, channel: channel::Name) -> Result<(), Self::Error>;
}
