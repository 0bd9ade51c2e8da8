use crate::data::channel;
use thiserror::Error;

/// An error that surfaced from the transport during a registry operation.
///
/// Channels are reported by their logical (caller-facing) names; the
/// transport call that failed used the transport-scoped form.
#[derive(Debug, Error)]
pub enum Error<TTransportError>
where
    TTransportError: std::error::Error + 'static,
{
    /// The transport failed to activate delivery for a channel that just
    /// got its first subscriber. The subscription was rolled back: the
    /// registry does not track the entry, and the caller may retry.
    #[error("transport failed to activate channel {channel}: {source}")]
    Activate {
        /// The channel whose activation failed.
        channel: channel::Name,
        /// The underlying transport error.
        #[source]
        source: TTransportError,
    },

    /// The transport failed to deactivate delivery for a channel that just
    /// lost its last subscriber. The registry no longer tracks the channel;
    /// anything the transport keeps delivering for it is dropped on
    /// dispatch.
    #[error("transport failed to deactivate channel {channel}: {source}")]
    Deactivate {
        /// The channel whose deactivation failed.
        channel: channel::Name,
        /// The underlying transport error.
        #[source]
        source: TTransportError,
    },
}

impl<TTransportError> Error<TTransportError>
where
    TTransportError: std::error::Error + 'static,
{
    /// The logical name of the channel the failed operation was about.
    #[must_use]
    pub fn channel(&self) -> &channel::Name {
        match self {
            Error::Activate { channel, .. } | Error::Deactivate { channel, .. } => channel,
        }
    }
}
