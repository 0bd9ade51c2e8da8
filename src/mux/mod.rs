use crate::data::channel::{Name, Prefix};
use crate::data::message::{Fanout, Message};
use crate::data::subscriber;
use crate::dispatch::{self, MessageStream, Observers, ObserverId};
use crate::error::Error;
use crate::registry::{Registry, RegistrationEffect, UnregistrationEffect};
use crate::transport::Transport;
use futures_util::lock::Mutex;
use futures_util::stream::{Stream, StreamExt};
use log::debug;
use std::fmt;
use std::sync::Arc;


/// # Channel subscription multiplexer
///
/// `SubMux` lets any number of listeners share one transport-level
/// subscription per channel. It tracks which listener cares about which
/// channel, calls the transport's `subscribe`/`unsubscribe` exactly on the
/// first-listener and last-listener transitions, and fans each inbound
/// message out to the listeners registered for its channel.
///
/// Listeners are stored as `(id, handle)` pairs. The handle is an opaque
/// reference owned by the caller, typically something cheap to clone, like
/// an `Arc` around a connection. The multiplexer clones the reference into
/// fan-out events and snapshots; it never inspects, mutates, or outlives
/// the thing it refers to.
///
/// Cloning a `SubMux` is cheap and yields a second handle onto the same
/// shared state, so the transport's inbound callback and the application's
/// subscribe calls can live on different tasks.
pub struct SubMux<THandle, TTransport> {
    /// Transport to activate channels on.
    transport: Arc<TTransport>,
    /// Namespace applied to every channel name that reaches the transport.
    prefix: Prefix,
    /// Registry and observer state, shared across clones.
    shared: Arc<Mutex<Shared<THandle>>>,
}

#[derive(Debug)]
struct Shared<T> {
    registry: Registry<T>,
    observers: Observers<T>,
}

impl<THandle, TTransport> SubMux<THandle, TTransport> {
    pub(crate) fn new(transport: TTransport, prefix: Prefix) -> Self {
        Self {
            transport: Arc::new(transport),
            prefix,
            shared: Arc::new(Mutex::new(Shared {
                registry: Registry::new(),
                observers: Observers::new(),
            })),
        }
    }

    /// Get a reference to the transport being used.
    #[must_use]
    pub fn transport(&self) -> &TTransport {
        &self.transport
    }
}

impl<THandle, TTransport> SubMux<THandle, TTransport>
where
    TTransport: Transport,
{
    /// Register a listener for a channel.
    ///
    /// The entry is appended to the channel's list, preserving subscription
    /// order. If the listener is the channel's first, the transport
    /// subscription is activated; otherwise the transport is not touched.
    ///
    /// The id is scoped per channel and its uniqueness is the caller's
    /// responsibility. Registering the same id twice on one channel stores
    /// two independent entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Activate`] when the transport rejects the
    /// activation. The entry is rolled back first, so a failed subscribe
    /// leaves the multiplexer exactly as it was and can simply be retried.
    pub async fn subscribe(
        &self,
        id: subscriber::Id,
        handle: THandle,
        channel: Name,
    ) -> Result<(), Error<TTransport::Error>> {
        let key = self.prefix.apply(&channel);

        // The guard spans the emptiness check and the transport call: two
        // racing first subscribers must not both observe an empty channel.
        let mut shared = self.shared.lock().await;

        let effect = shared.registry.register(key.clone(), id.clone(), handle);
        if let RegistrationEffect::ChannelAdded = effect {
            debug!("activating transport subscription: {}", key);
            if let Err(source) = self.transport.subscribe(key.clone()).await {
                shared.registry.unregister(&key, &id);
                return Err(Error::Activate { channel, source });
            }
        }

        Ok(())
    }

    /// Remove a listener from a channel.
    ///
    /// Removes the earliest entry whose id matches. If it was the channel's
    /// last, the transport subscription is deactivated; otherwise the
    /// transport is not touched. Unsubscribing from a channel that has no
    /// entries, or with an id that never subscribed, is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deactivate`] when the transport rejects the
    /// deactivation. The local removal has already happened at that point;
    /// the channel is no longer tracked, and any messages the transport
    /// keeps delivering for it are dropped on dispatch.
    pub async fn unsubscribe(
        &self,
        id: &subscriber::Id,
        channel: &Name,
    ) -> Result<(), Error<TTransport::Error>> {
        let key = self.prefix.apply(channel);

        let mut shared = self.shared.lock().await;

        match shared.registry.unregister(&key, id) {
            UnregistrationEffect::ChannelRemoved => {
                debug!("deactivating transport subscription: {}", key);
                if let Err(source) = self.transport.unsubscribe(key).await {
                    return Err(Error::Deactivate {
                        channel: channel.clone(),
                        source,
                    });
                }
                Ok(())
            }
            UnregistrationEffect::ChannelRetained | UnregistrationEffect::EntryNotFound => Ok(()),
        }
    }
}

impl<THandle, TTransport> SubMux<THandle, TTransport> {
    /// Snapshot the handles subscribed to a channel, in subscription order.
    ///
    /// The snapshot is independent of the registry: later subscribes and
    /// unsubscribes do not change a vector already returned. A channel with
    /// no subscribers yields an empty vector.
    pub async fn subscribers(&self, channel: &Name) -> Vec<THandle>
    where
        THandle: Clone,
    {
        let key = self.prefix.apply(channel);
        self.shared.lock().await.registry.handles(&key)
    }

    /// Every channel that currently has at least one subscriber.
    ///
    /// Names are logical (de-prefixed); their order is not meaningful.
    pub async fn channels(&self) -> Vec<Name> {
        let shared = self.shared.lock().await;
        shared
            .registry
            .channels()
            .map(|key| self.prefix.strip(key))
            .collect()
    }

    /// Register a fan-out observer.
    ///
    /// The returned stream yields one [`Fanout`] event per inbound message
    /// that found at least one subscriber. Dropping the stream is enough to
    /// stop observing; [`SubMux::remove_observer`] does the same eagerly.
    pub async fn observe(&self) -> MessageStream<THandle> {
        self.shared.lock().await.observers.add()
    }

    /// Deregister a fan-out observer. Unknown ids are ignored.
    pub async fn remove_observer(&self, id: ObserverId) {
        self.shared.lock().await.observers.remove(id);
    }

    /// The number of currently registered fan-out observers.
    pub async fn observer_count(&self) -> usize {
        self.shared.lock().await.observers.len()
    }

    /// React to one inbound transport message.
    ///
    /// The message's channel name is taken as-is, since it is already
    /// transport-scoped, and matched directly against the registry. When
    /// the channel has subscribers, every observer receives one [`Fanout`]
    /// event carrying the logical channel name, the handle snapshot, and
    /// the payload. When it has none (a stale or foreign message), the
    /// message is dropped without an error: on a shared transport that is
    /// the expected case, not a failure.
    pub async fn dispatch(&self, message: Message)
    where
        THandle: Clone,
    {
        let Message { channel, payload } = message;

        let (handles, observers) = {
            let shared = self.shared.lock().await;
            let handles = shared.registry.handles(&channel);
            if handles.is_empty() {
                debug!("no subscribers for channel {}, dropping message", channel);
                return;
            }
            (handles, shared.observers.senders())
        };

        let event = Fanout {
            channel: self.prefix.strip(&channel),
            handles,
            payload,
        };

        // Delivery happens outside the lock; a slow observer must not be
        // able to block subscribe/unsubscribe calls.
        let disconnected = dispatch::deliver(observers, &event).await;

        if !disconnected.is_empty() {
            let mut shared = self.shared.lock().await;
            for id in disconnected {
                shared.observers.remove(id);
            }
        }
    }

    /// Drive [`SubMux::dispatch`] from an inbound message stream until the
    /// stream ends.
    ///
    /// This is the usual way to wire a transport's event source to the
    /// multiplexer: adapt the source into a `Stream` of [`Message`]s and
    /// spawn `pump` next to it.
    pub async fn pump<S>(&self, messages: S)
    where
        S: Stream<Item = Message>,
        THandle: Clone,
    {
        futures_util::pin_mut!(messages);

        while let Some(message) = messages.next().await {
            self.dispatch(message).await;
        }
    }
}

impl<THandle, TTransport> Clone for SubMux<THandle, TTransport> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            prefix: self.prefix.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<THandle, TTransport> fmt::Debug for SubMux<THandle, TTransport> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubMux")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
