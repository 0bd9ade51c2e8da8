use crate::data::message::Fanout;
use futures_channel::mpsc;
use futures_core::Stream;
use futures_util::sink::SinkExt;
use futures_util::task::{Context, Poll};
use log::debug;
use std::pin::Pin;

/// How many undelivered fan-out events a single observer may buffer before
/// dispatch starts awaiting on it.
const FANOUT_BUFFER: usize = 10;

/// Newtype to protect access to the observer ID.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct ObserverId(u64);

/// # Fan-out event stream
///
/// Returned by [`SubMux::observe`]. The stream yields one [`Fanout`] event
/// per inbound message that found at least one subscriber, until the
/// observer is removed with [`SubMux::remove_observer`] or the stream is
/// dropped. A dropped stream is pruned lazily, on the next delivery attempt.
///
/// All observers of one multiplexer share its dispatch path: an observer
/// that stops consuming will, once its buffer fills, block delivery to the
/// others. Consume promptly or remove the observer.
///
/// [`SubMux::observe`]: crate::SubMux::observe
/// [`SubMux::remove_observer`]: crate::SubMux::remove_observer
#[derive(Debug)]
pub struct MessageStream<THandle> {
    pub(crate) id: ObserverId,
    pub(crate) receiver: mpsc::Receiver<Fanout<THandle>>,
}

impl<THandle> MessageStream<THandle> {
    /// The identifier to pass to [`SubMux::remove_observer`].
    ///
    /// [`SubMux::remove_observer`]: crate::SubMux::remove_observer
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }
}

impl<THandle> Stream for MessageStream<THandle> {
    type Item = Fanout<THandle>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Stream::poll_next(Pin::new(&mut self.get_mut().receiver), cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.receiver.size_hint()
    }
}

/// The set of registered fan-out observers.
///
/// Explicitly composed rather than inherited: the multiplexer owns one of
/// these and forwards registration and delivery through it.
#[derive(Debug)]
pub(crate) struct Observers<T> {
    senders: Vec<(ObserverId, mpsc::Sender<Fanout<T>>)>,
    next_id: u64,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a new observer and hand back its event stream.
    pub fn add(&mut self) -> MessageStream<T> {
        let id = ObserverId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::channel(FANOUT_BUFFER);
        self.senders.push((id, sender));

        MessageStream { id, receiver }
    }

    /// Deregister an observer. Unknown ids are ignored.
    pub fn remove(&mut self, id: ObserverId) {
        self.senders.retain(|(observer, _)| *observer != id);
    }

    /// Clone the senders for a delivery pass outside the registry lock.
    pub fn senders(&self) -> Vec<(ObserverId, mpsc::Sender<Fanout<T>>)> {
        self.senders.clone()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }
}

/// Deliver one fan-out event to every observer.
///
/// Returns the ids of observers whose stream is gone, for the caller to
/// prune. Must be called without holding the registry lock: a send awaits
/// when an observer's buffer is full.
pub(crate) async fn deliver<T>(
    observers: Vec<(ObserverId, mpsc::Sender<Fanout<T>>)>,
    event: &Fanout<T>,
) -> Vec<ObserverId>
where
    T: Clone,
{
    let mut disconnected = Vec::new();

    for (id, mut sender) in observers {
        if let Err(error) = sender.send(event.clone()).await {
            // `send` only fails once the receiver is gone.
            debug!("observer {:?} disconnected: {:?}", id, error);
            disconnected.push(id);
        }
    }

    disconnected
}
