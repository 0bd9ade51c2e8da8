//! End-to-end multiplexing over an in-process transport.

use async_trait::async_trait;
use futures_executor::block_on;
use futures_util::stream;
use futures_util::StreamExt;
use json::object;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use submux::data::channel::{Name, Prefix};
use submux::data::message::Message;
use submux::data::subscriber;
use submux::{Builder, Transport};

/// An in-process transport that tracks which channels are currently active.
///
/// Stands in for a real broker client: activation order is deterministic
/// and observable, and there is no network involved.
#[derive(Debug, Default)]
struct InProcessTransport {
    active: Mutex<Vec<Name>>,
}

impl InProcessTransport {
    fn active(&self) -> Vec<Name> {
        self.active.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    type Error = Infallible;

    async fn subscribe(&self, channel: Name) -> Result<(), Self::Error> {
        self.active.lock().unwrap().push(channel);
        Ok(())
    }

    async fn unsubscribe(&self, channel: Name) -> Result<(), Self::Error> {
        self.active
            .lock()
            .unwrap()
            .retain(|active| *active != channel);
        Ok(())
    }
}

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn id(s: &str) -> subscriber::Id {
    s.parse().unwrap()
}

#[test]
fn multiplexes_listeners_over_one_transport() {
    block_on(async {
        let mux = Builder::with_transport(InProcessTransport::default())
            .prefix(Prefix::new("app"))
            .build::<Arc<String>>();

        let h1 = Arc::new("socket-1".to_string());
        let h2 = Arc::new("socket-2".to_string());
        let h3 = Arc::new("socket-3".to_string());

        mux.subscribe(id("s1"), Arc::clone(&h1), name("chat"))
            .await
            .unwrap();
        mux.subscribe(id("s2"), Arc::clone(&h2), name("chat"))
            .await
            .unwrap();
        mux.subscribe(id("s3"), Arc::clone(&h3), name("news"))
            .await
            .unwrap();

        // One transport-level subscription per channel, transport-scoped.
        assert_eq!(
            mux.transport().active(),
            vec![name("app:chat"), name("app:news")]
        );

        let mut events = mux.observe().await;

        let inbound = stream::iter(vec![
            Message {
                channel: name("app:chat"),
                payload: object! { "text": "hi" },
            },
            Message {
                // Nobody here listens to this one; it is someone else's.
                channel: name("app:audit"),
                payload: object! { "text": "stale" },
            },
            Message {
                channel: name("app:news"),
                payload: object! { "text": "breaking" },
            },
        ]);
        mux.pump(inbound).await;

        let event = events.next().await.unwrap();
        assert_eq!(event.channel, name("chat"));
        assert_eq!(event.handles, vec![Arc::clone(&h1), Arc::clone(&h2)]);
        assert_eq!(event.payload, object! { "text": "hi" });

        let event = events.next().await.unwrap();
        assert_eq!(event.channel, name("news"));
        assert_eq!(event.handles, vec![Arc::clone(&h3)]);

        // Draining a channel only deactivates that channel.
        mux.unsubscribe(&id("s1"), &name("chat")).await.unwrap();
        assert_eq!(
            mux.transport().active(),
            vec![name("app:chat"), name("app:news")]
        );

        mux.unsubscribe(&id("s2"), &name("chat")).await.unwrap();
        assert_eq!(mux.transport().active(), vec![name("app:news")]);

        mux.unsubscribe(&id("s3"), &name("news")).await.unwrap();
        assert!(mux.transport().active().is_empty());
        assert!(mux.channels().await.is_empty());
    });
}
