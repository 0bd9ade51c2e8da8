use crate::data::channel;
use crate::data::subscriber;
use std::collections::hash_map::{Entry, HashMap};

/// The channel registry: an insertion-ordered multimap from transport-scoped
/// channel names to subscriber entries.
///
/// A channel key is present iff it has at least one subscriber entry; the
/// mutators report the resulting transition as an effect so the caller can
/// drive transport activation from it.
#[derive(Debug)]
pub(crate) struct Registry<T> {
    map: HashMap<channel::Name, Vec<Subscriber<T>>>,
}

/// One subscriber entry: the caller-supplied identifier and the opaque
/// handle it registered. The registry stores the handle and clones it into
/// snapshots; it never inspects it.
#[derive(Debug)]
struct Subscriber<T> {
    id: subscriber::Id,
    handle: T,
}

/// What happened to the channel key when an entry was registered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RegistrationEffect {
    /// The entry is the channel's first: the key was created.
    ChannelAdded,
    /// The channel already had entries.
    ChannelReused,
}

/// What happened to the channel key when an entry was unregistered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum UnregistrationEffect {
    /// The entry was the channel's last: the key was removed.
    ChannelRemoved,
    /// Other entries remain under the channel.
    ChannelRetained,
    /// Nothing matched; the registry is unchanged.
    EntryNotFound,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Append an entry to a channel, creating the channel key if needed.
    pub fn register(
        &mut self,
        channel: channel::Name,
        id: subscriber::Id,
        handle: T,
    ) -> RegistrationEffect {
        let entry = self.map.entry(channel);

        let effect = match &entry {
            Entry::Vacant(_) => RegistrationEffect::ChannelAdded,
            Entry::Occupied(_) => RegistrationEffect::ChannelReused,
        };

        entry.or_default().push(Subscriber { id, handle });

        effect
    }

    /// Remove the earliest entry with a matching id from a channel.
    ///
    /// An unknown channel, or a channel without a matching id, leaves the
    /// registry unchanged.
    pub fn unregister(
        &mut self,
        channel: &channel::Name,
        id: &subscriber::Id,
    ) -> UnregistrationEffect {
        let subscribers = match self.map.get_mut(channel) {
            Some(subscribers) => subscribers,
            None => return UnregistrationEffect::EntryNotFound,
        };

        let position = match subscribers.iter().position(|subscriber| subscriber.id == *id) {
            Some(position) => position,
            None => return UnregistrationEffect::EntryNotFound,
        };
        subscribers.remove(position);

        if subscribers.is_empty() {
            self.map.remove(channel);
            UnregistrationEffect::ChannelRemoved
        } else {
            UnregistrationEffect::ChannelRetained
        }
    }

    /// Snapshot the handles registered for a channel, in subscription order.
    pub fn handles(&self, channel: &channel::Name) -> Vec<T>
    where
        T: Clone,
    {
        self.map
            .get(channel)
            .map(|subscribers| {
                subscribers
                    .iter()
                    .map(|subscriber| subscriber.handle.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate over the channels that currently have entries.
    pub fn channels(&self) -> impl Iterator<Item = &channel::Name> {
        self.map.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, RegistrationEffect, UnregistrationEffect};
    use crate::data::channel;
    use crate::data::subscriber;

    fn name(s: &str) -> channel::Name {
        s.parse().unwrap()
    }

    fn id(s: &str) -> subscriber::Id {
        s.parse().unwrap()
    }

    #[test]
    fn first_registration_adds_channel() {
        let mut registry = Registry::new();
        let effect = registry.register(name("chat"), id("a"), "h1");
        assert_eq!(effect, RegistrationEffect::ChannelAdded);

        let effect = registry.register(name("chat"), id("b"), "h2");
        assert_eq!(effect, RegistrationEffect::ChannelReused);
    }

    #[test]
    fn handles_preserve_subscription_order() {
        let mut registry = Registry::new();
        registry.register(name("chat"), id("c"), "h1");
        registry.register(name("chat"), id("a"), "h2");
        registry.register(name("chat"), id("b"), "h3");

        assert_eq!(registry.handles(&name("chat")), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn last_unregistration_removes_channel() {
        let mut registry = Registry::new();
        registry.register(name("chat"), id("a"), "h1");
        registry.register(name("chat"), id("b"), "h2");

        let effect = registry.unregister(&name("chat"), &id("a"));
        assert_eq!(effect, UnregistrationEffect::ChannelRetained);
        assert_eq!(registry.handles(&name("chat")), vec!["h2"]);

        let effect = registry.unregister(&name("chat"), &id("b"));
        assert_eq!(effect, UnregistrationEffect::ChannelRemoved);
        assert_eq!(registry.channels().count(), 0);
    }

    #[test]
    fn duplicate_ids_unregister_earliest_first() {
        let mut registry = Registry::new();
        registry.register(name("chat"), id("a"), "h1");
        registry.register(name("chat"), id("a"), "h2");

        let effect = registry.unregister(&name("chat"), &id("a"));
        assert_eq!(effect, UnregistrationEffect::ChannelRetained);
        assert_eq!(registry.handles(&name("chat")), vec!["h2"]);
    }

    #[test]
    fn unknown_channel_and_id_are_not_found() {
        let mut registry = Registry::new();
        registry.register(name("chat"), id("a"), "h1");

        assert_eq!(
            registry.unregister(&name("news"), &id("a")),
            UnregistrationEffect::EntryNotFound
        );
        assert_eq!(
            registry.unregister(&name("chat"), &id("z")),
            UnregistrationEffect::EntryNotFound
        );
        assert_eq!(registry.handles(&name("chat")), vec!["h1"]);
        assert_eq!(registry.handles(&name("news")), Vec::<&str>::new());
    }
}
