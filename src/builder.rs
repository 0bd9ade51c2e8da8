use crate::data::channel::Prefix;
use crate::mux::SubMux;
use crate::transport::Transport;

/// # SubMux builder
///
/// Create a [`SubMux`] using the builder pattern. The transport is the one
/// mandatory component: [`Builder::build`] only exists once a transport has
/// been provided, so a multiplexer without a transport cannot be
/// constructed at all.
#[derive(Debug, Clone)]
pub struct Builder<TTransport = ()> {
    /// Transport to activate channels on.
    transport: TTransport,
    /// Namespace applied at the transport boundary.
    prefix: Prefix,
}

impl<TTransport> Builder<TTransport>
where
    TTransport: Transport,
{
    /// Build the [`SubMux`].
    ///
    /// The handle type is whatever the caller wants to get back out of
    /// fan-out events, typically an `Arc` around the subscribing entity.
    ///
    /// # Example
    ///
    /// ```
    /// use submux::mock::transport::MockTransport;
    /// use submux::Builder;
    ///
    /// let transport = MockTransport::new();
    ///
    /// let mux = Builder::with_transport(transport).build::<&'static str>();
    /// ```
    #[must_use]
    pub fn build<THandle>(self) -> SubMux<THandle, TTransport> {
        let Self { transport, prefix } = self;

        SubMux::new(transport, prefix)
    }
}

impl<TTransport> Builder<TTransport> {
    /// Create a new [`Builder`] with a transport already set.
    ///
    /// # Example
    ///
    /// ```
    /// use submux::mock::transport::MockTransport;
    /// use submux::Builder;
    ///
    /// let mux = Builder::with_transport(MockTransport::new()).build::<&'static str>();
    /// ```
    #[must_use]
    pub fn with_transport(transport: TTransport) -> Self {
        Self {
            transport,
            prefix: Prefix::default(),
        }
    }

    /// Set the transport to use.
    ///
    /// This allows changing the transport type on the builder and,
    /// therefore, on the resulting [`SubMux`].
    #[must_use]
    pub fn transport<U: Transport>(self, transport: U) -> Builder<U> {
        Builder {
            transport,

            // Copy the rest of the fields.
            prefix: self.prefix,
        }
    }

    /// Set the channel namespace prefix.
    ///
    /// Every channel name that reaches the transport carries the prefix;
    /// names reported back to callers have it stripped. Use it to share one
    /// transport between several logical multiplexers.
    ///
    /// # Example
    ///
    /// ```
    /// use submux::data::channel::Prefix;
    /// use submux::mock::transport::MockTransport;
    /// use submux::Builder;
    ///
    /// let mux = Builder::with_transport(MockTransport::new())
    ///     .prefix(Prefix::new("app"))
    ///     .build::<&'static str>();
    /// ```
    #[must_use]
    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }
}

impl Builder<()> {
    /// Create a new [`Builder`] with no transport set.
    ///
    /// # Example
    ///
    /// ```
    /// use submux::mock::transport::MockTransport;
    /// use submux::Builder;
    ///
    /// let mux = Builder::new()
    ///     .transport(MockTransport::new())
    ///     .build::<&'static str>();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(())
    }
}

impl Default for Builder<()> {
    fn default() -> Self {
        Self::new()
    }
}
