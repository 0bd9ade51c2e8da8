//! [`Transport`] mocks.

use crate::data::channel;
use crate::Transport;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use mockall::mock;

/// A dummy error used by the [`MockTransport`].
#[allow(missing_copy_implementations)]
#[derive(Debug, Error)]
#[error("mock transport error")]
pub struct MockTransportError;

mod gen {
    #![allow(missing_docs)]
    use super::*;

    mock! {
        pub Transport {
            fn mock_workaround_subscribe(
                &self,
                channel: channel::Name,
            ) -> Pin<Box<dyn Future<Output = Result<(), MockTransportError>> + Send + 'static>> {}

            fn mock_workaround_unsubscribe(
                &self,
                channel: channel::Name,
            ) -> Pin<Box<dyn Future<Output = Result<(), MockTransportError>> + Send + 'static>> {}
        }
    }
}
pub use gen::*;

// We implement the mock manually cause `mockall` doesn't support `async_trait` yet.
#[async_trait]
impl Transport for MockTransport {
    type Error = MockTransportError;

    async fn subscribe(&self, channel: channel::Name) -> Result<(), Self::Error> {
        self.mock_workaround_subscribe(channel).await
    }

    async fn unsubscribe(&self, channel: channel::Name) -> Result<(), Self::Error> {
        self.mock_workaround_unsubscribe(channel).await
    }
}
