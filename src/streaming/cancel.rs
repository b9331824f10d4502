//! Cancellation utilities
//!
//! First-class cancel handles for chunk streams and the pipeline that
//! produces them.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::{ChunkStream, ChunkStreamHandle};
use crate::error::DocError;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Streams observing this handle stop at their next
    /// suspension point and drop the backend stream, closing its connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Token shared with spawned producers
    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Build a [`ChunkStreamHandle`] whose cancel aborts both the future that
/// sets the stream up (fetch, parse, provider handshake) and the stream it
/// returns.
///
/// A setup error is yielded as the single item of the stream. Cancelling
/// before setup completes yields a single [`DocError::Cancelled`]; cancelling
/// afterwards ends the stream.
pub fn make_cancellable_stream_handle_from_future<F>(future: F) -> ChunkStreamHandle
where
    F: Future<Output = Result<ChunkStream, DocError>> + Send + 'static,
{
    let cancel = CancelHandle::new();
    let token = cancel.token();

    let s = async_stream::stream! {
        use futures::StreamExt;

        let res = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Generation cancelled before streaming started");
                yield Err(DocError::Cancelled);
                return;
            }
            res = future => res,
        };

        let mut inner = match res {
            Ok(s) => s,
            Err(e) => {
                yield Err(e);
                return;
            }
        };

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Generation cancelled mid-stream");
                    break;
                }
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };

    ChunkStreamHandle {
        stream: Box::pin(s),
        cancel,
    }
}
