//! Streaming contract between providers, the orchestrator and callers.
//!
//! A completion is a [`ChunkStream`]: ordered, finite text fragments that
//! concatenate into the final document. Dropping the stream releases the
//! backend connection; [`ChunkStreamHandle`] adds an explicit cancel signal.

pub mod cancel;
pub mod channel;

pub use cancel::{CancelHandle, make_cancellable_stream_handle_from_future};
pub use channel::spawn_chunk_channel;

use std::pin::Pin;

use futures::Stream;

use crate::error::DocError;

/// Lazily produced completion output
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, DocError>> + Send>>;

/// A chunk stream paired with the handle that aborts it
pub struct ChunkStreamHandle {
    pub stream: ChunkStream,
    pub cancel: CancelHandle,
}

impl ChunkStreamHandle {
    pub fn into_parts(self) -> (ChunkStream, CancelHandle) {
        (self.stream, self.cancel)
    }
}

impl std::fmt::Debug for ChunkStreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStreamHandle")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
