//! Producer/consumer channel for completion output.
//!
//! The backend stream is driven by a spawned task that forwards fragments
//! over a bounded channel. A slow consumer applies backpressure to the
//! backend. The task exits, dropping the backend stream and its connection,
//! when the stream ends or errors, the receiver is dropped, or the cancel
//! handle fires.

use futures::StreamExt;
use tokio::sync::mpsc;

use super::{CancelHandle, ChunkStream};

/// Move `inner` onto a bounded channel and return the receiving side.
///
/// Must be called inside a Tokio runtime.
pub fn spawn_chunk_channel(inner: ChunkStream, capacity: usize, cancel: &CancelHandle) -> ChunkStream {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let token = cancel.token();

    tokio::spawn(async move {
        let mut inner = inner;
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("Chunk producer cancelled");
                    break;
                }
                _ = tx.closed() => {
                    tracing::debug!("Chunk consumer went away, releasing backend stream");
                    break;
                }
                item = inner.next() => {
                    let Some(item) = item else { break };
                    // An error terminates the sequence.
                    let terminal = item.is_err();
                    tokio::select! {
                        _ = token.cancelled() => break,
                        sent = tx.send(item) => {
                            if sent.is_err() || terminal {
                                break;
                            }
                        }
                    }
                }
            }
        }
    });

    Box::pin(futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    }))
}
