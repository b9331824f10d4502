//! Ollama NDJSON streaming
//!
//! `/api/generate` answers with one JSON object per line. Text arrives in
//! `response`; the frame with `done: true` closes the generation, and an
//! `error` frame aborts it. A body that ends before the `done` frame is a
//! truncated generation and fails the stream.

use futures::{StreamExt, TryStreamExt};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

use super::types::GenerateChunk;
use crate::defaults::providers::ollama::NAME;
use crate::error::DocError;
use crate::streaming::ChunkStream;

/// Convert a successful `/api/generate` response into text fragments
pub fn chunk_stream(response: reqwest::Response) -> ChunkStream {
    let byte_stream = response
        .bytes_stream()
        .map_err(|e| std::io::Error::other(format!("Stream error: {e}")));
    let reader = StreamReader::new(byte_stream);
    let mut lines = FramedRead::new(reader, LinesCodec::new());

    let s = async_stream::stream! {
        let mut finished = false;
        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    let error = DocError::generation_failed(NAME, format!("JSON line error: {e}"));
                    tracing::error!(error = %error, "Ollama stream interrupted");
                    yield Err(error);
                    return;
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let frame = match serde_json::from_str::<GenerateChunk>(trimmed) {
                Ok(frame) => frame,
                Err(e) => {
                    let error = DocError::generation_failed(NAME, format!("malformed stream frame: {e}"));
                    tracing::error!(error = %error, "Ollama stream interrupted");
                    yield Err(error);
                    return;
                }
            };

            if let Some(message) = frame.error {
                let error = DocError::generation_failed(NAME, message);
                tracing::error!(error = %error, "Ollama reported an error mid-stream");
                yield Err(error);
                return;
            }

            if let Some(text) = frame.response
                && !text.is_empty()
            {
                tracing::trace!(len = text.len(), "Received Ollama chunk");
                yield Ok(text);
            }

            if frame.done {
                tracing::debug!(
                    model = frame.model.as_deref().unwrap_or_default(),
                    reason = frame.done_reason.as_deref().unwrap_or("stop"),
                    eval_count = frame.eval_count.unwrap_or_default(),
                    "Ollama generation finished"
                );
                finished = true;
                break;
            }
        }

        if !finished {
            let error = DocError::generation_failed(NAME, "stream ended before completion");
            tracing::error!(error = %error, "Ollama stream truncated");
            yield Err(error);
        }
    };

    Box::pin(s)
}
