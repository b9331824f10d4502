//! OpenAI SSE streaming using eventsource-stream

use eventsource_stream::Eventsource;
use futures::StreamExt;

use super::types::ChatCompletionChunk;
use crate::error::DocError;
use crate::streaming::ChunkStream;

const DONE_MARKER: &str = "[DONE]";

/// Convert a successful streaming response into text fragments.
///
/// The stream completes normally only after `[DONE]` or a choice with a
/// `finish_reason`; a body that closes before either fails it.
///
/// `provider` names the backend in errors, since OpenAI-compatible hosts can
/// be registered under their own name.
pub fn chunk_stream(provider: String, response: reqwest::Response) -> ChunkStream {
    let mut events = response.bytes_stream().eventsource();

    let s = async_stream::stream! {
        let mut finished = false;
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    let error = DocError::generation_failed(&provider, format!("SSE stream error: {e}"));
                    tracing::error!(error = %error, "OpenAI stream interrupted");
                    yield Err(error);
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() {
                continue;
            }
            if data == DONE_MARKER {
                tracing::debug!(provider = %provider, "OpenAI generation finished");
                finished = true;
                break;
            }

            let chunk = match serde_json::from_str::<ChatCompletionChunk>(data) {
                Ok(chunk) => chunk,
                Err(e) => {
                    let error = DocError::generation_failed(&provider, format!("malformed stream event: {e}"));
                    tracing::error!(error = %error, "OpenAI stream interrupted");
                    yield Err(error);
                    return;
                }
            };

            if let Some(api_error) = chunk.error {
                let error = DocError::generation_failed(&provider, api_error.message);
                tracing::error!(error = %error, "OpenAI reported an error mid-stream");
                yield Err(error);
                return;
            }

            let text = chunk.text();
            if !text.is_empty() {
                yield Ok(text);
            }
            if let Some(reason) = chunk.finish_reason() {
                tracing::debug!(provider = %provider, reason, "OpenAI choice finished");
                finished = true;
            }
        }

        if !finished {
            let error = DocError::generation_failed(&provider, "stream ended before completion");
            tracing::error!(error = %error, "OpenAI stream truncated");
            yield Err(error);
        }
    };

    Box::pin(s)
}
