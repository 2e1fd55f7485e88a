//! Streaming chat service.
//!
//! Sends one chat message and delivers the server's incrementally
//! produced reply to the caller chunk by chunk, preserving arrival order,
//! without buffering the whole reply first.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use tracing::instrument;

use crate::config::BrandIntelConfig;
use crate::errors::{BrandIntelError, BrandIntelResult};
use crate::transport::{parse_data_line, DataLine, LineBuffer};

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

/// Streaming chat service.
///
/// Stateless across calls: each invocation owns its own line buffer, and
/// concurrent invocations do not interact. Callers wanting single-flight
/// behavior can wrap calls in a [`crate::resilience::SingleFlight`]
/// latch.
pub struct ChatService {
    http: reqwest::Client,
    config: Arc<BrandIntelConfig>,
}

impl ChatService {
    pub(crate) fn new(http: reqwest::Client, config: Arc<BrandIntelConfig>) -> Self {
        Self { http, config }
    }

    /// Sends a chat message and streams the reply through `on_chunk`.
    ///
    /// `on_chunk` is invoked synchronously once per text increment, in
    /// the order the increments were decoded from the stream; it may be
    /// invoked zero times. The future resolves after the `[DONE]`
    /// sentinel or after the body is exhausted, whichever comes first.
    /// Dropping the future releases the underlying connection.
    ///
    /// # Errors
    ///
    /// - [`BrandIntelError::Network`] if the request fails to complete
    /// - [`BrandIntelError::Http`] on a non-success response status
    ///   (the body is not consumed as a stream in that case)
    /// - [`BrandIntelError::Stream`] if the transport fails mid-stream;
    ///   chunks already delivered stand
    /// - [`BrandIntelError::Server`] if an event carries an `error`
    ///   field; its value becomes the error message and no further
    ///   chunks are delivered
    ///
    /// A data line whose payload is not valid JSON is logged and skipped,
    /// never surfaced as a failure.
    #[instrument(skip(self, message, on_chunk), fields(message_len = message.len()))]
    pub async fn send_message<F>(&self, message: &str, mut on_chunk: F) -> BrandIntelResult<()>
    where
        F: FnMut(&str),
    {
        let request = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .http
            .post(self.config.endpoint_url("ai/chat"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrandIntelError::Http {
                status: status.as_u16(),
            });
        }

        let mut body = response.bytes_stream();
        let mut lines = LineBuffer::new();

        while let Some(chunk) = body.next().await {
            let chunk: Bytes = chunk.map_err(|e| BrandIntelError::Stream {
                message: e.to_string(),
            })?;

            for line in lines.push(&chunk) {
                match parse_data_line(&line) {
                    // Blank separators, event:/id: fields, comments.
                    None => {}
                    Some(DataLine::Done) => return Ok(()),
                    Some(DataLine::Malformed { payload, reason }) => {
                        tracing::warn!(%payload, %reason, "Skipping malformed stream line");
                    }
                    Some(DataLine::Event(event)) => {
                        if let Some(error) = event.error {
                            return Err(BrandIntelError::Server { message: error });
                        }
                        if let Some(text) = event.text {
                            on_chunk(&text);
                        }
                    }
                }
            }
        }

        // A trailing fragment with no newline and no [DONE] is dropped,
        // matching the server's framing contract: lines are only
        // meaningful once terminated.
        if !lines.is_empty() {
            tracing::debug!(
                pending_bytes = lines.pending_len(),
                "Dropping unterminated fragment at end of stream"
            );
        }

        Ok(())
    }
}
