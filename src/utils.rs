//! Streaming utilities for SSE parsing and tool call aggregation.
//!
//! The chat completions API returns Server-Sent Events:
//!
//! ```text
//! data: {"id":"msg_123","object":"chat.completion.chunk","choices":[...]}
//!
//! data: [DONE]
//! ```
//!
//! [`parse_sse_stream`] turns the raw HTTP body into a stream of parsed
//! [`OpenAIChunk`]s. Tool calls arrive as incremental deltas spread over many
//! chunks — an id and name first, then argument JSON split at arbitrary byte
//! positions. [`ToolCallAggregator`] accumulates those deltas (and text
//! deltas) and only emits complete [`ContentBlock`]s once a `finish_reason`
//! arrives, so consumers never see half-assembled JSON.

use crate::types::{ContentBlock, OpenAIChunk, TextBlock, ToolUseBlock};
use crate::{Error, Result};
use futures::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;

/// Aggregates streaming deltas into complete content blocks.
///
/// Stateful accumulator: a text buffer plus a map of partial tool calls keyed
/// by the API-provided index (multiple tool calls in one response arrive
/// interleaved, and the index says which call a delta belongs to). Buffers
/// are flushed and cleared when a `finish_reason` is seen, readying the
/// aggregator for the next turn.
pub struct ToolCallAggregator {
    /// Accumulated text deltas; cleared on finish
    text_buffer: String,

    /// Partial tool calls keyed by API index; cleared on finish
    tool_calls: HashMap<u32, PartialToolCall>,
}

/// An in-progress tool call assembled from deltas.
///
/// `id` and `name` usually arrive in the first delta for a call; `arguments`
/// grows as string fragments arrive and is only parsed as JSON at flush time.
/// Entries still missing an id or name at flush are dropped.
#[derive(Debug, Default)]
struct PartialToolCall {
    id: Option<String>,
    name: Option<String>,
    arguments: String,
}

impl Default for ToolCallAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolCallAggregator {
    /// Creates a new aggregator with empty buffers.
    pub fn new() -> Self {
        Self {
            text_buffer: String::new(),
            tool_calls: HashMap::new(),
        }
    }

    /// Processes a single chunk and returns completed content blocks.
    ///
    /// Returns an empty vector while generation is ongoing; once a chunk
    /// carries a `finish_reason`, all buffered content is flushed as complete
    /// blocks. Errors if accumulated tool-call argument JSON fails to parse.
    pub fn process_chunk(&mut self, chunk: OpenAIChunk) -> Result<Vec<ContentBlock>> {
        let mut blocks = Vec::new();

        for choice in chunk.choices {
            // Accumulate text deltas
            if let Some(content) = choice.delta.content {
                self.text_buffer.push_str(&content);
            }

            // Accumulate tool call deltas by index
            if let Some(tool_calls) = choice.delta.tool_calls {
                for tool_call in tool_calls {
                    let entry = self.tool_calls.entry(tool_call.index).or_default();

                    if let Some(id) = tool_call.id {
                        entry.id = Some(id);
                    }

                    if let Some(function) = tool_call.function {
                        if let Some(name) = function.name {
                            entry.name = Some(name);
                        }

                        // Argument JSON may split mid-string across deltas
                        if let Some(args) = function.arguments {
                            entry.arguments.push_str(&args);
                        }
                    }
                }
            }

            // finish_reason marks the end of generation ("stop",
            // "tool_calls", "length", ...) — flush everything
            if choice.finish_reason.is_some() {
                if !self.text_buffer.is_empty() {
                    blocks.push(ContentBlock::Text(TextBlock::new(self.text_buffer.clone())));
                    self.text_buffer.clear();
                }

                for (_, partial) in self.tool_calls.drain() {
                    if let (Some(id), Some(name)) = (partial.id, partial.name) {
                        // Empty arguments default to an empty object
                        let input: serde_json::Value = if partial.arguments.is_empty() {
                            serde_json::json!({})
                        } else {
                            serde_json::from_str(&partial.arguments).map_err(|e| {
                                Error::stream(format!("Failed to parse tool arguments: {}", e))
                            })?
                        };

                        blocks.push(ContentBlock::ToolUse(ToolUseBlock::new(id, name, input)));
                    }
                }
            }
        }

        Ok(blocks)
    }
}

/// Parses a raw HTTP response body as a Server-Sent Events stream.
///
/// Yields one parsed [`OpenAIChunk`] per `data:` line, skipping the `[DONE]`
/// sentinel and any non-data lines (comments, heartbeats). HTTP errors and
/// unparseable payloads surface as per-item errors rather than terminating
/// the stream eagerly.
pub fn parse_sse_stream(
    body: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<OpenAIChunk>> + Send>> {
    let stream = body.bytes_stream().filter_map(move |result| async move {
        let bytes = match result.map_err(Error::Http) {
            Ok(b) => b,
            Err(e) => return Some(Err(e)),
        };

        // Lossy conversion guards against UTF-8 sequences split at chunk
        // boundaries
        let text = String::from_utf8_lossy(&bytes);

        for line in text.lines() {
            if let Some(data) = line.strip_prefix("data: ") {
                if data == "[DONE]" {
                    continue;
                }

                let chunk: OpenAIChunk = match serde_json::from_str(data) {
                    Ok(c) => c,
                    Err(e) => {
                        return Some(Err(Error::stream(format!("Failed to parse chunk: {}", e))));
                    }
                };

                return Some(Ok(chunk));
            }
        }

        None
    });

    Box::pin(stream)
}
