//! Client for streaming queries and multi-turn conversations.
//!
//! Everything the model returns arrives as a stream of content blocks parsed
//! from Server-Sent Events. [`query`] covers stateless one-shot prompts;
//! [`Client`] maintains conversation history across turns and supports two
//! ways of handling tool calls:
//!
//! - **Manual mode** (default): tool-use blocks stream straight to the
//!   caller, who executes the tool, calls [`Client::add_tool_result`], and
//!   continues with `send("")`.
//! - **Automatic mode** (`auto_execute_tools`): the client runs registered
//!   tools itself and loops until the model produces a text-only response
//!   (bounded by `max_tool_iterations`). The finished history is what
//!   [`crate::extract_final_answer`] consumes.
//!
//! History is serialized to the OpenAI message format in four shapes: tool
//! results become `role: "tool"` messages, assistant tool calls carry a
//! `tool_calls` array (with a content field even when empty — required by
//! the API), image-bearing messages use a content-parts array preserving
//! block order, and plain text messages use a content string.
//!
//! An `Arc<AtomicBool>` interrupt flag allows cancelling a stream from
//! another task; the client stays usable for new requests afterwards.
//!
//! # Examples
//!
//! ```rust,no_run
//! use menu_scout::{Client, AgentOptions, ContentBlock};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = Client::new(AgentOptions::builder()
//!     .model("gemma3:27b")
//!     .base_url("http://localhost:11434/v1")
//!     .build()?)?;
//!
//! client.send("What goes on a Classic Burger?").await?;
//! while let Some(block) = client.receive().await? {
//!     if let ContentBlock::Text(text) = block {
//!         print!("{}", text.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::types::{
    AgentOptions, ContentBlock, Message, MessageRole, OpenAIContent, OpenAIContentPart,
    OpenAIFunction, OpenAIMessage, OpenAIRequest, OpenAIToolCall, ToolResultBlock,
};
use crate::utils::{ToolCallAggregator, parse_sse_stream};
use crate::{Error, Result};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// A pinned, boxed stream of content blocks from the model.
///
/// Items are `Result`-wrapped so network and parse failures surface per
/// block instead of killing the consumer silently.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<ContentBlock>> + Send>>;

/// Map a message role to its wire name.
fn role_str(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::Tool => "tool",
    }
}

/// Build the streaming content-block pipeline over an HTTP response.
///
/// SSE chunks feed a [`ToolCallAggregator`] held in `scan` state; complete
/// block vectors are flattened into individual items.
fn block_stream(response: reqwest::Response) -> ContentStream {
    let sse_stream = parse_sse_stream(response);

    let stream = sse_stream.scan(ToolCallAggregator::new(), |aggregator, chunk_result| {
        let result = match chunk_result {
            Ok(chunk) => match aggregator.process_chunk(chunk) {
                Ok(blocks) => {
                    if blocks.is_empty() {
                        Some(None) // Partial chunk, keep aggregating
                    } else {
                        Some(Some(Ok(blocks)))
                    }
                }
                Err(e) => Some(Some(Err(e))),
            },
            Err(e) => Some(Some(Err(e))),
        };
        futures::future::ready(result)
    });

    let flattened = stream
        .filter_map(|item| async move { item })
        .flat_map(|result| {
            futures::stream::iter(match result {
                Ok(blocks) => blocks.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            })
        });

    Box::pin(flattened)
}

/// POST a chat completions request and check the HTTP status.
async fn post_request(
    http_client: &reqwest::Client,
    options: &AgentOptions,
    request: &OpenAIRequest,
) -> Result<reqwest::Response> {
    let url = format!("{}/chat/completions", options.base_url());
    let response = http_client
        .post(&url)
        .header("Authorization", format!("Bearer {}", options.api_key()))
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(Error::Http)?;

    // Catch auth failures, unknown models, and server errors before
    // touching the stream
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
        return Err(Error::api(format!("API error {}: {}", status, body)));
    }

    Ok(response)
}

/// Convert registered tools to the request's `tools` array, if any.
fn tools_payload(options: &AgentOptions) -> Option<Vec<serde_json::Value>> {
    if options.tools().is_empty() {
        None
    } else {
        Some(
            options
                .tools()
                .iter()
                .map(|t| t.to_openai_format())
                .collect(),
        )
    }
}

/// Simple query function for single-turn interactions without conversation
/// history.
///
/// Creates a temporary HTTP client, sends the system prompt (if configured)
/// plus the user prompt, and returns the streaming response. For multi-turn
/// conversations use [`Client`].
pub async fn query(prompt: &str, options: &AgentOptions) -> Result<ContentStream> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(options.timeout()))
        .build()
        .map_err(Error::Http)?;

    let mut messages = Vec::new();

    if !options.system_prompt().is_empty() {
        messages.push(OpenAIMessage {
            role: "system".to_string(),
            content: Some(OpenAIContent::Text(options.system_prompt().to_string())),
            tool_calls: None,
            tool_call_id: None,
        });
    }

    messages.push(OpenAIMessage {
        role: "user".to_string(),
        content: Some(OpenAIContent::Text(prompt.to_string())),
        tool_calls: None,
        tool_call_id: None,
    });

    let request = OpenAIRequest {
        model: options.model().to_string(),
        messages,
        stream: true,
        max_tokens: options.max_tokens(),
        temperature: Some(options.temperature()),
        tools: tools_payload(options),
    };

    let response = post_request(&client, options, &request).await?;
    Ok(block_stream(response))
}

/// Stateful client for multi-turn conversations with automatic history
/// management.
///
/// Not thread-safe for concurrent use; the interrupt handle is the one piece
/// that may be shared across tasks. History grows unbounded — call
/// [`clear_history`](Client::clear_history) to reset between experiments.
pub struct Client {
    /// Configuration: model, endpoint, tools, execution mode
    options: AgentOptions,

    /// Full conversation history, including tool calls and tool results
    history: Vec<Message>,

    /// Active response stream, set by `send` and drained by `receive`
    current_stream: Option<ContentStream>,

    /// Reused across requests for connection pooling
    http_client: reqwest::Client,

    /// Cancellation flag; checked before each received block
    interrupted: Arc<AtomicBool>,

    /// Final text blocks buffered by the auto-execution loop
    auto_exec_buffer: Vec<ContentBlock>,

    /// Read position in the auto-execution buffer
    auto_exec_index: usize,
}

impl Client {
    /// Creates a new client with the specified configuration.
    pub fn new(options: AgentOptions) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout()))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            options,
            history: Vec::new(),
            current_stream: None,
            http_client,
            interrupted: Arc::new(AtomicBool::new(false)),
            auto_exec_buffer: Vec::new(),
            auto_exec_index: 0,
        })
    }

    /// Sends a user message and initiates streaming of the model's response.
    ///
    /// The prompt is appended to history before the request goes out, so
    /// history stays consistent even when the request fails. An empty prompt
    /// is valid and still appended — it continues the conversation after
    /// tool results have been added.
    pub async fn send(&mut self, prompt: &str) -> Result<()> {
        self.send_message(Message::user(prompt)).await
    }

    /// Sends an arbitrary pre-built message — the entry point for vision
    /// messages and other custom block combinations.
    pub async fn send_message(&mut self, message: Message) -> Result<()> {
        // A new request invalidates any previous interruption and any
        // leftover auto-execution buffer
        self.interrupted.store(false, Ordering::SeqCst);
        self.auto_exec_buffer.clear();
        self.auto_exec_index = 0;

        self.history.push(message);
        self.dispatch().await
    }

    /// Serialize history, post the request, and store the response stream.
    async fn dispatch(&mut self) -> Result<()> {
        let messages = self.build_request_messages()?;

        let request = OpenAIRequest {
            model: self.options.model().to_string(),
            messages,
            stream: true,
            max_tokens: self.options.max_tokens(),
            temperature: Some(self.options.temperature()),
            tools: tools_payload(&self.options),
        };

        let response = post_request(&self.http_client, &self.options, &request).await?;
        self.current_stream = Some(block_stream(response));

        Ok(())
    }

    /// Convert the conversation history to OpenAI wire messages.
    ///
    /// The system prompt is prepended fresh on every request; it is not part
    /// of history. Each history message serializes to one of four shapes
    /// depending on its blocks (see module docs).
    fn build_request_messages(&self) -> Result<Vec<OpenAIMessage>> {
        let mut messages = Vec::new();

        if !self.options.system_prompt().is_empty() {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(OpenAIContent::Text(
                    self.options.system_prompt().to_string(),
                )),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        for msg in &self.history {
            let mut text_blocks = Vec::new();
            let mut image_blocks = Vec::new();
            let mut tool_use_blocks = Vec::new();
            let mut tool_result_blocks = Vec::new();

            for block in &msg.content {
                match block {
                    ContentBlock::Text(text) => text_blocks.push(text),
                    ContentBlock::Image(image) => image_blocks.push(image),
                    ContentBlock::ToolUse(tool_use) => tool_use_blocks.push(tool_use),
                    ContentBlock::ToolResult(tool_result) => tool_result_blocks.push(tool_result),
                }
            }

            if !tool_result_blocks.is_empty() {
                // Each tool result becomes its own "tool" role message
                for tool_result in tool_result_blocks {
                    let content = serde_json::to_string(&tool_result.content).unwrap_or_else(|e| {
                        format!("{{\"error\": \"Failed to serialize: {}\"}}", e)
                    });

                    messages.push(OpenAIMessage {
                        role: "tool".to_string(),
                        content: Some(OpenAIContent::Text(content)),
                        tool_calls: None,
                        tool_call_id: Some(tool_result.tool_use_id.clone()),
                    });
                }
            } else if !tool_use_blocks.is_empty() {
                // Assistant message carrying tool calls
                let tool_calls: Vec<OpenAIToolCall> = tool_use_blocks
                    .iter()
                    .map(|tool_use| {
                        let arguments = serde_json::to_string(&tool_use.input)
                            .unwrap_or_else(|_| "{}".to_string());

                        OpenAIToolCall {
                            id: tool_use.id.clone(),
                            call_type: "function".to_string(),
                            function: OpenAIFunction {
                                name: tool_use.name.clone(),
                                arguments,
                            },
                        }
                    })
                    .collect();

                // The API requires a content field even when there is no
                // accompanying text
                let content = if !text_blocks.is_empty() {
                    let text = text_blocks
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n");
                    Some(OpenAIContent::Text(text))
                } else {
                    Some(OpenAIContent::Text(String::new()))
                };

                messages.push(OpenAIMessage {
                    role: "assistant".to_string(),
                    content,
                    tool_calls: Some(tool_calls),
                    tool_call_id: None,
                });
            } else if !image_blocks.is_empty() {
                log::debug!(
                    "serializing message with {} image(s) for {:?} role",
                    image_blocks.len(),
                    msg.role
                );

                // Content-parts array preserving the original block order
                let mut content_parts = Vec::new();

                for block in &msg.content {
                    match block {
                        ContentBlock::Text(text) => {
                            content_parts.push(OpenAIContentPart::text(&text.text));
                        }
                        ContentBlock::Image(image) => {
                            content_parts
                                .push(OpenAIContentPart::image_url(image.url(), image.detail()));
                        }
                        ContentBlock::ToolUse(_) | ContentBlock::ToolResult(_) => {}
                    }
                }

                if content_parts.is_empty() {
                    return Err(Error::other(
                        "Internal error: Message with images produced empty content array",
                    ));
                }

                messages.push(OpenAIMessage {
                    role: role_str(&msg.role).to_string(),
                    content: Some(OpenAIContent::Parts(content_parts)),
                    tool_calls: None,
                    tool_call_id: None,
                });
            } else {
                // Plain text message
                let content = text_blocks
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");

                messages.push(OpenAIMessage {
                    role: role_str(&msg.role).to_string(),
                    content: Some(OpenAIContent::Text(content)),
                    tool_calls: None,
                    tool_call_id: None,
                });
            }
        }

        Ok(messages)
    }

    /// Returns one block from the current stream, honoring the interrupt
    /// flag.
    async fn receive_one(&mut self) -> Result<Option<ContentBlock>> {
        if self.interrupted.load(Ordering::SeqCst) {
            self.current_stream = None;
            return Ok(None);
        }

        if let Some(stream) = &mut self.current_stream {
            match stream.next().await {
                Some(Ok(block)) => Ok(Some(block)),
                Some(Err(e)) => Err(e),
                None => {
                    self.current_stream = None;
                    Ok(None)
                }
            }
        } else {
            Ok(None)
        }
    }

    /// Drains the current stream into a vector (auto-execution needs the
    /// whole response before deciding whether tools were called).
    async fn collect_all_blocks(&mut self) -> Result<Vec<ContentBlock>> {
        let mut blocks = Vec::new();

        while let Some(block) = self.receive_one().await? {
            if self.interrupted.load(Ordering::SeqCst) {
                self.current_stream = None;
                return Err(Error::other(
                    "Operation interrupted during block collection",
                ));
            }

            blocks.push(block);
        }

        Ok(blocks)
    }

    /// Executes a registered tool by name.
    async fn execute_tool_internal(
        &self,
        tool_name: &str,
        input: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let tool = self
            .options
            .tools()
            .iter()
            .find(|t| t.name() == tool_name)
            .ok_or_else(|| Error::tool(format!("Tool '{}' not found", tool_name)))?;

        tool.execute(input).await
    }

    /// Auto-execution loop: run tools and continue the conversation until a
    /// text-only response or the iteration limit.
    ///
    /// Tool failures become JSON error results fed back to the model rather
    /// than aborting the loop, so the model can recover or re-plan. On the
    /// iteration limit the loop stops and returns whatever text it has.
    async fn auto_execute_loop(&mut self) -> Result<Vec<ContentBlock>> {
        let mut iteration = 0;
        let max_iterations = self.options.max_tool_iterations();

        loop {
            let blocks = self.collect_all_blocks().await?;

            if blocks.is_empty() {
                return Ok(Vec::new());
            }

            let mut text_blocks = Vec::new();
            let mut tool_blocks = Vec::new();

            for block in blocks {
                match block {
                    ContentBlock::Text(_) => text_blocks.push(block),
                    ContentBlock::ToolUse(_) => tool_blocks.push(block),
                    // Responses never contain these
                    ContentBlock::ToolResult(_) | ContentBlock::Image(_) => {}
                }
            }

            // Text-only response: the conversation is done
            if tool_blocks.is_empty() {
                if !text_blocks.is_empty() {
                    self.history.push(Message::assistant(text_blocks.clone()));
                }
                return Ok(text_blocks);
            }

            iteration += 1;
            if iteration > max_iterations {
                log::warn!(
                    "auto-execution stopped after {} iteration(s) with tool calls still pending",
                    max_iterations
                );
                if !text_blocks.is_empty() {
                    self.history.push(Message::assistant(text_blocks.clone()));
                }
                return Ok(text_blocks);
            }

            // Record the assistant turn (text + tool calls) before executing
            let mut all_blocks = text_blocks.clone();
            all_blocks.extend(tool_blocks.clone());
            self.history.push(Message::assistant(all_blocks));

            for block in tool_blocks {
                if let ContentBlock::ToolUse(tool_use) = block {
                    log::debug!("auto-executing tool '{}'", tool_use.name);

                    let result = match self
                        .execute_tool_internal(&tool_use.name, tool_use.input.clone())
                        .await
                    {
                        Ok(res) => res,
                        Err(e) => {
                            // Feed the failure back to the model as data
                            serde_json::json!({
                                "error": e.to_string(),
                                "tool": tool_use.name,
                                "id": tool_use.id
                            })
                        }
                    };

                    let tool_result = ToolResultBlock::new(&tool_use.id, result);
                    self.history
                        .push(Message::user_with_blocks(vec![ContentBlock::ToolResult(
                            tool_result,
                        )]));
                }
            }

            // Continue the conversation; history carries all context
            self.dispatch().await?;
        }
    }

    /// Receives the next content block from the current response.
    ///
    /// In manual mode blocks stream through as they arrive. In auto mode the
    /// first call runs the auto-execution loop to completion and buffers the
    /// final text blocks, which subsequent calls return one at a time.
    /// Returns `Ok(None)` when the response is exhausted or the client was
    /// interrupted.
    pub async fn receive(&mut self) -> Result<Option<ContentBlock>> {
        if self.options.auto_execute_tools() {
            if self.auto_exec_index < self.auto_exec_buffer.len() {
                let block = self.auto_exec_buffer[self.auto_exec_index].clone();
                self.auto_exec_index += 1;
                return Ok(Some(block));
            }

            // First receive() after send(): run the loop
            if self.auto_exec_buffer.is_empty() && self.current_stream.is_some() {
                let blocks = self.auto_execute_loop().await?;
                self.auto_exec_buffer = blocks;
                self.auto_exec_index = 0;

                if self.auto_exec_buffer.is_empty() {
                    return Ok(None);
                }

                let block = self.auto_exec_buffer[0].clone();
                self.auto_exec_index = 1;
                return Ok(Some(block));
            }

            // Buffer exhausted
            Ok(None)
        } else {
            self.receive_one().await
        }
    }

    /// Interrupts the current operation.
    ///
    /// The next `receive()` returns `Ok(None)` and drops the stream; the
    /// flag resets on the next `send()`. Safe to call from any thread.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Clonable handle for interrupting from another task.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// The conversation history.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Mutable access to the conversation history for manual management.
    pub fn history_mut(&mut self) -> &mut Vec<Message> {
        &mut self.history
    }

    /// The client's configuration.
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Clears the conversation history. The system prompt is configuration,
    /// not history, so it survives.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Adds a tool result to the history (manual mode). Follow with
    /// `send("")` to let the model see the result.
    pub fn add_tool_result(&mut self, tool_use_id: &str, content: serde_json::Value) -> Result<()> {
        if tool_use_id.is_empty() {
            return Err(Error::invalid_input("tool_use_id must not be empty"));
        }

        let tool_result = ToolResultBlock::new(tool_use_id, content);
        self.history
            .push(Message::user_with_blocks(vec![ContentBlock::ToolResult(
                tool_result,
            )]));
        Ok(())
    }

    /// Look up a registered tool by name.
    pub fn get_tool(&self, name: &str) -> Option<&crate::tools::Tool> {
        self.options
            .tools()
            .iter()
            .find(|t| t.name() == name)
            .map(|arc| arc.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageBlock, TextBlock, ToolUseBlock};
    use serde_json::json;

    fn test_options() -> AgentOptions {
        AgentOptions::builder()
            .model("test-model")
            .base_url("http://localhost:11434/v1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_new() {
        let client = Client::new(test_options()).unwrap();
        assert!(client.history().is_empty());
        assert_eq!(client.options().model(), "test-model");
    }

    #[test]
    fn test_add_tool_result() {
        let mut client = Client::new(test_options()).unwrap();
        client
            .add_tool_result("call_1", json!({"price": 6.50}))
            .unwrap();

        assert_eq!(client.history().len(), 1);
        match &client.history()[0].content[0] {
            ContentBlock::ToolResult(result) => {
                assert_eq!(result.tool_use_id, "call_1");
                assert_eq!(result.content["price"], 6.50);
            }
            _ => panic!("Expected ToolResult block"),
        }
    }

    #[test]
    fn test_add_tool_result_rejects_empty_id() {
        let mut client = Client::new(test_options()).unwrap();
        assert!(client.add_tool_result("", json!({})).is_err());
    }

    #[test]
    fn test_clear_history() {
        let mut client = Client::new(test_options()).unwrap();
        client.history_mut().push(Message::user("hello"));
        assert_eq!(client.history().len(), 1);

        client.clear_history();
        assert!(client.history().is_empty());
    }

    #[test]
    fn test_interrupt_flag() {
        let client = Client::new(test_options()).unwrap();
        let handle = client.interrupt_handle();
        assert!(!handle.load(Ordering::SeqCst));

        client.interrupt();
        assert!(handle.load(Ordering::SeqCst));
    }

    #[test]
    fn test_build_request_messages_system_prompt_first() {
        let options = AgentOptions::builder()
            .system_prompt("You are a menu analyst")
            .model("test-model")
            .base_url("http://localhost:11434/v1")
            .build()
            .unwrap();

        let mut client = Client::new(options).unwrap();
        client.history_mut().push(Message::user("hello"));

        let messages = client.build_request_messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_build_request_messages_plain_text() {
        let mut client = Client::new(test_options()).unwrap();
        client.history_mut().push(Message::user("hello"));

        let messages = client.build_request_messages().unwrap();
        assert_eq!(messages.len(), 1);
        match &messages[0].content {
            Some(OpenAIContent::Text(text)) => assert_eq!(text, "hello"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_build_request_messages_tool_call_has_content() {
        let mut client = Client::new(test_options()).unwrap();
        client.history_mut().push(Message::assistant(vec![
            ContentBlock::ToolUse(ToolUseBlock::new(
                "call_1",
                "lookup_price",
                json!({"item_name": "Fries"}),
            )),
        ]));

        let messages = client.build_request_messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "assistant");

        // Content must be present (empty string) even with only tool calls
        match &messages[0].content {
            Some(OpenAIContent::Text(text)) => assert_eq!(text, ""),
            _ => panic!("Expected empty text content"),
        }

        let tool_calls = messages[0].tool_calls.as_ref().unwrap();
        assert_eq!(tool_calls.len(), 1);
        assert_eq!(tool_calls[0].function.name, "lookup_price");
        assert!(tool_calls[0].function.arguments.contains("Fries"));
    }

    #[test]
    fn test_build_request_messages_tool_result_role() {
        let mut client = Client::new(test_options()).unwrap();
        client
            .add_tool_result("call_1", json!({"price": 2.50}))
            .unwrap();

        let messages = client.build_request_messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "tool");
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_build_request_messages_image_parts_preserve_order() {
        let mut client = Client::new(test_options()).unwrap();
        let image = ImageBlock::from_url("https://example.com/menu.png").unwrap();
        client.history_mut().push(Message::new(
            MessageRole::User,
            vec![
                ContentBlock::Text(TextBlock::new("What's on this menu?")),
                ContentBlock::Image(image),
            ],
        ));

        let messages = client.build_request_messages().unwrap();
        assert_eq!(messages.len(), 1);

        match &messages[0].content {
            Some(OpenAIContent::Parts(parts)) => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], OpenAIContentPart::Text { .. }));
                assert!(matches!(parts[1], OpenAIContentPart::ImageUrl { .. }));
            }
            _ => panic!("Expected content parts"),
        }
    }

    #[test]
    fn test_get_tool() {
        let options = AgentOptions::builder()
            .model("test-model")
            .base_url("http://localhost:11434/v1")
            .tool(crate::tools::tool("lookup_price", "Look up a price").build(|_| async {
                Ok(json!({}))
            }))
            .build()
            .unwrap();

        let client = Client::new(options).unwrap();
        assert!(client.get_tool("lookup_price").is_some());
        assert!(client.get_tool("missing_tool").is_none());
    }
}
