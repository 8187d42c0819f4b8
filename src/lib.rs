//! # Menu Scout
//!
//! A toolkit for menu-intelligence experiments with local OpenAI-compatible
//! vision models (Ollama, LM Studio, llama.cpp, vLLM).
//!
//! ## Overview
//!
//! Menu Scout wires together the pieces of a competitive menu analysis
//! workflow that runs entirely on local hardware:
//!
//! - **Streaming chat client** for any OpenAI-compatible endpoint, with tool
//!   calling and vision (image) content
//! - **Image description**: send a menu photo plus a prompt to a
//!   vision-capable model and collect the text response
//! - **Structured menu extraction**: prompt for a strict JSON item listing
//!   and parse it into typed records, tolerating the fences and prose local
//!   models emit anyway
//! - **Menu database**: a SQLite database of our own menu (items + nutrition
//!   facts) built from a static JSON description, queryable by agent tools
//! - **Final-answer extraction**: pull the answer out of a finished agent
//!   conversation, preferring the designated final-answer tool call over
//!   free text, with a provenance tag saying which path won
//!
//! ## Quick Start
//!
//! ### Describe a menu image
//!
//! ```rust,no_run
//! use menu_scout::{describe_image, AgentOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AgentOptions::builder()
//!         .model("gemma3:27b")
//!         .base_url("http://localhost:11434/v1")
//!         .build()?;
//!
//!     let description = describe_image(
//!         "./data/competitor_menu.png",
//!         "Please describe this image in detail:",
//!         &options,
//!     )
//!     .await?;
//!
//!     println!("{}", description);
//!     Ok(())
//! }
//! ```
//!
//! ### Run an agent and extract its answer
//!
//! ```rust,no_run
//! use menu_scout::{extract_final_answer, tool, AgentOptions, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let submit = tool("submit_final_answer", "Submit the final answer")
//!         .param("answer", "string")
//!         .build(|args| async move { Ok(args) });
//!
//!     let options = AgentOptions::builder()
//!         .model("qwen2.5-32b-instruct")
//!         .base_url("http://localhost:11434/v1")
//!         .tool(submit)
//!         .auto_execute_tools(true)
//!         .build()?;
//!
//!     let mut client = Client::new(options)?;
//!     client.send("What does the cheapest burger cost?").await?;
//!     while let Some(_block) = client.receive().await? {}
//!
//!     match extract_final_answer(client.history(), "submit_final_answer") {
//!         Some(answer) => println!("{} (via {:?})", answer.text, answer.source),
//!         None => println!("no answer extracted"),
//!     }
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

/// Core client implementation providing streaming queries and stateful
/// conversations with manual or automatic tool execution.
mod client;

/// Provider configuration helpers for LM Studio, Ollama, llama.cpp, and vLLM.
mod config;

/// SQLite menu database built from a static JSON menu description.
mod db;

/// Error types and conversions used across all public APIs.
mod error;

/// Final-answer extraction from finished agent conversation traces.
mod extract;

/// Tool definition and execution system with JSON schema normalization.
mod tools;

/// Core type definitions for messages, content blocks (including images),
/// and agent configuration.
mod types;

/// Internal utilities for SSE parsing and tool call aggregation.
mod utils;

/// Vision workflows: image encoding, description, and structured menu
/// extraction.
mod vision;

// ============================================================================
// PUBLIC EXPORTS
// ============================================================================

// --- Core Client API ---

pub use client::{Client, ContentStream, query};

// --- Provider Configuration ---

pub use config::{Provider, get_base_url, get_model};

// --- Menu Database ---

pub use db::{MenuDatabase, MenuEntry, NutritionEntry, load_menu_json};

// --- Error Handling ---

pub use error::{Error, Result};

// --- Final-Answer Extraction ---

pub use extract::{AnswerSource, FinalAnswer, ToolArguments, extract_final_answer};

// --- Tool System ---

pub use tools::{Tool, ToolBuilder, tool};

// --- Core Types ---

pub use types::{
    AgentOptions, AgentOptionsBuilder, ContentBlock, ImageBlock, ImageDetail, Message,
    MessageRole, TextBlock, ToolResultBlock, ToolUseBlock,
};

// --- Vision Workflows ---

pub use vision::{
    ExtractedMenu, MenuItem, describe_image, encode_image, extract_menu, image_data_url,
    menu_extraction_prompt, parse_menu_response,
};

// ============================================================================
// CONVENIENCE PRELUDE
// ============================================================================

/// Convenience module containing the most commonly used types and functions.
/// Import with `use menu_scout::prelude::*;` for typical usage.
pub mod prelude {
    pub use crate::{
        AgentOptions, AgentOptionsBuilder, AnswerSource, Client, ContentBlock, Error,
        ExtractedMenu, FinalAnswer, ImageBlock, ImageDetail, MenuDatabase, MenuItem, Message,
        Result, TextBlock, Tool, ToolUseBlock, describe_image, extract_final_answer,
        extract_menu, query, tool,
    };
}
