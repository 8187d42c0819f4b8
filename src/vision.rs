//! Vision workflows: image description and structured menu extraction.
//!
//! Local vision models (llava, gemma3, bakllava, ...) accept images as
//! base64 data URLs inside a multimodal content array. This module covers
//! the two workflows built on that:
//!
//! 1. **Describe** — encode a local image file and stream back the model's
//!    free-text description ([`describe_image`]).
//! 2. **Extract** — prompt the model to emit a strict JSON listing of menu
//!    items with prices, then parse the reply into typed records
//!    ([`extract_menu`]). Local models routinely wrap "JSON only" output in
//!    markdown fences or prose anyway, so [`parse_menu_response`] tolerates
//!    both.
//!
//! # Examples
//!
//! ```rust,no_run
//! use menu_scout::{describe_image, AgentOptions};
//!
//! # async fn example() -> menu_scout::Result<()> {
//! let options = AgentOptions::builder()
//!     .model("gemma3:27b")
//!     .base_url("http://localhost:11434/v1")
//!     .temperature(0.1)
//!     .build()?;
//!
//! let description = describe_image(
//!     "./data/competitor_menu.png",
//!     "Please describe this image in detail:",
//!     &options,
//! )
//! .await?;
//! println!("{}", description);
//! # Ok(())
//! # }
//! ```

use crate::client::Client;
use crate::types::{AgentOptions, ContentBlock, Message};
use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single menu item extracted from an image.
///
/// `price` is `None` when the price is missing from the menu or unreadable
/// in the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// The full set of menu items extracted from one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMenu {
    pub items: Vec<MenuItem>,
}

/// Instruction prompt for structured menu extraction.
///
/// Directs the model to emit a bare JSON array of `{item_name, price}`
/// objects with no fences or prose. The worked example pins the exact shape
/// better than schema text alone does with small local models.
pub fn menu_extraction_prompt() -> &'static str {
    "Analyze the menu in the provided image. Extract all distinct menu items and their \
     corresponding prices. Format the output strictly as a JSON string representing a list \
     of objects. Each object must have keys 'item_name' (string) and 'price' (float or null \
     if price is missing or unreadable). Ignore headers, descriptions, or non-item text. \
     Consolidate slightly different phrasings of the same item if possible. Only output the \
     valid JSON string, with no surrounding text, explanations, or markdown fences.\n\
     Example: '[{\"item_name\": \"Classic Burger\", \"price\": 6.50}, \
     {\"item_name\": \"Fries\", \"price\": 2.50}, {\"item_name\": \"Soda\", \"price\": null}]'"
}

/// Base64-encode an image file.
pub fn encode_image(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::image(format!("failed to read {}: {}", path.display(), e)))?;
    Ok(BASE64.encode(bytes))
}

/// Build a `data:` URL for an image file, guessing the MIME type from the
/// file extension.
pub fn image_data_url(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mime = mime_from_extension(path)?;
    let encoded = encode_image(path)?;
    Ok(format!("data:{};base64,{}", mime, encoded))
}

/// MIME type for the supported image extensions.
fn mime_from_extension(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        _ => Err(Error::image(format!(
            "unsupported image extension for {}",
            path.display()
        ))),
    }
}

/// Send a local image plus a text prompt to a vision-capable model and
/// return the concatenated text response.
pub async fn describe_image(
    path: impl AsRef<Path>,
    prompt: &str,
    options: &AgentOptions,
) -> Result<String> {
    let path = path.as_ref();
    log::debug!(
        "describe_image: sending {} to model '{}'",
        path.display(),
        options.model()
    );

    let data_url = image_data_url(path)?;
    let message = Message::user_with_image(prompt, data_url)?;

    let mut client = Client::new(options.clone())?;
    client.send_message(message).await?;

    let mut description = String::new();
    while let Some(block) = client.receive().await? {
        if let ContentBlock::Text(text) = block {
            description.push_str(&text.text);
        }
    }

    log::debug!(
        "describe_image: received {} characters of description",
        description.len()
    );
    Ok(description)
}

/// Parse a model reply into an [`ExtractedMenu`].
///
/// Accepts a bare JSON array of items, an `{"items": [...]}` object, or
/// either of those wrapped in markdown fences and/or surrounding prose. The
/// error from the plain-array parse is the one reported when nothing
/// matches.
pub fn parse_menu_response(raw: &str) -> Result<ExtractedMenu> {
    let body = strip_code_fences(raw);

    match serde_json::from_str::<Vec<MenuItem>>(body) {
        Ok(items) => Ok(ExtractedMenu { items }),
        Err(array_err) => {
            if let Ok(menu) = serde_json::from_str::<ExtractedMenu>(body) {
                return Ok(menu);
            }

            // Prose around the array: take the outermost bracketed slice
            if let (Some(start), Some(end)) = (body.find('['), body.rfind(']')) {
                if start < end {
                    if let Ok(items) = serde_json::from_str::<Vec<MenuItem>>(&body[start..=end]) {
                        return Ok(ExtractedMenu { items });
                    }
                }
            }

            log::warn!("parse_menu_response: reply is not a menu listing: {}", raw);
            Err(Error::Json(array_err))
        }
    }
}

/// Strip a surrounding markdown code fence, including an optional language
/// tag on the opening line.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the rest of the opening fence line ("json", "JSON", or nothing)
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };

    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Extract a structured menu from an image: describe with the extraction
/// prompt, then parse the reply.
pub async fn extract_menu(
    path: impl AsRef<Path>,
    options: &AgentOptions,
) -> Result<ExtractedMenu> {
    let reply = describe_image(path, menu_extraction_prompt(), options).await?;
    let menu = parse_menu_response(&reply)?;
    log::debug!("extract_menu: parsed {} menu item(s)", menu.items.len());
    Ok(menu)
}
