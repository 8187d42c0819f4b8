//! Send a competitor menu photo to a local vision model and print its
//! description.
//!
//! Run against a vision-capable model (e.g. `ollama run gemma3:27b` or
//! `ollama run llava`):
//! ```bash
//! cargo run --example describe_image -- ./data/competitor_menu.png
//! ```
//!
//! The endpoint and model can be overridden with MENU_SCOUT_BASE_URL and
//! MENU_SCOUT_MODEL.

use anyhow::Context;
use menu_scout::{AgentOptions, Provider, describe_image, get_base_url, get_model};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let image_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/competitor_menu.png".to_string());

    let base_url = get_base_url(Some(Provider::Ollama), None);
    let model = get_model(Some(Provider::Ollama.default_vision_model()), true)
        .expect("fallback model is set");

    println!("Describing image: {}", image_path);
    println!("Using model {} at {}\n", model, base_url);

    let options = AgentOptions::builder()
        .model(&model)
        .base_url(&base_url)
        .temperature(0.1)
        .build()?;

    let description = describe_image(
        &image_path,
        "Please describe this image in detail:",
        &options,
    )
    .await
    .with_context(|| format!("failed to describe {}", image_path))?;

    println!("=== Image Description ===");
    println!("{}", description);

    Ok(())
}
