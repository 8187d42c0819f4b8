//! Extract a structured menu listing from a competitor menu photo.
//!
//! Prompts a local vision model for a strict JSON item listing and parses
//! the reply into typed records:
//! ```bash
//! cargo run --example extract_menu -- ./data/competitor_menu.png
//! ```

use anyhow::Context;
use menu_scout::{AgentOptions, Provider, extract_menu, get_base_url, get_model};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let image_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/competitor_menu.png".to_string());

    let base_url = get_base_url(Some(Provider::Ollama), None);
    let model = get_model(Some(Provider::Ollama.default_vision_model()), true)
        .expect("fallback model is set");

    println!("Extracting menu from: {}", image_path);
    println!("Using model {} at {}\n", model, base_url);

    // Low temperature keeps the model close to the JSON contract
    let options = AgentOptions::builder()
        .model(&model)
        .base_url(&base_url)
        .temperature(0.1)
        .build()?;

    let menu = extract_menu(&image_path, &options)
        .await
        .with_context(|| format!("failed to extract a menu from {}", image_path))?;

    println!("=== Extracted Menu ({} items) ===", menu.items.len());
    for item in &menu.items {
        match item.price {
            Some(price) => println!("  {:<40} {:>6.2}", item.item_name, price),
            None => println!("  {:<40} {:>6}", item.item_name, "-"),
        }
    }

    Ok(())
}
