//! Run a tool-equipped agent over the menu database, then extract its final
//! answer from the conversation history.
//!
//! The agent gets two tools: `lookup_price` backed by the menu database, and
//! `submit_final_answer` for the structured submission. After the
//! auto-execution loop finishes, `extract_final_answer` pulls the answer out
//! of the history and reports which path produced it.
//!
//! ```bash
//! cargo run --example build_menu_db   # once, to create ./data/menu.db
//! cargo run --example final_answer_agent
//! ```

use menu_scout::{
    AgentOptions, Client, MenuDatabase, Provider, extract_final_answer, get_base_url, get_model,
    tool,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

const FINAL_ANSWER_TOOL: &str = "submit_final_answer";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let base_url = get_base_url(Some(Provider::Ollama), None);
    let model = get_model(Some("qwen2.5-32b-instruct"), true).expect("fallback model is set");

    // Shared handle so the tool closure can query the database
    let db = Arc::new(Mutex::new(MenuDatabase::open("./data/menu.db")?));

    let lookup_db = db.clone();
    let lookup_price = tool("lookup_price", "Look up the price of a menu item by name")
        .param("item_name", "string")
        .build(move |args| {
            let db = lookup_db.clone();
            async move {
                let name = args["item_name"].as_str().unwrap_or("").to_string();
                let price = {
                    let db = db
                        .lock()
                        .map_err(|_| menu_scout::Error::tool("menu database lock poisoned"))?;
                    db.price_of(&name)?
                };
                match price {
                    Some(price) => Ok(json!({"item_name": name, "price": price})),
                    None => Ok(json!({"item_name": name, "error": "item not found"})),
                }
            }
        });

    let submit = tool(
        FINAL_ANSWER_TOOL,
        "Submit the final answer to the user's question. Call this exactly once, when done.",
    )
    .param("answer", "string")
    .build(|args| async move { Ok(args) });

    let options = AgentOptions::builder()
        .system_prompt(
            "You are a menu analyst. Use lookup_price to check our menu database, \
             then submit your conclusion with submit_final_answer.",
        )
        .model(&model)
        .base_url(&base_url)
        .tool(lookup_price)
        .tool(submit)
        .auto_execute_tools(true)
        .max_tool_iterations(5)
        .build()?;

    let mut client = Client::new(options)?;

    let question = "How much would a Classic Burger, Fries, and a Soda cost together?";
    println!("Question: {}\n", question);

    client.send(question).await?;
    while let Some(_block) = client.receive().await? {
        // Auto mode buffers the final text; the answer is read from history
    }

    match extract_final_answer(client.history(), FINAL_ANSWER_TOOL) {
        Some(answer) => {
            println!("Answer ({:?}): {}", answer.source, answer.text);
        }
        None => {
            println!("The agent did not produce an extractable answer.");
        }
    }

    Ok(())
}
