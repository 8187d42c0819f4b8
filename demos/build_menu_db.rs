//! Build and populate the menu database from the static JSON menu.
//!
//! ```bash
//! cargo run --example build_menu_db
//! ```
//!
//! Creates `./data/menu.db` (replacing previous contents) and prints a few
//! queries to confirm the load.

use menu_scout::MenuDatabase;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_path = "./data/menu.json";
    let db_path = "./data/menu.db";

    let mut db = MenuDatabase::open(db_path)?;
    let count = db.build_from_json(json_path)?;
    println!("Database {} populated with {} items from {}", db_path, count, json_path);

    println!("\nBurgers:");
    for (name, price) in db.items_in_category("Burgers")? {
        println!("  {:<30} {:>6.2}", name, price);
    }

    if let Some(nutrition) = db.nutrition_of("Classic Burger")? {
        println!(
            "\nClassic Burger: {} kcal, {}g protein, {}mg sodium",
            nutrition.calories, nutrition.protein_g, nutrition.sodium_mg
        );
    }

    Ok(())
}
