//! SQLite menu database built from a static JSON menu description.
//!
//! The database holds our own menu as two tables: `menu` (one row per item)
//! and `nutrition_facts` (one row per item, keyed by the item's id). Agents
//! query it through tools while the vision side reads competitor menus from
//! images, so rebuilds are wholesale: drop both tables, recreate, repopulate
//! from the JSON source inside one transaction.
//!
//! # Examples
//!
//! ```rust,no_run
//! use menu_scout::MenuDatabase;
//!
//! # fn example() -> menu_scout::Result<()> {
//! let mut db = MenuDatabase::open("./data/menu.db")?;
//! let count = db.build_from_json("./data/menu.json")?;
//! println!("loaded {} menu items", count);
//! # Ok(())
//! # }
//! ```

use crate::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One menu item as described by the JSON menu source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub nutrition: NutritionEntry,
}

/// Nutrition facts for one menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    pub calories: i64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub sodium_mg: i64,
}

/// Load and type-check a JSON menu description.
pub fn load_menu_json(path: impl AsRef<Path>) -> Result<Vec<MenuEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<MenuEntry> = serde_json::from_str(&raw)?;
    log::debug!(
        "load_menu_json: {} entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Handle to the menu database.
pub struct MenuDatabase {
    conn: Connection,
}

impl MenuDatabase {
    /// Open (or create) a menu database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// Open an in-memory menu database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// Drop and recreate both tables, then populate them from `entries`.
    ///
    /// Runs inside a single transaction: on any failure the previous
    /// contents survive untouched.
    pub fn rebuild(&mut self, entries: &[MenuEntry]) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            "DROP TABLE IF EXISTS nutrition_facts;
             DROP TABLE IF EXISTS menu;
             CREATE TABLE menu (
                 id          INTEGER PRIMARY KEY,
                 name        TEXT NOT NULL,
                 category    TEXT NOT NULL,
                 price       REAL NOT NULL,
                 ingredients TEXT
             );
             CREATE TABLE nutrition_facts (
                 item_id    INTEGER PRIMARY KEY REFERENCES menu(id),
                 calories   INTEGER,
                 protein_g  REAL,
                 fat_g      REAL,
                 carbs_g    REAL,
                 sodium_mg  INTEGER
             );",
        )?;

        for entry in entries {
            tx.execute(
                "INSERT INTO menu (name, category, price, ingredients) VALUES (?1, ?2, ?3, ?4)",
                params![entry.name, entry.category, entry.price, entry.ingredients],
            )?;
            let item_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO nutrition_facts (item_id, calories, protein_g, fat_g, carbs_g, sodium_mg)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    item_id,
                    entry.nutrition.calories,
                    entry.nutrition.protein_g,
                    entry.nutrition.fat_g,
                    entry.nutrition.carbs_g,
                    entry.nutrition.sodium_mg
                ],
            )?;
        }

        tx.commit()?;
        log::info!("menu database rebuilt with {} item(s)", entries.len());
        Ok(())
    }

    /// Rebuild the database from a JSON menu file. Returns the number of
    /// items loaded.
    pub fn build_from_json(&mut self, json_path: impl AsRef<Path>) -> Result<usize> {
        let entries = load_menu_json(json_path)?;
        self.rebuild(&entries)?;
        Ok(entries.len())
    }

    /// Number of menu items.
    pub fn item_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM menu", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Price of a menu item by exact name, or `None` if absent.
    pub fn price_of(&self, name: &str) -> Result<Option<f64>> {
        let price = self
            .conn
            .query_row(
                "SELECT price FROM menu WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(price)
    }

    /// Names and prices of all items in a category, ordered by name.
    pub fn items_in_category(&self, category: &str) -> Result<Vec<(String, f64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, price FROM menu WHERE category = ?1 ORDER BY name")?;
        let rows = stmt
            .query_map(params![category], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Nutrition facts for a menu item by exact name, or `None` if absent.
    pub fn nutrition_of(&self, name: &str) -> Result<Option<NutritionEntry>> {
        let nutrition = self
            .conn
            .query_row(
                "SELECT n.calories, n.protein_g, n.fat_g, n.carbs_g, n.sodium_mg
                 FROM nutrition_facts n JOIN menu m ON m.id = n.item_id
                 WHERE m.name = ?1",
                params![name],
                |row| {
                    Ok(NutritionEntry {
                        calories: row.get(0)?,
                        protein_g: row.get(1)?,
                        fat_g: row.get(2)?,
                        carbs_g: row.get(3)?,
                        sodium_mg: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(nutrition)
    }
}
