/*
 * Catalog Module
 *
 * Items supplied by the catalog collaborator. The simulation only ever reads
 * them: each item becomes one swarm, its name picks the swarm's color and its
 * price is shown while the swarm is hovered.
 */

use nannou::color::{rgb, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A catalog entry. Prices are integer minor currency units (cents).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price_in_cents: i64,
    pub image_url: String,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, price_in_cents: i64, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price_in_cents,
            image_url: image_url.into(),
        }
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price_in_cents)
    }

    pub fn category(&self) -> Category {
        Category::from_name(&self.name)
    }
}

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("item {0} has an empty name")]
    EmptyName(i64),
}

/// Parse a JSON array of items.
pub fn parse_catalog(json: &str) -> Result<Vec<Item>, CatalogError> {
    let items: Vec<Item> = serde_json::from_str(json)?;

    if let Some(item) = items.iter().find(|item| item.name.trim().is_empty()) {
        return Err(CatalogError::EmptyName(item.id));
    }

    Ok(items)
}

/// Load a JSON catalog from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<Item>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let items = parse_catalog(&json)?;
    tracing::info!(count = items.len(), path = %path.display(), "catalog loaded");
    Ok(items)
}

// Built-in items used when no catalog file is given
pub fn demo_catalog() -> Vec<Item> {
    vec![
        Item::new(1, "深海圍巾 Abyss Scarf", 2890, "/images/scarf.jpg"),
        Item::new(2, "珊瑚錢包 Coral Wallet", 4590, "/images/wallet.jpg"),
        Item::new(3, "潮汐服飾 Tide Jacket", 12900, "/images/jacket.jpg"),
        Item::new(4, "海藻馬克杯 Kelp Mug", 1450, "/images/mug.jpg"),
        Item::new(5, "珍珠陶瓷碗 Pearl Ceramic Bowl", 3200, "/images/bowl.jpg"),
        Item::new(6, "聲納耳機 Sonar Headphones", 8999, "/images/headphones.jpg"),
        Item::new(7, "水母夜燈 Jellyfish Lamp", 5600, "/images/lamp.jpg"),
        Item::new(8, "潛艇筆記本 Submarine Notebook", 990, "/images/notebook.jpg"),
    ]
}

/// `$` followed by the price in major units with two decimals.
pub fn format_price(price_in_cents: i64) -> String {
    let sign = if price_in_cents < 0 { "-" } else { "" };
    let cents = price_in_cents.unsigned_abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Case-insensitive name substring search. Matches come back in catalog
/// order; a blank query matches nothing.
pub fn search<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .collect()
}

// Keywords are matched against the lowercased item name
const FASHION_KEYWORDS: &[&str] = &["服飾", "圍巾", "錢包", "apparel", "scarf", "wallet"];
const HOMEWARE_KEYWORDS: &[&str] = &["馬克杯", "陶瓷", "mug", "ceramic"];

/// Coarse product category used to color a swarm's satellites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Fashion,
    Homeware,
    Other,
}

impl Category {
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();

        if FASHION_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
            Category::Fashion
        } else if HOMEWARE_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
            Category::Homeware
        } else {
            Category::Other
        }
    }

    pub fn color(self) -> Rgb<u8> {
        match self {
            Category::Fashion => rgb(0xf7, 0x67, 0x07),
            Category::Homeware => rgb(0x22, 0xb5, 0x73),
            Category::Other => rgb(0x64, 0xff, 0xda),
        }
    }
}
