//! Item types and related helpers.
//!
//! Items are plain registry entries. What moves around the world is an
//! [`ItemStack`]: some count of one item at one quality level.

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Quality code for an ordinary item.
pub const QUALITY_NORMAL: u8 = 0;
/// Quality code for silver-star items.
pub const QUALITY_SILVER: u8 = 1;
/// Quality code for gold-star items.
pub const QUALITY_GOLD: u8 = 2;
/// Quality code for iridium-star items.
pub const QUALITY_IRIDIUM: u8 = 4;

/// Returns the one-letter tag shown in front of a gift name, or `None` for normal quality.
///
/// Codes outside the known table still get a tag so odd data stays visible in reports.
pub fn quality_tag(quality: u8) -> Option<char> {
    match quality {
        QUALITY_NORMAL => None,
        QUALITY_SILVER => Some('S'),
        QUALITY_GOLD => Some('G'),
        QUALITY_IRIDIUM => Some('I'),
        _ => Some('?'),
    }
}

/// Quality code named by a word such as "gold" or "iridium".
pub fn quality_from_word(word: &str) -> Option<u8> {
    match word.to_lowercase().as_str() {
        "normal" => Some(QUALITY_NORMAL),
        "silver" => Some(QUALITY_SILVER),
        "gold" => Some(QUALITY_GOLD),
        "iridium" => Some(QUALITY_IRIDIUM),
        _ => None,
    }
}

/// Registry data for a single kind of item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: String,
    pub name: String,
    /// Irregular plural, if the item needs one.
    pub plural: Option<String>,
    pub category: Option<String>,
}

/// Every item known to the world, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: HashMap<String, ItemInfo>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ItemInfo) {
        self.items.insert(info.id.clone(), info);
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemInfo> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Category of an item, if it is registered and has one.
    pub fn category_of(&self, item_id: &str) -> Option<&str> {
        self.items.get(item_id).and_then(|info| info.category.as_deref())
    }

    /// Finds an item by exact id, then by case-insensitive partial name match.
    pub fn find(&self, query: &str) -> Option<&ItemInfo> {
        if let Some(info) = self.items.get(query) {
            return Some(info);
        }
        let query = query.to_lowercase();
        let mut matches: Vec<&ItemInfo> = self
            .items
            .values()
            .filter(|info| info.name.to_lowercase().contains(&query))
            .collect();
        // HashMap order is arbitrary; keep lookups reproducible
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches.into_iter().next()
    }
}

/// A count of one item at one quality. Parcels carry these, inventories hold them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    /// Display name captured when the stack was created.
    pub name: String,
    pub quality: u8,
    pub stack: u32,
}

impl ItemStack {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quality: u8, stack: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quality,
            stack,
        }
    }

    /// Gift name with its quality tag, e.g. "(G) Melon".
    pub fn tagged_name(&self) -> String {
        match quality_tag(self.quality) {
            Some(tag) => format!("({tag}) {}", self.name),
            None => self.name.clone(),
        }
    }

    /// A stack with no item id or nothing in it cannot be delivered.
    pub fn is_malformed(&self) -> bool {
        self.id.trim().is_empty() || self.stack == 0
    }
}

impl Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.stack > 1 {
            write!(f, "{} x{}", self.tagged_name(), self.stack)
        } else {
            write!(f, "{}", self.tagged_name())
        }
    }
}
