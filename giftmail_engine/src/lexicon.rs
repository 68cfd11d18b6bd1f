//! Display text for items and quests.
//!
//! Purely presentational: nothing in here reads or changes world state beyond
//! the item registry.

use crate::item::ItemCatalog;

/// Produces player-facing names and descriptions.
pub trait Lexicon {
    /// Display name of an item, falling back to its id when unregistered.
    fn display_name(&self, item_id: &str) -> String;

    /// Plural display name of an item.
    fn plural_name(&self, item_id: &str) -> String;

    /// Short quest body for a delivery: what is needed and how much is on hand.
    fn quest_description(&self, count: u32, item_name: &str, held: u32) -> String {
        format!("Deliver {count} {item_name} (you have {held}).")
    }
}

impl Lexicon for ItemCatalog {
    fn display_name(&self, item_id: &str) -> String {
        self.get(item_id).map_or_else(|| item_id.to_string(), |info| info.name.clone())
    }

    fn plural_name(&self, item_id: &str) -> String {
        match self.get(item_id) {
            Some(info) => info.plural.clone().unwrap_or_else(|| make_plural(&info.name)),
            None => make_plural(item_id),
        }
    }
}

/// Regular English plural of a display name, applied to the last word.
pub fn make_plural(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let lower = name.to_lowercase();
    if lower.ends_with("fish") || lower.ends_with("sheep") || lower.ends_with("rice") {
        return name.to_string();
    }
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{name}es");
    }
    if let Some(stem) = name.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }
    format!("{name}s")
}
