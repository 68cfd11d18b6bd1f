//! NPC Module
//!
//! NPCs are the addressees of gift mail. Each carries its gift preferences and
//! a running friendship total that deliveries add to.

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How much an NPC cares for a given gift.
#[derive(Copy, Clone, Debug, variantly::Variantly, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum Taste {
    Loved,
    Liked,
    Neutral,
    Disliked,
    Hated,
}

impl Display for Taste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Taste::Loved => write!(f, "Loved"),
            Taste::Liked => write!(f, "Liked"),
            Taste::Neutral => write!(f, "Neutral"),
            Taste::Disliked => write!(f, "Disliked"),
            Taste::Hated => write!(f, "Hated"),
        }
    }
}

/// Gift preferences keyed by item id and by item category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftTastes {
    pub items: HashMap<String, Taste>,
    pub categories: HashMap<String, Taste>,
}

impl GiftTastes {
    /// Records a preference for an item. An item listed under several tiers keeps the first one.
    pub fn add_item(&mut self, item_id: impl Into<String>, taste: Taste) {
        self.items.entry(item_id.into()).or_insert(taste);
    }

    /// Records a preference for a whole category. First tier wins, as with items.
    pub fn add_category(&mut self, category: impl Into<String>, taste: Taste) {
        self.categories.entry(category.into()).or_insert(taste);
    }

    /// Item-specific taste first, then the category taste.
    pub fn taste_for(&self, item_id: &str, category: Option<&str>) -> Option<Taste> {
        self.items
            .get(item_id)
            .or_else(|| category.and_then(|c| self.categories.get(c)))
            .copied()
    }
}

/// A gift recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    /// Whether today is this NPC's birthday.
    pub birthday: bool,
    pub tastes: GiftTastes,
    pub friendship: i32,
}

/// Lookup and friendship bookkeeping for gift recipients.
pub trait RecipientDirectory {
    /// Ids of all recipients in registration order.
    fn recipient_ids(&self) -> Vec<String>;

    fn recipient(&self, recipient_id: &str) -> Option<&Npc>;

    /// Adds (or subtracts) friendship points. Returns false if the recipient is unknown.
    fn award_friendship(&mut self, recipient_id: &str, points: i32) -> bool;
}

/// All NPCs in the order they were registered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcRoster {
    npcs: Vec<Npc>,
}

impl NpcRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an NPC. Re-registering an id replaces the NPC in place, keeping its position.
    pub fn register(&mut self, npc: Npc) {
        if let Some(existing) = self.npcs.iter_mut().find(|n| n.id == npc.id) {
            *existing = npc;
        } else {
            self.npcs.push(npc);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    /// Selects an NPC by exact id, then by case-insensitive partial name match.
    pub fn find(&self, query: &str) -> Option<&Npc> {
        if let Some(npc) = self.npcs.iter().find(|n| n.id == query) {
            return Some(npc);
        }
        let query = query.to_lowercase();
        self.npcs.iter().find(|n| n.name.to_lowercase().contains(&query))
    }
}

impl RecipientDirectory for NpcRoster {
    fn recipient_ids(&self) -> Vec<String> {
        self.npcs.iter().map(|n| n.id.clone()).collect()
    }

    fn recipient(&self, recipient_id: &str) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == recipient_id)
    }

    fn award_friendship(&mut self, recipient_id: &str, points: i32) -> bool {
        match self.npcs.iter_mut().find(|n| n.id == recipient_id) {
            Some(npc) => {
                npc.friendship = npc.friendship.saturating_add(points);
                true
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc(id: &str, name: &str) -> Npc {
        Npc {
            id: id.into(),
            name: name.into(),
            birthday: false,
            tastes: GiftTastes::default(),
            friendship: 0,
        }
    }

    #[test]
    fn first_listed_taste_wins() {
        let mut tastes = GiftTastes::default();
        tastes.add_item("amethyst", Taste::Loved);
        tastes.add_item("amethyst", Taste::Hated);
        assert_eq!(tastes.taste_for("amethyst", None), Some(Taste::Loved));
    }

    #[test]
    fn item_taste_beats_category_taste() {
        let mut tastes = GiftTastes::default();
        tastes.add_category("fruit", Taste::Disliked);
        tastes.add_item("melon", Taste::Liked);
        assert_eq!(tastes.taste_for("melon", Some("fruit")), Some(Taste::Liked));
        assert_eq!(tastes.taste_for("apple", Some("fruit")), Some(Taste::Disliked));
        assert_eq!(tastes.taste_for("apple", None), None);
    }

    #[test]
    fn roster_keeps_registration_order() {
        let mut roster = NpcRoster::new();
        roster.register(npc("willy", "Willy"));
        roster.register(npc("abigail", "Abigail"));
        roster.register(npc("willy", "Willy the Fisherman"));
        assert_eq!(roster.recipient_ids(), ["willy", "abigail"]);
        assert_eq!(roster.recipient("willy").unwrap().name, "Willy the Fisherman");
    }

    #[test]
    fn award_friendship_updates_known_npcs_only() {
        let mut roster = NpcRoster::new();
        roster.register(npc("abigail", "Abigail"));
        assert!(roster.award_friendship("abigail", 80));
        assert!(roster.award_friendship("abigail", -20));
        assert!(!roster.award_friendship("ghost", 10));
        assert_eq!(roster.recipient("abigail").unwrap().friendship, 60);
    }

    #[test]
    fn find_matches_partial_names() {
        let mut roster = NpcRoster::new();
        roster.register(npc("abigail", "Abigail"));
        assert_eq!(roster.find("abi").unwrap().id, "abigail");
        assert_eq!(roster.find("abigail").unwrap().id, "abigail");
        assert!(roster.find("sam").is_none());
    }

    #[test]
    fn taste_display_labels() {
        assert_eq!(Taste::Loved.to_string(), "Loved");
        assert_eq!(Taste::Hated.to_string(), "Hated");
        assert!(Taste::Neutral.is_neutral());
    }
}
