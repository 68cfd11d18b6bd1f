use serde::{Deserialize, Serialize};

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Prefix marking a taste entry as an item category rather than an item id.
pub const CATEGORY_PREFIX: &str = "category:";

/// Top-level world data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub player: PlayerDef,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub quests: Vec<QuestDef>,
    /// Parcels already sitting in the mail queue when the world is loaded.
    #[serde(default)]
    pub mail: Vec<ParcelDef>,
    /// Tastes shared by every NPC, consulted after the NPC's own tastes.
    #[serde(default)]
    pub universal_tastes: TastesDef,
}

/// The player who sends gifts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerDef {
    pub name: String,
    #[serde(default)]
    pub inventory: Vec<StackDef>,
}

/// A stack of one item at a given quality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackDef {
    pub item: Id,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub quality: u8,
}

/// Item registry entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDef {
    pub id: Id,
    pub name: String,
    /// Irregular plural display name; regular English rules apply when absent.
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A gift recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NpcDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub birthday: bool,
    #[serde(default)]
    pub friendship: i32,
    #[serde(default)]
    pub tastes: TastesDef,
}

/// Gift preferences by tier. Entries are item ids, or `category:<name>` for whole categories.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TastesDef {
    #[serde(default)]
    pub loved: Vec<String>,
    #[serde(default)]
    pub liked: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
    #[serde(default)]
    pub disliked: Vec<String>,
    #[serde(default)]
    pub hated: Vec<String>,
}

impl TastesDef {
    /// Iterate over every entry of every tier.
    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.loved
            .iter()
            .chain(&self.liked)
            .chain(&self.neutral)
            .chain(&self.disliked)
            .chain(&self.hated)
    }
}

/// An entry in the player's quest log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestDef {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Friendship awarded to the recipient when the quest is completed by mail.
    #[serde(default)]
    pub reward: i32,
    #[serde(default)]
    pub completed: bool,
    pub kind: QuestKindDef,
}

/// Shape of a quest, as authored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestKindDef {
    Fishing {
        item: Id,
        #[serde(default)]
        target: String,
        #[serde(default)]
        number_fished: u32,
        number_to_fish: u32,
    },
    ItemDelivery {
        item: Id,
        target: String,
        #[serde(default = "one")]
        number: u32,
        #[serde(default)]
        accepted: bool,
    },
    Other {
        #[serde(default)]
        summary: String,
    },
}

/// A parcel queued for delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParcelDef {
    pub to: Id,
    pub item: Id,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub quality: u8,
    #[serde(default)]
    pub quest: Option<Id>,
}

fn one() -> u32 {
    1
}
