//! The player who sends gifts.

use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, InventoryError, InventoryStore};

/// The gift-sending player and what they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub inventory: Inventory,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: "The Farmer".to_string(),
            inventory: Inventory::new(),
        }
    }
}

impl InventoryStore for Player {
    fn count_id(&self, actor: &str, item_id: &str) -> u32 {
        if actor == self.name {
            self.inventory.count_id(item_id)
        } else {
            0
        }
    }

    fn count_quality(&self, actor: &str, item_id: &str, quality: u8) -> u32 {
        if actor == self.name {
            self.inventory.count_quality(item_id, quality)
        } else {
            0
        }
    }

    fn remove(&mut self, actor: &str, item_id: &str, quality: u8, count: u32) -> Result<(), InventoryError> {
        if actor != self.name {
            return Err(InventoryError::UnknownActor(actor.to_string()));
        }
        if self.inventory.take(item_id, quality, count) {
            Ok(())
        } else {
            Err(InventoryError::Insufficient {
                actor: actor.to_string(),
                item_id: item_id.to_string(),
                held: self.inventory.count_quality(item_id, quality),
                wanted: count,
            })
        }
    }
}
