//! Inventory storage.
//!
//! The distributor never touches a player's inventory directly; it goes through
//! [`InventoryStore`] so tests can stand in a fake.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::ItemStack;

/// Failures when taking items out of an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("no inventory is tracked for '{0}'")]
    UnknownActor(String),
    #[error("'{actor}' holds {held} of '{item_id}', {wanted} needed")]
    Insufficient {
        actor: String,
        item_id: String,
        held: u32,
        wanted: u32,
    },
}

/// Read and consume held items on behalf of an actor.
pub trait InventoryStore {
    /// Total held quantity of an item across all qualities.
    fn count_id(&self, actor: &str, item_id: &str) -> u32;

    /// Held quantity of an item at one quality.
    fn count_quality(&self, actor: &str, item_id: &str, quality: u8) -> u32;

    /// Removes `count` of an item at the given quality, or nothing at all if not enough is held.
    ///
    /// # Errors
    /// - if the actor is unknown or holds fewer than `count` at that quality
    fn remove(&mut self, actor: &str, item_id: &str, quality: u8, count: u32) -> Result<(), InventoryError>;
}

/// Ordered collection of item stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack, merging into an existing stack of the same item and quality.
    pub fn add(&mut self, stack: ItemStack) {
        if stack.stack == 0 {
            return;
        }
        if let Some(existing) = self
            .stacks
            .iter_mut()
            .find(|s| s.id == stack.id && s.quality == stack.quality)
        {
            existing.stack += stack.stack;
        } else {
            self.stacks.push(stack);
        }
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn count_id(&self, item_id: &str) -> u32 {
        self.stacks.iter().filter(|s| s.id == item_id).map(|s| s.stack).sum()
    }

    /// Held quantity of one item at one quality.
    pub fn count_quality(&self, item_id: &str, quality: u8) -> u32 {
        self.stack(item_id, quality).map_or(0, |s| s.stack)
    }

    /// The stack of an item at a given quality. Stacks never share item and quality.
    pub fn stack(&self, item_id: &str, quality: u8) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.id == item_id && s.quality == quality)
    }

    /// Every stack of an item, in inventory order.
    pub fn stacks_of<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a ItemStack> + 'a {
        self.stacks.iter().filter(move |s| s.id == item_id)
    }

    /// Removes `count` units from the stack of that quality, dropping it once empty.
    /// Returns false (and changes nothing) when that stack holds fewer.
    pub fn take(&mut self, item_id: &str, quality: u8, count: u32) -> bool {
        let Some(stack) = self
            .stacks
            .iter_mut()
            .find(|s| s.id == item_id && s.quality == quality)
        else {
            return false;
        };
        if stack.stack < count {
            return false;
        }
        stack.stack -= count;
        self.stacks.retain(|s| s.stack > 0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(id: &str, quality: u8, count: u32) -> ItemStack {
        ItemStack::new(id, id, quality, count)
    }

    #[test]
    fn add_merges_same_item_and_quality() {
        let mut inv = Inventory::new();
        inv.add(stack("egg", 0, 2));
        inv.add(stack("egg", 0, 3));
        inv.add(stack("egg", 2, 1));
        assert_eq!(inv.stacks().len(), 2);
        assert_eq!(inv.count_id("egg"), 6);
    }

    #[test]
    fn add_ignores_empty_stacks() {
        let mut inv = Inventory::new();
        inv.add(stack("egg", 0, 0));
        assert!(inv.is_empty());
    }

    #[test]
    fn take_only_touches_the_named_quality() {
        let mut inv = Inventory::new();
        inv.add(stack("egg", 0, 2));
        inv.add(stack("egg", 2, 2));
        assert!(inv.take("egg", 2, 2));
        assert_eq!(inv.count_id("egg"), 2);
        assert_eq!(inv.stacks().len(), 1);
        assert_eq!(inv.count_quality("egg", 0), 2);
        assert_eq!(inv.count_quality("egg", 2), 0);
    }

    #[test]
    fn take_is_all_or_nothing() {
        let mut inv = Inventory::new();
        inv.add(stack("egg", 0, 2));
        inv.add(stack("egg", 1, 5));
        // plenty of eggs overall, but not at normal quality
        assert!(!inv.take("egg", 0, 3));
        assert!(!inv.take("egg", 4, 1));
        assert_eq!(inv.count_id("egg"), 7);
    }

    #[test]
    fn stacks_of_lists_each_quality() {
        let mut inv = Inventory::new();
        inv.add(stack("egg", 0, 2));
        inv.add(stack("milk", 0, 1));
        inv.add(stack("egg", 4, 1));
        let qualities: Vec<u8> = inv.stacks_of("egg").map(|s| s.quality).collect();
        assert_eq!(qualities, [0, 4]);
        assert_eq!(inv.stack("egg", 4).unwrap().stack, 1);
    }
}
