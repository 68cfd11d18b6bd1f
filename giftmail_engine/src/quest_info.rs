//! Delivery details for quests that can be completed by handing over an item.
//!
//! [`ItemQuestInfo::try_from_quest`] is shared by the distributor and the
//! read-only `preview` command, so it must never change anything.

use log::debug;

use crate::inventory::InventoryStore;
use crate::lexicon::Lexicon;
use crate::quest::{Quest, QuestKind, QuestStore};

/// Recipient assumed by fishing quests that name no target.
///
/// The host game hardcodes the fisherman as the quest giver for untargeted fishing
/// quests. This applies to the fishing shape only; item delivery quests never fall back.
pub const FISHING_FALLBACK_TARGET: &str = "Willy";

/// What a quest needs delivered, resolved for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuestInfo {
    /// Quest title, as shown in previews.
    pub title: String,
    /// Abbreviated description: required count, item name and held count.
    pub text: String,
    pub required_item_id: String,
    /// Always at least 1.
    pub required_count: u32,
}

impl ItemQuestInfo {
    /// Resolves delivery details for `quest` if it has a delivery shape and `recipient`
    /// could complete it right now. Returns `None` otherwise.
    pub fn try_from_quest(
        quest: &Quest,
        actor: &str,
        inventory: &dyn InventoryStore,
        recipient: &str,
        lexicon: &dyn Lexicon,
    ) -> Option<ItemQuestInfo> {
        if quest.completed {
            return None;
        }
        let (item_id, count) = match &quest.kind {
            QuestKind::Fishing {
                item_id,
                target,
                number_fished,
                number_to_fish,
            } if fishing_completable(target, *number_fished, *number_to_fish, recipient) => (item_id.as_str(), 1),
            QuestKind::ItemDelivery {
                item_id,
                target,
                number,
                accepted,
            } if delivery_completable(target, *accepted, recipient) => (item_id.as_str(), *number),
            _ => ("", 0),
        };
        if item_id.is_empty() || count == 0 {
            debug!("quest '{}' has no delivery for '{recipient}'", quest.id);
            return None;
        }

        let held = inventory.count_id(actor, item_id);
        let name = if count > 1 {
            lexicon.plural_name(item_id)
        } else {
            lexicon.display_name(item_id)
        };
        Some(ItemQuestInfo {
            title: quest.title.clone(),
            text: lexicon.quest_description(count, &name, held),
            required_item_id: item_id.to_string(),
            required_count: count,
        })
    }
}

/// Every active quest `recipient` could complete right now, in log order.
pub fn quest_previews(
    quests: &dyn QuestStore,
    actor: &str,
    inventory: &dyn InventoryStore,
    recipient: &str,
    lexicon: &dyn Lexicon,
) -> Vec<(String, ItemQuestInfo)> {
    quests
        .active_quests(actor)
        .into_iter()
        .filter_map(|quest| {
            ItemQuestInfo::try_from_quest(quest, actor, inventory, recipient, lexicon).map(|info| (quest.id.clone(), info))
        })
        .collect()
}

fn fishing_completable(target: &str, number_fished: u32, number_to_fish: u32, recipient: &str) -> bool {
    if number_fished < number_to_fish {
        return false;
    }
    let effective_target = if target.is_empty() {
        FISHING_FALLBACK_TARGET
    } else {
        target
    };
    recipient == effective_target
}

fn delivery_completable(target: &str, accepted: bool, recipient: &str) -> bool {
    // the host only checks acceptance for delivery quests, not fishing ones
    accepted && !target.is_empty() && recipient == target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::item::{ItemCatalog, ItemInfo, ItemStack};
    use crate::player::Player;
    use crate::quest::QuestLog;

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        for (id, name) in [("parsnip", "Parsnip"), ("carp", "Carp")] {
            catalog.insert(ItemInfo {
                id: id.into(),
                name: name.into(),
                plural: None,
                category: None,
            });
        }
        catalog
    }

    fn farmer(parsnips: u32) -> Player {
        let mut inventory = Inventory::new();
        inventory.add(ItemStack::new("parsnip", "Parsnip", 0, parsnips));
        Player {
            name: "Farmer".into(),
            inventory,
        }
    }

    fn quest(kind: QuestKind) -> Quest {
        Quest {
            id: "q".into(),
            title: "A Quest".into(),
            description: String::new(),
            reward: 150,
            completed: false,
            kind,
        }
    }

    fn fishing(target: &str, fished: u32, to_fish: u32) -> Quest {
        quest(QuestKind::Fishing {
            item_id: "carp".into(),
            target: target.into(),
            number_fished: fished,
            number_to_fish: to_fish,
        })
    }

    fn delivery(target: &str, number: u32, accepted: bool) -> Quest {
        quest(QuestKind::ItemDelivery {
            item_id: "parsnip".into(),
            target: target.into(),
            number,
            accepted,
        })
    }

    fn resolve(quest: &Quest, recipient: &str) -> Option<ItemQuestInfo> {
        ItemQuestInfo::try_from_quest(quest, "Farmer", &farmer(2), recipient, &catalog())
    }

    #[test]
    fn delivery_quest_resolves_for_its_target() {
        let info = resolve(&delivery("Abigail", 3, true), "Abigail").unwrap();
        assert_eq!(info.title, "A Quest");
        assert_eq!(info.required_item_id, "parsnip");
        assert_eq!(info.required_count, 3);
        assert_eq!(info.text, "Deliver 3 Parsnips (you have 2).");
    }

    #[test]
    fn delivery_quest_requires_acceptance_and_exact_target() {
        assert!(resolve(&delivery("Abigail", 3, false), "Abigail").is_none());
        assert!(resolve(&delivery("Abigail", 3, true), "Willy").is_none());
    }

    #[test]
    fn delivery_quest_with_empty_target_never_falls_back() {
        assert!(resolve(&delivery("", 1, true), FISHING_FALLBACK_TARGET).is_none());
        assert!(resolve(&delivery("", 1, true), "").is_none());
    }

    #[test]
    fn delivery_quest_with_zero_number_resolves_to_none() {
        assert!(resolve(&delivery("Abigail", 0, true), "Abigail").is_none());
    }

    #[test]
    fn fishing_quest_needs_enough_catches() {
        assert!(resolve(&fishing("Willy", 2, 5), "Willy").is_none());
        assert!(resolve(&fishing("", 4, 5), FISHING_FALLBACK_TARGET).is_none());
    }

    #[test]
    fn fishing_quest_uses_singular_item_and_explicit_target() {
        let info = resolve(&fishing("Demetrius", 5, 5), "Demetrius").unwrap();
        assert_eq!(info.required_item_id, "carp");
        assert_eq!(info.required_count, 1);
        assert_eq!(info.text, "Deliver 1 Carp (you have 0).");
        assert!(resolve(&fishing("Demetrius", 5, 5), FISHING_FALLBACK_TARGET).is_none());
    }

    #[test]
    fn fishing_quest_without_target_only_resolves_for_fallback() {
        let quest = fishing("", 6, 5);
        assert!(resolve(&quest, FISHING_FALLBACK_TARGET).is_some());
        assert!(resolve(&quest, "Abigail").is_none());
    }

    #[test]
    fn other_and_completed_quests_do_not_resolve() {
        let other = quest(QuestKind::Other {
            summary: "Meet everyone".into(),
        });
        assert!(resolve(&other, "Abigail").is_none());

        let mut done = delivery("Abigail", 1, true);
        done.completed = true;
        assert!(resolve(&done, "Abigail").is_none());
    }

    #[test]
    fn previews_list_only_completable_quests() {
        let mut log = QuestLog::new("Farmer");
        let mut parsnips = delivery("Abigail", 1, true);
        parsnips.id = "parsnips".into();
        let mut pending = delivery("Abigail", 1, false);
        pending.id = "pending".into();
        let mut carp = fishing("", 5, 5);
        carp.id = "carp".into();
        log.quests = vec![parsnips, pending, carp];

        let ids = |recipient: &str| -> Vec<String> {
            quest_previews(&log, "Farmer", &farmer(1), recipient, &catalog())
                .into_iter()
                .map(|(id, _)| id)
                .collect()
        };
        assert_eq!(ids("Abigail"), ["parsnips"]);
        assert_eq!(ids(FISHING_FALLBACK_TARGET), ["carp"]);
        assert!(ids("Sam").is_empty());
    }

    #[test]
    fn resolving_does_not_touch_inventory() {
        let player = farmer(2);
        let quest = delivery("Abigail", 1, true);
        let _ = ItemQuestInfo::try_from_quest(&quest, "Farmer", &player, "Abigail", &catalog());
        assert_eq!(player.inventory.count_id("parsnip"), 2);
    }
}
