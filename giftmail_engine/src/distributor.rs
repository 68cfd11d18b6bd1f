//! The gift distributor.
//!
//! Delivers every pending parcel in one synchronous pass. Each parcel either
//! completes the quest it was earmarked for, or is scored as an ordinary gift.
//! Nothing here fails outright: stale parcels degrade to an ordinary gift and
//! malformed ones to `Unknown`, so one bad parcel can't stop the rest of the batch.

use std::fmt::Display;

use log::{info, warn};
use variantly::Variantly;

use crate::gift_taste::GiftReactions;
use crate::inventory::InventoryStore;
use crate::item::{ItemCatalog, ItemStack};
use crate::npc::{RecipientDirectory, Taste};
use crate::parcel::{MailQueue, Parcel};
use crate::quest::QuestStore;
use crate::quest_info::ItemQuestInfo;

/// Outcome label for a parcel that completed a quest.
pub const QUEST_COMPLETE_LABEL: &str = "Quest complete";
/// Outcome label for a parcel that could not be delivered at all.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// What happened to one parcel.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum DeliveryOutcome {
    QuestComplete { quest_id: String },
    Reaction { taste: Taste, birthday: bool },
    Unknown,
}

impl Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryOutcome::QuestComplete { .. } => write!(f, "{QUEST_COMPLETE_LABEL}"),
            DeliveryOutcome::Reaction { taste, birthday: true } => write!(f, "{taste} (bday)"),
            DeliveryOutcome::Reaction { taste, birthday: false } => write!(f, "{taste}"),
            DeliveryOutcome::Unknown => write!(f, "{UNKNOWN_LABEL}"),
        }
    }
}

/// Result of delivering one parcel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftResult {
    /// Sender name.
    pub from: String,
    /// Recipient display name, or the queued recipient id if they no longer exist.
    pub to: String,
    pub gift: ItemStack,
    pub outcome: DeliveryOutcome,
    pub points: i32,
}

/// The stores and rules a delivery pass works against.
pub struct DeliveryContext<'a> {
    /// The sending actor; keys the quest and inventory lookups.
    pub actor: String,
    pub quests: &'a mut dyn QuestStore,
    pub inventory: &'a mut dyn InventoryStore,
    pub recipients: &'a mut dyn RecipientDirectory,
    pub reactions: &'a GiftReactions,
    pub items: &'a ItemCatalog,
}

/// Resolves queued parcels into [`GiftResult`]s.
pub struct GiftDistributor<'a> {
    pub context: DeliveryContext<'a>,
    mail: &'a mut MailQueue,
}

impl<'a> GiftDistributor<'a> {
    pub fn new(context: DeliveryContext<'a>, mail: &'a mut MailQueue) -> Self {
        Self { context, mail }
    }

    /// Delivers every pending parcel and empties the queue.
    ///
    /// Results come back one per parcel: recipients in registration order (unregistered
    /// recipients last), and each recipient's parcels in the order they were sent.
    pub fn receive_all(&mut self) -> Vec<GiftResult> {
        let registration = self.context.recipients.recipient_ids();
        let parcels = self.mail.drain_ordered(&registration);
        info!("delivering {} parcel(s) from {}", parcels.len(), self.context.actor);
        parcels
            .iter()
            .map(|(recipient_id, parcel)| self.deliver(recipient_id, parcel))
            .collect()
    }

    fn deliver(&mut self, recipient_id: &str, parcel: &Parcel) -> GiftResult {
        let gift = parcel.gift();
        let recipient_name = self.context.recipients.recipient(recipient_id).map(|npc| npc.name.clone());
        let (outcome, points) = if gift.is_malformed() {
            warn!("parcel for '{recipient_id}' is malformed ({gift:?}); nothing delivered");
            (DeliveryOutcome::Unknown, 0)
        } else if recipient_name.is_none() {
            info!("recipient '{recipient_id}' no longer exists; delivering as an ordinary gift");
            self.give_gift(recipient_id, gift)
        } else if let Some(quest_id) = parcel.quest_id()
            && let Some(points) = self.try_complete_quest(recipient_id, quest_id, gift)
        {
            (
                DeliveryOutcome::QuestComplete {
                    quest_id: quest_id.to_string(),
                },
                points,
            )
        } else {
            self.give_gift(recipient_id, gift)
        };

        GiftResult {
            from: self.context.actor.clone(),
            to: recipient_name.unwrap_or_else(|| recipient_id.to_string()),
            gift: gift.clone(),
            outcome,
            points,
        }
    }

    /// Completes the quest if this parcel satisfies it. Returns the points awarded,
    /// or `None` to fall back to an ordinary gift.
    fn try_complete_quest(&mut self, recipient_id: &str, quest_id: &str, gift: &ItemStack) -> Option<i32> {
        let ctx = &mut self.context;
        let Some(quest) = ctx.quests.quest(&ctx.actor, quest_id) else {
            info!("quest '{quest_id}' not found for {}; treating parcel as a gift", ctx.actor);
            return None;
        };
        let reward = quest.reward;
        let Some(details) = ItemQuestInfo::try_from_quest(quest, &ctx.actor, &*ctx.inventory, recipient_id, ctx.items)
        else {
            info!("quest '{quest_id}' can't be completed by '{recipient_id}' right now");
            return None;
        };
        if details.required_item_id != gift.id {
            info!(
                "quest '{quest_id}' wants '{}', parcel holds '{}'",
                details.required_item_id, gift.id
            );
            return None;
        }
        if gift.stack < details.required_count {
            info!(
                "quest '{quest_id}' wants {} '{}', parcel holds {}",
                details.required_count, gift.id, gift.stack
            );
            return None;
        }
        let held = ctx.inventory.count_quality(&ctx.actor, &gift.id, gift.quality);
        if held < gift.stack {
            info!("quest '{quest_id}' parcel of {gift} is no longer held ({held} left)");
            return None;
        }
        if let Err(err) = ctx.quests.complete(&ctx.actor, quest_id) {
            warn!("quest '{quest_id}' resolved but could not be completed: {err}");
            return None;
        }
        // the whole parcel is handed over, extra units included
        if let Err(err) = ctx.inventory.remove(&ctx.actor, &gift.id, gift.quality, gift.stack) {
            warn!("quest '{quest_id}' completed but {gift} could not be removed: {err}");
        }
        ctx.recipients.award_friendship(recipient_id, reward);
        info!(
            "{} completed quest '{quest_id}' by mailing {} to '{recipient_id}' (+{reward})",
            ctx.actor,
            gift.tagged_name()
        );
        Some(reward)
    }

    /// Scores the parcel as an ordinary gift and hands it over.
    fn give_gift(&mut self, recipient_id: &str, gift: &ItemStack) -> (DeliveryOutcome, i32) {
        let ctx = &mut self.context;
        if let Err(err) = ctx.inventory.remove(&ctx.actor, &gift.id, gift.quality, gift.stack) {
            info!("gift {} for '{recipient_id}' is stale ({err}); scoring it anyway", gift.tagged_name());
        }
        let category = ctx.items.category_of(&gift.id);
        let reaction = ctx
            .reactions
            .react(ctx.recipients.recipient(recipient_id), gift, category);
        ctx.recipients.award_friendship(recipient_id, reaction.points);
        (
            DeliveryOutcome::Reaction {
                taste: reaction.taste,
                birthday: reaction.birthday,
            },
            reaction.points,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::inventory::InventoryError;
    use crate::item::ItemInfo;
    use crate::npc::{GiftTastes, Npc, NpcRoster};
    use crate::quest::{Quest, QuestError, QuestKind};

    /// Quest store fake that records completion calls.
    #[derive(Default)]
    struct FakeQuests {
        quests: Vec<Quest>,
        completions: Vec<String>,
    }

    impl QuestStore for FakeQuests {
        fn active_quests(&self, _actor: &str) -> Vec<&Quest> {
            self.quests.iter().filter(|q| !q.completed).collect()
        }

        fn quest(&self, _actor: &str, quest_id: &str) -> Option<&Quest> {
            self.quests.iter().find(|q| q.id == quest_id)
        }

        fn complete(&mut self, _actor: &str, quest_id: &str) -> Result<(), QuestError> {
            let quest = self
                .quests
                .iter_mut()
                .find(|q| q.id == quest_id)
                .ok_or_else(|| QuestError::NotFound {
                    actor: "Farmer".into(),
                    quest_id: quest_id.into(),
                })?;
            quest.completed = true;
            self.completions.push(quest_id.to_string());
            Ok(())
        }
    }

    /// Inventory fake keyed by item id and quality.
    #[derive(Default)]
    struct FakeInventory {
        held: HashMap<(String, u8), u32>,
    }

    impl FakeInventory {
        fn set(&mut self, item_id: &str, count: u32) {
            self.held.insert((item_id.to_string(), 0), count);
        }
    }

    impl InventoryStore for FakeInventory {
        fn count_id(&self, _actor: &str, item_id: &str) -> u32 {
            self.held.iter().filter(|((id, _), _)| id == item_id).map(|(_, n)| n).sum()
        }

        fn count_quality(&self, _actor: &str, item_id: &str, quality: u8) -> u32 {
            self.held.get(&(item_id.to_string(), quality)).copied().unwrap_or(0)
        }

        fn remove(&mut self, actor: &str, item_id: &str, quality: u8, count: u32) -> Result<(), InventoryError> {
            let held = self.count_quality(actor, item_id, quality);
            if held < count {
                return Err(InventoryError::Insufficient {
                    actor: actor.into(),
                    item_id: item_id.into(),
                    held,
                    wanted: count,
                });
            }
            self.held.insert((item_id.to_string(), quality), held - count);
            Ok(())
        }
    }

    /// Quest store whose completion transition always fails.
    struct RefusingQuests(FakeQuests);

    impl QuestStore for RefusingQuests {
        fn active_quests(&self, actor: &str) -> Vec<&Quest> {
            self.0.active_quests(actor)
        }

        fn quest(&self, actor: &str, quest_id: &str) -> Option<&Quest> {
            self.0.quest(actor, quest_id)
        }

        fn complete(&mut self, _actor: &str, quest_id: &str) -> Result<(), QuestError> {
            Err(QuestError::AlreadyComplete(quest_id.to_string()))
        }
    }

    struct Fixture {
        quests: FakeQuests,
        inventory: FakeInventory,
        roster: NpcRoster,
        reactions: GiftReactions,
        items: ItemCatalog,
        mail: MailQueue,
    }

    impl Fixture {
        fn new() -> Self {
            let mut items = ItemCatalog::new();
            for (id, category) in [("x", "crop"), ("y", "crop"), ("carp", "fish")] {
                items.insert(ItemInfo {
                    id: id.into(),
                    name: id.to_uppercase(),
                    plural: None,
                    category: Some(category.into()),
                });
            }
            let mut roster = NpcRoster::new();
            for id in ["Abigail", "Willy"] {
                let mut tastes = GiftTastes::default();
                tastes.add_item("y", Taste::Liked);
                roster.register(Npc {
                    id: id.into(),
                    name: id.into(),
                    birthday: false,
                    tastes,
                    friendship: 0,
                });
            }
            let mut inventory = FakeInventory::default();
            inventory.set("x", 5);
            inventory.set("y", 5);
            inventory.set("carp", 1);
            Self {
                quests: FakeQuests::default(),
                inventory,
                roster,
                reactions: GiftReactions::default(),
                items,
                mail: MailQueue::new(),
            }
        }

        fn add_delivery_quest(&mut self, id: &str, item: &str, target: &str, number: u32) {
            self.quests.quests.push(Quest {
                id: id.into(),
                title: format!("Bring {item}"),
                description: String::new(),
                reward: 150,
                completed: false,
                kind: QuestKind::ItemDelivery {
                    item_id: item.into(),
                    target: target.into(),
                    number,
                    accepted: true,
                },
            });
        }

        fn send(&mut self, to: &str, item: &str, count: u32, quest: Option<&str>) {
            let gift = ItemStack::new(item, item.to_uppercase(), 0, count);
            self.mail.enqueue(to, Parcel::new(gift, quest.map(str::to_string)));
        }

        fn receive_all(&mut self) -> Vec<GiftResult> {
            let context = DeliveryContext {
                actor: "Farmer".into(),
                quests: &mut self.quests,
                inventory: &mut self.inventory,
                recipients: &mut self.roster,
                reactions: &self.reactions,
                items: &self.items,
            };
            GiftDistributor::new(context, &mut self.mail).receive_all()
        }

        fn friendship(&self, id: &str) -> i32 {
            self.roster.recipient(id).unwrap().friendship
        }
    }

    #[test]
    fn completes_counted_delivery_quest() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 3);
        fx.send("Abigail", "x", 3, Some("q1"));

        let results = fx.receive_all();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].outcome,
            DeliveryOutcome::QuestComplete {
                quest_id: "q1".into()
            }
        );
        assert_eq!(results[0].outcome.to_string(), QUEST_COMPLETE_LABEL);
        assert_eq!(results[0].points, 150);
        assert_eq!(fx.quests.completions, ["q1"]);
        assert_eq!(fx.inventory.count_id("Farmer", "x"), 2);
        assert_eq!(fx.friendship("Abigail"), 150);
    }

    #[test]
    fn mismatched_item_falls_back_to_gift() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 3);
        fx.send("Abigail", "y", 3, Some("q1"));

        let results = fx.receive_all();
        assert_eq!(
            results[0].outcome,
            DeliveryOutcome::Reaction {
                taste: Taste::Liked,
                birthday: false
            }
        );
        assert_eq!(results[0].points, 45);
        assert!(fx.quests.completions.is_empty());
        assert!(!fx.quests.quests[0].completed);
    }

    #[test]
    fn short_parcel_falls_back_to_gift() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 3);
        fx.send("Abigail", "x", 2, Some("q1"));

        let results = fx.receive_all();
        assert!(results[0].outcome.is_reaction());
        assert_eq!(fx.inventory.count_id("Farmer", "x"), 3);
        assert!(!fx.quests.quests[0].completed);
    }

    #[test]
    fn missing_quest_falls_back_to_gift() {
        let mut fx = Fixture::new();
        fx.send("Abigail", "x", 1, Some("gone"));
        let results = fx.receive_all();
        assert_eq!(results[0].outcome.to_string(), "Neutral");
        assert_eq!(results[0].points, 20);
    }

    #[test]
    fn quest_for_another_recipient_falls_back_to_gift() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 1);
        fx.send("Willy", "x", 1, Some("q1"));
        let results = fx.receive_all();
        assert!(results[0].outcome.is_reaction());
        assert!(fx.quests.completions.is_empty());
    }

    #[test]
    fn items_gone_since_queueing_still_score_as_a_gift() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "y", "Abigail", 3);
        fx.send("Abigail", "y", 3, Some("q1"));
        fx.inventory.set("y", 1);

        let results = fx.receive_all();
        assert_eq!(
            results[0].outcome,
            DeliveryOutcome::Reaction {
                taste: Taste::Liked,
                birthday: false
            }
        );
        assert_eq!(results[0].points, 45);
        assert!(fx.quests.completions.is_empty());
        assert_eq!(fx.friendship("Abigail"), 45);
        // a failed removal takes nothing
        assert_eq!(fx.inventory.count_id("Farmer", "y"), 1);
    }

    #[test]
    fn oversized_quest_parcel_is_consumed_whole() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 3);
        fx.send("Abigail", "x", 5, Some("q1"));

        let results = fx.receive_all();
        assert!(results[0].outcome.is_quest_complete());
        assert_eq!(results[0].gift.stack, 5);
        assert_eq!(fx.inventory.count_id("Farmer", "x"), 0);
    }

    #[test]
    fn quest_parcel_uses_its_own_quality() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 2);
        fx.inventory.held.insert(("x".into(), 2), 2);
        fx.mail.enqueue(
            "Abigail",
            Parcel::new(ItemStack::new("x", "X", 2, 2), Some("q1".into())),
        );

        let results = fx.receive_all();
        assert!(results[0].outcome.is_quest_complete());
        assert_eq!(fx.inventory.count_quality("Farmer", "x", 2), 0);
        assert_eq!(fx.inventory.count_quality("Farmer", "x", 0), 5);
    }

    #[test]
    fn failed_completion_leaves_items_for_the_gift_path() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "y", "Abigail", 3);
        fx.send("Abigail", "y", 3, Some("q1"));

        let mut quests = RefusingQuests(std::mem::take(&mut fx.quests));
        let context = DeliveryContext {
            actor: "Farmer".into(),
            quests: &mut quests,
            inventory: &mut fx.inventory,
            recipients: &mut fx.roster,
            reactions: &fx.reactions,
            items: &fx.items,
        };
        let results = GiftDistributor::new(context, &mut fx.mail).receive_all();

        assert_eq!(results[0].points, 45);
        assert!(results[0].outcome.is_reaction());
        assert!(!quests.0.quests[0].completed);
        // removed once, by the gift path
        assert_eq!(fx.inventory.count_id("Farmer", "y"), 2);
        assert_eq!(fx.friendship("Abigail"), 45);
    }

    #[test]
    fn untargeted_fishing_quest_completes_only_for_fallback() {
        let mut fx = Fixture::new();
        fx.quests.quests.push(Quest {
            id: "fish".into(),
            title: "Catch carp".into(),
            description: String::new(),
            reward: 100,
            completed: false,
            kind: QuestKind::Fishing {
                item_id: "carp".into(),
                target: String::new(),
                number_fished: 3,
                number_to_fish: 3,
            },
        });
        fx.send("Abigail", "carp", 1, Some("fish"));
        let results = fx.receive_all();
        assert!(results[0].outcome.is_reaction());
        assert!(fx.quests.completions.is_empty());

        fx.inventory.set("carp", 1);
        fx.send("Willy", "carp", 1, Some("fish"));
        let results = fx.receive_all();
        assert!(results[0].outcome.is_quest_complete());
        assert_eq!(results[0].points, 100);
    }

    #[test]
    fn every_parcel_gets_one_result_in_delivery_order() {
        let mut fx = Fixture::new();
        fx.send("Ghost", "y", 1, None);
        fx.send("Willy", "y", 1, None);
        fx.send("Abigail", "x", 1, None);
        fx.send("Willy", "x", 1, None);

        let results = fx.receive_all();
        let order: Vec<_> = results.iter().map(|r| (r.to.as_str(), r.gift.id.as_str())).collect();
        assert_eq!(
            order,
            [("Abigail", "x"), ("Willy", "y"), ("Willy", "x"), ("Ghost", "y")]
        );
        assert!(fx.mail.is_empty());
        assert!(results.iter().all(|r| r.from == "Farmer"));
    }

    #[test]
    fn missing_recipient_gets_neutral_gift_without_friendship() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Ghost", 1);
        fx.send("Ghost", "y", 1, Some("q1"));
        let results = fx.receive_all();
        assert_eq!(results[0].to, "Ghost");
        assert_eq!(
            results[0].outcome,
            DeliveryOutcome::Reaction {
                taste: Taste::Neutral,
                birthday: false
            }
        );
        assert_eq!(results[0].points, 20);
        assert_eq!(fx.inventory.count_id("Farmer", "y"), 4);
    }

    #[test]
    fn malformed_parcel_is_unknown_and_batch_continues() {
        let mut fx = Fixture::new();
        fx.send("Abigail", "", 1, None);
        fx.send("Abigail", "y", 1, None);
        let results = fx.receive_all();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].outcome, DeliveryOutcome::Unknown);
        assert_eq!(results[0].points, 0);
        assert_eq!(results[1].points, 45);
        assert_eq!(fx.friendship("Abigail"), 45);
    }

    #[test]
    fn quest_is_only_completed_once() {
        let mut fx = Fixture::new();
        fx.add_delivery_quest("q1", "x", "Abigail", 1);
        fx.send("Abigail", "x", 1, Some("q1"));
        fx.send("Abigail", "x", 1, Some("q1"));
        let results = fx.receive_all();
        assert!(results[0].outcome.is_quest_complete());
        assert!(results[1].outcome.is_reaction());
        assert_eq!(fx.quests.completions, ["q1"]);
    }

    #[test]
    fn empty_queue_yields_no_results() {
        let mut fx = Fixture::new();
        assert!(fx.receive_all().is_empty());
    }
}
