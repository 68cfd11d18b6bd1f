//! Data structures representing the running world.
//!
//! [`GiftWorld`] owns the player, NPCs, quests and the mail queue, and wires
//! them into a [`GiftDistributor`] when mail is delivered.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GIFTMAIL_VERSION;
use crate::distributor::{DeliveryContext, GiftDistributor, GiftResult};
use crate::gift_taste::GiftReactions;
use crate::item::{ItemCatalog, ItemStack, quality_from_word};
use crate::npc::NpcRoster;
use crate::parcel::{MailQueue, Parcel};
use crate::player::Player;
use crate::quest::{QuestLog, QuestStore};
use crate::quest_info::{ItemQuestInfo, quest_previews};

/// Reasons a parcel can't be queued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("nobody called '{0}' gets mail here")]
    UnknownRecipient(String),
    #[error("you aren't carrying anything like '{0}'")]
    UnknownItem(String),
    #[error("you only have {available} {item} to spare, not {wanted}")]
    NotEnough { item: String, available: u32, wanted: u32 },
    #[error("there's no quest '{0}' in your log")]
    UnknownQuest(String),
    #[error("you can't send nothing")]
    ZeroCount,
}

/// Complete state of a running session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftWorld {
    pub player: Player,
    pub npcs: NpcRoster,
    pub items: ItemCatalog,
    pub quests: QuestLog,
    pub mail: MailQueue,
    pub reactions: GiftReactions,
    pub version: String,
}

impl GiftWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> GiftWorld {
        let player = Player::default();
        let world = Self {
            quests: QuestLog::new(player.name.clone()),
            player,
            npcs: NpcRoster::new(),
            items: ItemCatalog::new(),
            mail: MailQueue::new(),
            reactions: GiftReactions::default(),
            version: GIFTMAIL_VERSION.to_string(),
        };
        info!("new, empty 'GiftWorld' created");
        world
    }

    /// Builds a distributor borrowing this world's stores.
    pub fn distributor(&mut self) -> GiftDistributor<'_> {
        let context = DeliveryContext {
            actor: self.player.name.clone(),
            quests: &mut self.quests,
            inventory: &mut self.player,
            recipients: &mut self.npcs,
            reactions: &self.reactions,
            items: &self.items,
        };
        GiftDistributor::new(context, &mut self.mail)
    }

    /// Delivers all pending mail.
    pub fn receive_all(&mut self) -> Vec<GiftResult> {
        self.distributor().receive_all()
    }

    /// Delivery details of every quest the given NPC could complete right now.
    pub fn previews_for(&self, npc_id: &str) -> Vec<(String, ItemQuestInfo)> {
        quest_previews(
            &self.quests,
            &self.player.name,
            &self.player,
            npc_id,
            &self.items,
        )
    }

    /// Units of a held stack not yet promised to a pending parcel.
    pub fn available(&self, stack: &ItemStack) -> u32 {
        stack
            .stack
            .saturating_sub(self.mail.queued_quantity(&stack.id, stack.quality))
    }

    /// Queues a parcel for an NPC.
    ///
    /// Items stay in the player's inventory until delivery, but units already queued
    /// can't be promised again. The item query may start with a quality word
    /// ("gold parsnip"); otherwise the first stack with enough to spare is used. When no
    /// quest is named, the parcel is earmarked for the first quest that recipient could
    /// complete with it.
    ///
    /// # Errors
    /// - if the recipient, item or named quest is unknown, or not enough is left to send
    pub fn send(&mut self, npc_query: &str, item_query: &str, count: u32, quest: Option<&str>) -> Result<Parcel, SendError> {
        if count == 0 {
            return Err(SendError::ZeroCount);
        }
        let npc = self
            .npcs
            .find(npc_query)
            .ok_or_else(|| SendError::UnknownRecipient(npc_query.to_string()))?;

        let (quality, name_query) = item_query
            .split_once(char::is_whitespace)
            .and_then(|(word, rest)| quality_from_word(word).map(|q| (Some(q), rest.trim())))
            .unwrap_or((None, item_query));
        let info = self
            .items
            .find(name_query)
            .filter(|info| self.player.inventory.stacks_of(&info.id).next().is_some())
            .ok_or_else(|| SendError::UnknownItem(item_query.to_string()))?;
        let candidates: Vec<&ItemStack> = self
            .player
            .inventory
            .stacks_of(&info.id)
            .filter(|s| quality.is_none_or(|q| s.quality == q))
            .collect();
        let Some(item) = candidates.iter().find(|s| self.available(s) >= count).map(|s| (*s).clone()) else {
            let (item, available) = match candidates.iter().max_by_key(|s| self.available(s)) {
                Some(s) => (s.tagged_name(), self.available(s)),
                None => (info.name.clone(), 0),
            };
            return Err(SendError::NotEnough {
                item,
                available,
                wanted: count,
            });
        };

        let quest_id = match quest {
            Some(quest_id) => {
                if self.quests.quest(&self.player.name, quest_id).is_none() {
                    return Err(SendError::UnknownQuest(quest_id.to_string()));
                }
                Some(quest_id.to_string())
            },
            None => self
                .previews_for(&npc.id)
                .into_iter()
                .find(|(_, details)| details.required_item_id == item.id)
                .map(|(quest_id, _)| quest_id),
        };

        let parcel = Parcel::new(ItemStack::new(&item.id, &item.name, item.quality, count), quest_id);
        let recipient = npc.id.clone();
        info!(
            "{} queued {} for '{recipient}'{}",
            self.player.name,
            parcel.gift(),
            parcel.quest_id().map(|q| format!(" (quest '{q}')")).unwrap_or_default()
        );
        self.mail.enqueue(&recipient, parcel.clone());
        Ok(parcel)
    }
}
