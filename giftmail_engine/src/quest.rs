//! module: quest
//!
//! Quests are owned by the host world. The delivery engine only reads their
//! progress and performs the one-time completion transition through [`QuestStore`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use variantly::Variantly;

/// Shape of a quest, carrying only the fields its completion rule needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
pub enum QuestKind {
    /// Catch some fish, then bring one to the quest giver.
    Fishing {
        item_id: String,
        /// Quest giver; empty means the fixed fallback recipient.
        target: String,
        number_fished: u32,
        number_to_fish: u32,
    },
    /// Bring a number of items to a specific recipient.
    ItemDelivery {
        item_id: String,
        target: String,
        number: u32,
        accepted: bool,
    },
    /// Anything that can't be completed by handing over an item.
    Other { summary: String },
}

/// An entry in the player's quest log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Friendship points given to the recipient on completion.
    pub reward: i32,
    pub completed: bool,
    pub kind: QuestKind,
}

impl Quest {
    /// Short progress note for quest listings.
    pub fn progress(&self) -> String {
        match &self.kind {
            QuestKind::Fishing {
                number_fished,
                number_to_fish,
                ..
            } => format!("caught {number_fished}/{number_to_fish}"),
            QuestKind::ItemDelivery { number, accepted, .. } => {
                if *accepted {
                    format!("deliver {number}")
                } else {
                    "not accepted".to_string()
                }
            },
            QuestKind::Other { summary } => summary.clone(),
        }
    }
}

/// Failures of the completion transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("no quest '{quest_id}' in the log of '{actor}'")]
    NotFound { actor: String, quest_id: String },
    #[error("quest '{0}' is already complete")]
    AlreadyComplete(String),
}

/// Access to an actor's quests.
pub trait QuestStore {
    /// Quests the actor has not yet completed, in log order.
    fn active_quests(&self, actor: &str) -> Vec<&Quest>;

    /// Looks up any quest (complete or not) in the actor's log.
    fn quest(&self, actor: &str, quest_id: &str) -> Option<&Quest>;

    /// Marks a quest complete. This is one-way.
    ///
    /// # Errors
    /// - if the quest is missing or already complete
    fn complete(&mut self, actor: &str, quest_id: &str) -> Result<(), QuestError>;
}

/// The quest log of a single actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestLog {
    pub owner: String,
    pub quests: Vec<Quest>,
}

impl QuestLog {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            quests: Vec::new(),
        }
    }
}

impl QuestStore for QuestLog {
    fn active_quests(&self, actor: &str) -> Vec<&Quest> {
        if actor != self.owner {
            return Vec::new();
        }
        self.quests.iter().filter(|q| !q.completed).collect()
    }

    fn quest(&self, actor: &str, quest_id: &str) -> Option<&Quest> {
        if actor != self.owner {
            return None;
        }
        self.quests.iter().find(|q| q.id == quest_id)
    }

    fn complete(&mut self, actor: &str, quest_id: &str) -> Result<(), QuestError> {
        let not_found = || QuestError::NotFound {
            actor: actor.to_string(),
            quest_id: quest_id.to_string(),
        };
        if actor != self.owner {
            return Err(not_found());
        }
        let quest = self.quests.iter_mut().find(|q| q.id == quest_id).ok_or_else(not_found)?;
        if quest.completed {
            return Err(QuestError::AlreadyComplete(quest_id.to_string()));
        }
        quest.completed = true;
        Ok(())
    }
}
