//! Ordinary gift reactions.
//!
//! A gift that doesn't complete a quest is scored here: the recipient's taste for
//! the item picks a base value, which is scaled by item quality and birthdays.

use std::fmt::Display;

use log::info;
use serde::{Deserialize, Serialize};

use crate::item::{ItemStack, QUALITY_GOLD, QUALITY_IRIDIUM, QUALITY_SILVER};
use crate::npc::{GiftTastes, Npc, Taste};

/// Friendship points for each taste tier before multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TastePoints {
    pub loved: i32,
    pub liked: i32,
    pub neutral: i32,
    pub disliked: i32,
    pub hated: i32,
}

impl Default for TastePoints {
    fn default() -> Self {
        Self {
            loved: 80,
            liked: 45,
            neutral: 20,
            disliked: -20,
            hated: -40,
        }
    }
}

impl TastePoints {
    pub fn base(&self, taste: Taste) -> i32 {
        match taste {
            Taste::Loved => self.loved,
            Taste::Liked => self.liked,
            Taste::Neutral => self.neutral,
            Taste::Disliked => self.disliked,
            Taste::Hated => self.hated,
        }
    }
}

/// Multipliers applied to positive gifts by item quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityMultipliers {
    pub silver: f64,
    pub gold: f64,
    pub iridium: f64,
}

impl Default for QualityMultipliers {
    fn default() -> Self {
        Self {
            silver: 1.1,
            gold: 1.25,
            iridium: 1.5,
        }
    }
}

impl QualityMultipliers {
    pub fn for_quality(&self, quality: u8) -> f64 {
        match quality {
            QUALITY_SILVER => self.silver,
            QUALITY_GOLD => self.gold,
            QUALITY_IRIDIUM => self.iridium,
            _ => 1.0,
        }
    }
}

/// Tunable numbers for gift scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftScoring {
    pub points: TastePoints,
    pub quality: QualityMultipliers,
    pub birthday_multiplier: f64,
}

impl Default for GiftScoring {
    fn default() -> Self {
        Self {
            points: TastePoints::default(),
            quality: QualityMultipliers::default(),
            birthday_multiplier: 8.0,
        }
    }
}

/// How a recipient took an ordinary gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub taste: Taste,
    pub birthday: bool,
    pub points: i32,
}

impl Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.birthday {
            write!(f, "{} (bday)", self.taste)
        } else {
            write!(f, "{}", self.taste)
        }
    }
}

/// Scoring rules plus the tastes every NPC shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftReactions {
    pub scoring: GiftScoring,
    pub universal: GiftTastes,
}

impl GiftReactions {
    /// Looks up the recipient's taste: their item and category tastes, then the universal
    /// ones, then neutral. A missing recipient only has the universal tastes.
    pub fn taste(&self, recipient: Option<&Npc>, item_id: &str, category: Option<&str>) -> Taste {
        recipient
            .and_then(|npc| npc.tastes.taste_for(item_id, category))
            .or_else(|| self.universal.taste_for(item_id, category))
            .unwrap_or(Taste::Neutral)
    }

    /// Scores an ordinary gift.
    #[allow(clippy::cast_possible_truncation)]
    pub fn react(&self, recipient: Option<&Npc>, gift: &ItemStack, category: Option<&str>) -> Reaction {
        let taste = self.taste(recipient, &gift.id, category);
        let birthday = recipient.is_some_and(|npc| npc.birthday);

        let base = self.scoring.points.base(taste);
        let mut points = f64::from(base);
        if base > 0 {
            points *= self.scoring.quality.for_quality(gift.quality);
        }
        if birthday {
            points *= self.scoring.birthday_multiplier;
        }
        let points = points.trunc() as i32;

        info!(
            "'{}' reaction to {}: {taste}{} => {points} pts",
            recipient.map_or("<unknown recipient>", |npc| npc.name.as_str()),
            gift.tagged_name(),
            if birthday { " on birthday" } else { "" }
        );
        Reaction {
            taste,
            birthday,
            points,
        }
    }
}
