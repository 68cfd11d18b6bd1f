//! `WorldDef` loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime engine structs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use giftmail_data::{CATEGORY_PREFIX, ItemDef, NpcDef, ParcelDef, QuestDef, QuestKindDef, StackDef, TastesDef, WorldDef};

use crate::item::{ItemCatalog, ItemInfo, ItemStack};
use crate::npc::{GiftTastes, Npc, Taste};
use crate::parcel::Parcel;
use crate::player::Player;
use crate::quest::{Quest, QuestKind, QuestLog};
use crate::world::GiftWorld;

/// Load a `WorldDef` from a TOML file.
///
/// # Errors
/// - if the file can't be read or isn't a valid world
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading world from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing world TOML from '{}'", path.display()))
}

/// Convert a validated `WorldDef` into a populated `GiftWorld` (scoring is loaded separately).
///
/// # Errors
/// - if a stack or parcel names an item missing from the catalog
pub fn build_world_from_def(def: &WorldDef) -> Result<GiftWorld> {
    let mut world = GiftWorld::new_empty();

    for item_def in &def.items {
        world.items.insert(item_from_def(item_def));
    }

    let mut player = Player {
        name: def.player.name.clone(),
        ..Player::default()
    };
    for stack in &def.player.inventory {
        player.inventory.add(stack_from_def(stack, &world.items)?);
    }
    world.quests = QuestLog {
        owner: player.name.clone(),
        quests: def.quests.iter().map(quest_from_def).collect(),
    };
    world.player = player;

    for npc_def in &def.npcs {
        world.npcs.register(npc_from_def(npc_def));
    }
    world.reactions.universal = tastes_from_def(&def.universal_tastes);

    for parcel_def in &def.mail {
        let parcel = parcel_from_def(parcel_def, &world.items)?;
        world.mail.enqueue(&parcel_def.to, parcel);
    }

    info!(
        "world built: {} items, {} NPCs, {} quests, {} parcel(s) in the mail",
        world.items.len(),
        world.npcs.len(),
        world.quests.quests.len(),
        world.mail.len()
    );
    Ok(world)
}

fn item_from_def(def: &ItemDef) -> ItemInfo {
    ItemInfo {
        id: def.id.clone(),
        name: def.name.clone(),
        plural: def.plural.clone(),
        category: def.category.clone(),
    }
}

fn item_name(item_id: &str, items: &ItemCatalog) -> Result<String> {
    items
        .get(item_id)
        .map(|info| info.name.clone())
        .with_context(|| format!("item '{item_id}' is not in the catalog"))
}

fn stack_from_def(def: &StackDef, items: &ItemCatalog) -> Result<ItemStack> {
    Ok(ItemStack::new(&def.item, item_name(&def.item, items)?, def.quality, def.count))
}

fn parcel_from_def(def: &ParcelDef, items: &ItemCatalog) -> Result<Parcel> {
    let gift = ItemStack::new(&def.item, item_name(&def.item, items)?, def.quality, def.count);
    Ok(Parcel::new(gift, def.quest.clone()))
}

fn npc_from_def(def: &NpcDef) -> Npc {
    Npc {
        id: def.id.clone(),
        name: def.name.clone(),
        birthday: def.birthday,
        tastes: tastes_from_def(&def.tastes),
        friendship: def.friendship,
    }
}

/// Build gift tastes, routing `category:` entries to the category table.
pub(crate) fn tastes_from_def(def: &TastesDef) -> GiftTastes {
    let mut tastes = GiftTastes::default();
    let tiers = [
        (&def.loved, Taste::Loved),
        (&def.liked, Taste::Liked),
        (&def.neutral, Taste::Neutral),
        (&def.disliked, Taste::Disliked),
        (&def.hated, Taste::Hated),
    ];
    for (entries, taste) in tiers {
        for entry in entries {
            match entry.strip_prefix(CATEGORY_PREFIX) {
                Some(category) => tastes.add_category(category, taste),
                None => tastes.add_item(entry.as_str(), taste),
            }
        }
    }
    tastes
}

fn quest_from_def(def: &QuestDef) -> Quest {
    let kind = match &def.kind {
        QuestKindDef::Fishing {
            item,
            target,
            number_fished,
            number_to_fish,
        } => QuestKind::Fishing {
            item_id: item.clone(),
            target: target.clone(),
            number_fished: *number_fished,
            number_to_fish: *number_to_fish,
        },
        QuestKindDef::ItemDelivery {
            item,
            target,
            number,
            accepted,
        } => QuestKind::ItemDelivery {
            item_id: item.clone(),
            target: target.clone(),
            number: *number,
            accepted: *accepted,
        },
        QuestKindDef::Other { summary } => QuestKind::Other {
            summary: summary.clone(),
        },
    };
    Quest {
        id: def.id.clone(),
        title: def.title.clone(),
        description: def.description.clone(),
        reward: def.reward,
        completed: def.completed,
        kind,
    }
}
