use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Item quality codes the engine knows how to score and tag.
pub const KNOWN_QUALITIES: [u8; 4] = [0, 1, 2, 4];

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

struct IdSets<'a> {
    items: &'a HashSet<String>,
    npcs: &'a HashSet<String>,
    quests: &'a HashSet<String>,
}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// ```
/// use giftmail_data::{ItemDef, PlayerDef, StackDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     player: PlayerDef {
///         name: "Farmer".into(),
///         inventory: vec![StackDef { item: "parsnip".into(), count: 3, quality: 0 }],
///     },
///     items: vec![ItemDef {
///         id: "parsnip".into(),
///         name: "Parsnip".into(),
///         plural: None,
///         category: Some("vegetable".into()),
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut items = HashSet::new();
    let mut npcs = HashSet::new();
    let mut quests = HashSet::new();

    track_ids(
        "item",
        world.items.iter().map(|i| i.id.as_str()),
        &mut items,
        &mut errors,
    );
    track_ids("npc", world.npcs.iter().map(|n| n.id.as_str()), &mut npcs, &mut errors);
    track_ids(
        "quest",
        world.quests.iter().map(|q| q.id.as_str()),
        &mut quests,
        &mut errors,
    );

    let ids = IdSets {
        items: &items,
        npcs: &npcs,
        quests: &quests,
    };

    if world.player.name.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "player name missing".to_string(),
        });
    }

    for stack in &world.player.inventory {
        validate_stack(&stack.item, stack.count, stack.quality, &ids, &mut errors, "player inventory");
    }

    for item in &world.items {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' has no name", item.id),
            });
        }
    }

    validate_tastes(&world.universal_tastes, &ids, &mut errors, "universal tastes");
    for npc in &world.npcs {
        validate_tastes(&npc.tastes, &ids, &mut errors, &format!("npc '{}' tastes", npc.id));
    }

    for quest in &world.quests {
        validate_quest(quest, &ids, &mut errors);
    }

    for (idx, parcel) in world.mail.iter().enumerate() {
        let context = format!("mail parcel #{idx}");
        check_ref("npc", &parcel.to, ids.npcs, context.clone(), &mut errors);
        validate_stack(&parcel.item, parcel.count, parcel.quality, &ids, &mut errors, &context);
        if let Some(quest) = &parcel.quest {
            check_ref("quest", quest, ids.quests, context, &mut errors);
        }
    }
    validate_mail_stock(world, &mut errors);

    errors
}

/// Queued mail can't promise more of a stack than the player holds.
fn validate_mail_stock(world: &WorldDef, errors: &mut Vec<ValidationError>) {
    let mut held: HashMap<(&str, u8), u32> = HashMap::new();
    for stack in &world.player.inventory {
        *held.entry((stack.item.as_str(), stack.quality)).or_default() += stack.count;
    }
    let mut queued: Vec<((&str, u8), u32)> = Vec::new();
    for parcel in &world.mail {
        let key = (parcel.item.as_str(), parcel.quality);
        match queued.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += parcel.count,
            None => queued.push((key, parcel.count)),
        }
    }
    for ((item, quality), count) in queued {
        let available = held.get(&(item, quality)).copied().unwrap_or(0);
        if count > available {
            errors.push(ValidationError::InvalidValue {
                context: format!("mail sends {count} of '{item}' (quality {quality}) but the player holds {available}"),
            });
        }
    }
}

fn validate_quest(quest: &QuestDef, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>) {
    let context = format!("quest '{}'", quest.id);
    match &quest.kind {
        QuestKindDef::Fishing {
            item,
            target,
            number_to_fish,
            ..
        } => {
            check_ref("item", item, ids.items, context.clone(), errors);
            // an empty fishing target is legal: the engine falls back to a fixed recipient
            if !target.is_empty() {
                check_ref("npc", target, ids.npcs, context.clone(), errors);
            }
            if *number_to_fish == 0 {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} number_to_fish is zero"),
                });
            }
        },
        QuestKindDef::ItemDelivery {
            item, target, number, ..
        } => {
            check_ref("item", item, ids.items, context.clone(), errors);
            if target.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} delivery target missing"),
                });
            } else {
                check_ref("npc", target, ids.npcs, context.clone(), errors);
            }
            if *number == 0 {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} delivery number is zero"),
                });
            }
        },
        QuestKindDef::Other { .. } => {},
    }
}

fn validate_tastes(tastes: &TastesDef, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>, context: &str) {
    for entry in tastes.entries() {
        if let Some(category) = entry.strip_prefix(CATEGORY_PREFIX) {
            if category.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context}: empty category entry"),
                });
            }
        } else {
            check_ref("item", entry, ids.items, context.to_string(), errors);
        }
    }
}

fn validate_stack(
    item: &str,
    count: u32,
    quality: u8,
    ids: &IdSets<'_>,
    errors: &mut Vec<ValidationError>,
    context: &str,
) {
    check_ref("item", item, ids.items, context.to_string(), errors);
    if count == 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context}: zero count of '{item}'"),
        });
    }
    if !KNOWN_QUALITIES.contains(&quality) {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context}: unknown quality {quality} for '{item}'"),
        });
    }
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}
