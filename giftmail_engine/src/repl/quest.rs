//! `repl::quest` module
//!
//! Handlers for inspecting the quest log.

use crate::style::GiftStyle;
use crate::world::GiftWorld;

/// List every quest in the log with its progress.
pub fn quests_handler(world: &GiftWorld) {
    if world.quests.quests.is_empty() {
        println!("Your quest log is empty.");
        return;
    }
    println!("{}", "Quests".subheading_style());
    for quest in &world.quests.quests {
        if quest.completed {
            println!("  {} (complete)", quest.title.quest_complete_style());
        } else {
            println!("  {} ({})", quest.title.quest_style(), quest.progress());
        }
    }
}

/// Show what each quest the NPC could complete right now needs delivered.
///
/// Read-only: nothing in the world changes.
pub fn preview_handler(world: &GiftWorld, npc: &str) {
    let Some(recipient) = world.npcs.find(npc) else {
        println!("{}", format!("nobody called '{npc}' gets mail here").denied_style());
        return;
    };
    let previews = world.previews_for(&recipient.id);
    if previews.is_empty() {
        println!("{} has no quests you could finish by mail.", recipient.name.npc_style());
        return;
    }
    for (_, info) in previews {
        println!("{} {}", info.title.section_style(), info.text);
    }
}
