//! `repl::system` module
//!
//! Handlers for inventory and friendship listings, help, saving, loading and quitting.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use log::{info, warn};
use textwrap::{fill, termwidth};

use crate::GIFTMAIL_VERSION;
use crate::save_files::{SAVE_DIR, load_slot, save_world};
use crate::style::GiftStyle;
use crate::world::GiftWorld;

const HELP_ENTRIES: &[(&str, &str)] = &[
    (
        "send [n] [normal|silver|gold|iridium] <item> to <npc> [for <quest>]",
        "Pack a gift for an NPC. Without a quality word the first stack with enough to spare is used. \
         Nothing leaves your inventory until the mail goes out, but queued items can't be sent twice. \
         If the gift would finish one of your quests for that NPC it is earmarked for it automatically.",
    ),
    ("mail | outbox", "List the parcels waiting to go out, in delivery order."),
    (
        "receiveall | deliver",
        "Send every parcel. Each one either completes its quest or is received as an ordinary gift.",
    ),
    ("quests", "Show your quest log."),
    ("preview <npc>", "Show which quests that NPC could complete right now, and what they need."),
    ("inventory | inv", "Show what you are carrying."),
    ("friends", "Show friendship points with everyone."),
    ("save <slot> | load <slot>", "Save or restore the whole session."),
    ("quit | exit", "Leave."),
];

/// Show available commands.
pub fn help_handler() {
    let width = termwidth().min(100);
    println!("{}", "Commands".subheading_style());
    for (usage, text) in HELP_ENTRIES {
        println!("{}", usage.bold());
        let options = textwrap::Options::new(width).initial_indent("    ").subsequent_indent("    ");
        println!("{}", fill(text, options));
    }
}

/// Show the player's inventory.
pub fn inventory_handler(world: &GiftWorld) {
    if world.player.inventory.is_empty() {
        println!("You are empty-handed.");
        return;
    }
    println!("{}", "Inventory".subheading_style());
    for stack in world.player.inventory.stacks() {
        let queued = stack.stack - world.available(stack);
        let note = if queued > 0 { format!(" ({queued} in the mail)") } else { String::new() };
        println!("  {}{note}", stack.to_string().item_style());
    }
}

/// Show friendship with every NPC.
pub fn friends_handler(world: &GiftWorld) {
    println!("{}", "Friendship".subheading_style());
    for npc in world.npcs.iter() {
        let birthday = if npc.birthday { " (birthday today!)" } else { "" };
        println!(
            "  {:<14} {}{birthday}",
            npc.name.npc_style(),
            npc.friendship.to_string().points_style()
        );
    }
}

/// Save the session to a slot.
///
/// # Errors
/// - if the save file can't be written
pub fn save_handler(world: &GiftWorld, slot: &str) -> Result<()> {
    let path = save_world(world, Path::new(SAVE_DIR), slot)?;
    println!("Saved to {}", path.display().to_string().underline());
    Ok(())
}

/// Replace the session with a saved one. Failures leave the current session alone.
pub fn load_handler(world: &mut GiftWorld, slot: &str) {
    match load_slot(Path::new(SAVE_DIR), slot) {
        Ok(loaded) => {
            if loaded.version != GIFTMAIL_VERSION {
                println!(
                    "{}: '{slot}' was saved by v{}, this is v{GIFTMAIL_VERSION}.",
                    "WARNING".bold().yellow(),
                    loaded.version.error_style()
                );
            }
            *world = loaded;
            println!("Loaded {}.", slot.underline().green());
            info!("player reloaded GiftWorld from slot '{slot}'");
        },
        Err(err) => {
            warn!("player attempted to load '{slot}': {err:#}");
            println!("Unable to load {}: {err}", slot.error_style());
        },
    }
}

/// Quit, leaving a summary in the log.
pub fn quit_handler(world: &GiftWorld) {
    if !world.mail.is_empty() {
        warn!("{} parcel(s) left undelivered at quit", world.mail.len());
        println!("{} parcel(s) never went out.", world.mail.len());
    }
    info!("ending friendship:");
    world
        .npcs
        .iter()
        .for_each(|npc| info!("- {} ({}): {}", npc.name, npc.id, npc.friendship));
    println!("Goodbye.");
}
