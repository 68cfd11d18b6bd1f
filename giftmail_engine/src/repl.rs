//! REPL and command handling utilities.
//!
//! The session runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that act on the [`GiftWorld`].

mod input;
pub mod mail;
pub mod quest;
pub mod system;

pub use mail::*;
pub use quest::*;
pub use system::*;

use anyhow::Result;
use log::info;

use crate::command::{Command, parse_command};
use crate::style::GiftStyle;
use crate::world::GiftWorld;

use input::{InputEvent, InputManager};

/// Run the main read-eval-print loop until the user quits.
///
/// # Errors
/// - Propagates failures from handlers, such as an unwritable save directory.
pub fn run_repl(world: &mut GiftWorld) -> Result<()> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    let mut input_manager = InputManager::new();
    loop {
        let prompt = format!("\n[{} | mail: {}]>> ", world.player.name, world.mail.len());
        let Ok(event) = input_manager.read_line(&prompt) else {
            println!("{}", "Failed to read input. Try again.".error_style());
            continue;
        };
        let input = match event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                println!("Command canceled.");
                continue;
            },
        };
        if input.trim().is_empty() {
            continue;
        }

        let command = parse_command(&input);
        info!("command: {command:?}");
        match command {
            ReceiveAll => receive_all_handler(world),
            Send {
                item,
                count,
                npc,
                quest,
            } => send_handler(world, &item, count, &npc, quest.as_deref()),
            Mail => mail_handler(world),
            Quests => quests_handler(world),
            Preview(npc) => preview_handler(world, &npc),
            Inventory => inventory_handler(world),
            Friends => friends_handler(world),
            Help => help_handler(),
            Save(slot) => save_handler(world, &slot)?,
            Load(slot) => load_handler(world, &slot),
            Quit => {
                quit_handler(world);
                break;
            },
            Unknown => println!("{}", "Didn't quite catch that? Try 'help'.".denied_style()),
        }
    }
    Ok(())
}
