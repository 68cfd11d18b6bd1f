//! Command module
//!
//! Describes the commands understood by the REPL.

use variantly::Variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Friends,
    Help,
    Inventory,
    Load(String),
    Mail,
    Preview(String),
    Quests,
    Quit,
    ReceiveAll,
    Save(String),
    Send {
        item: String,
        count: u32,
        npc: String,
        quest: Option<String>,
    },
    Unknown,
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["receiveall" | "deliver"] | ["receive", "all"] => Command::ReceiveAll,
        ["send", rest @ ..] => parse_send(rest),
        ["mail" | "outbox"] => Command::Mail,
        ["quests"] => Command::Quests,
        ["preview", npc @ ..] if !npc.is_empty() => Command::Preview(npc.join(" ")),
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["friends"] => Command::Friends,
        ["help" | "?"] => Command::Help,
        ["save", slot @ ..] if !slot.is_empty() => Command::Save(slot.join(" ")),
        ["load", slot @ ..] if !slot.is_empty() => Command::Load(slot.join(" ")),
        ["quit" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    }
}

/// Parses `[<n>] <item> to <npc> [for <quest>]`. Item and NPC names may span several words.
fn parse_send(words: &[&str]) -> Command {
    let (count, words) = match words.split_first() {
        Some((first, rest)) if rest.first().is_some_and(|w| *w != "to") => match first.parse::<u32>() {
            Ok(count) => (count, rest),
            Err(_) => (1, words),
        },
        _ => (1, words),
    };
    let Some(to_idx) = words.iter().position(|w| *w == "to") else {
        return Command::Unknown;
    };
    let (item, rest) = (&words[..to_idx], &words[to_idx + 1..]);
    let (npc, quest) = match rest.iter().position(|w| *w == "for") {
        Some(for_idx) => (&rest[..for_idx], Some(rest[for_idx + 1..].join(" "))),
        None => (rest, None),
    };
    if item.is_empty() || npc.is_empty() || quest.as_ref().is_some_and(String::is_empty) {
        return Command::Unknown;
    }
    Command::Send {
        item: item.join(" "),
        count,
        npc: npc.join(" "),
        quest,
    }
}
