//! `repl::mail` module
//!
//! Handlers for queueing parcels and delivering the mail.

use colored::Colorize;
use log::info;

use crate::report::{log_report, render_to_string};
use crate::style::GiftStyle;
use crate::world::GiftWorld;

/// Deliver every pending parcel and show the results table.
pub fn receive_all_handler(world: &mut GiftWorld) {
    if world.mail.is_empty() {
        println!("The outbox is empty. Nothing to deliver.");
        info!("receive all requested with an empty mail queue");
        return;
    }
    let results = world.receive_all();
    println!("{}", render_to_string(&results));
    log_report(&results);
}

/// Queue a parcel for later delivery.
pub fn send_handler(world: &mut GiftWorld, item: &str, count: u32, npc: &str, quest: Option<&str>) {
    match world.send(npc, item, count, quest) {
        Ok(parcel) => {
            let recipient = world
                .npcs
                .find(npc)
                .map_or_else(|| npc.to_string(), |n| n.name.clone());
            print!(
                "Packed {} for {}",
                parcel.gift().to_string().item_style(),
                recipient.npc_style()
            );
            match parcel.quest_id() {
                Some(quest_id) => println!(" ({} {}).", "for quest".dimmed(), quest_id.quest_style()),
                None => println!("."),
            }
        },
        Err(err) => println!("{}", err.to_string().denied_style()),
    }
}

/// List pending parcels in the order they will be delivered.
pub fn mail_handler(world: &GiftWorld) {
    let registration: Vec<String> = world.npcs.iter().map(|n| n.id.clone()).collect();
    let pending = world.mail.pending(&registration);
    if pending.is_empty() {
        println!("The outbox is empty.");
        return;
    }
    println!("{}", "Outbox".subheading_style());
    for (recipient_id, parcel) in pending {
        let to = world
            .npcs
            .iter()
            .find(|n| n.id == recipient_id)
            .map_or_else(|| format!("{recipient_id} (?)"), |n| n.name.clone());
        let quest = parcel
            .quest_id()
            .map(|q| format!(" [{}]", q.quest_style()))
            .unwrap_or_default();
        println!(
            "  {} -> {}{quest}",
            parcel.gift().to_string().item_style(),
            to.npc_style()
        );
    }
}
