#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** giftmail **
//! Pack gifts for the neighbours, then send them all at once.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use giftmail_engine::style::GiftStyle;
use giftmail_engine::{load_world, run_repl};

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading gift world...");
    let mut world = load_world().context("while loading GiftWorld")?;
    info!("GiftWorld loaded successfully.");

    println!("{:^60}", "GIFTMAIL".bright_yellow().underline());
    println!(
        "\nYou are {}. {} parcel(s) are waiting in the outbox.",
        world.player.name.bold().bright_blue(),
        world.mail.len()
    );
    println!("Type {} for a list of commands.", "help".item_style());

    run_repl(&mut world)
}
