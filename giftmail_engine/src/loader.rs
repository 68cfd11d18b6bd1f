//! Loader utilities for building a `GiftWorld` from data files.
//!
//! World content comes from `world.toml` (a `WorldDef`), gift scoring from `scoring.toml`.

pub mod scoring;
pub mod worlddef;

use std::path::Path;

use anyhow::{Context, Result, bail};
use giftmail_data::WorldDef;
use log::info;

use crate::data_paths::data_path;
use crate::loader::scoring::load_scoring;
use crate::loader::worlddef::{build_world_from_def, load_worlddef};
use crate::world::GiftWorld;

/// Load the `GiftWorld` from the default data directory.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or missing references.
pub fn load_world() -> Result<GiftWorld> {
    load_world_from(&data_path("world.toml"), &data_path("scoring.toml"))
}

/// Load a `GiftWorld` from explicit file paths.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or missing references.
pub fn load_world_from(world_path: &Path, scoring_path: &Path) -> Result<GiftWorld> {
    let worlddef = load_worlddef(world_path).context("while loading worlddef from file")?;
    validate_worlddef(&worlddef)?;
    let mut world = build_world_from_def(&worlddef).context("while building world from worlddef")?;
    world.reactions.scoring = load_scoring(scoring_path);
    info!(
        "player \"{}\" added to GiftWorld with {} quest(s)",
        world.player.name,
        world.quests.quests.len()
    );
    Ok(world)
}

/// Validate the `WorldDef` and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = giftmail_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}
