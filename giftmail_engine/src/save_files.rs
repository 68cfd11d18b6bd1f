//! Save-game discovery and serialization helpers.
//!
//! Save files are RON snapshots of the whole [`GiftWorld`], named
//! `<slot>-giftmail-<version>.ron` so saves from older engine versions stay
//! visible and can be flagged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::GIFTMAIL_VERSION;
use crate::slug::sanitize_slug;
use crate::world::GiftWorld;

pub const SAVE_DIR: &str = "saved_games";
const SLOT_MARKER: &str = "-giftmail-";

/// A save file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
}

/// File path for a slot saved by the running engine version.
pub fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{}{SLOT_MARKER}{GIFTMAIL_VERSION}.ron", sanitize_slug(slot)))
}

/// Write the world to a save slot, returning the file written.
///
/// # Errors
/// Returns an error if the directory can't be created or the file can't be written.
pub fn save_world(world: &GiftWorld, dir: &Path, slot: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = save_path(dir, slot);
    let ron = ron::ser::to_string_pretty(world, ron::ser::PrettyConfig::default())
        .context("serializing world for save")?;
    fs::write(&path, ron).with_context(|| format!("writing save file {}", path.display()))?;
    info!("world saved to {}", path.display());
    Ok(path)
}

/// Load a save file from disk and deserialize its world state.
///
/// # Errors
/// Returns an error if the file cannot be read or deserialized.
pub fn load_save_file(path: &Path) -> Result<GiftWorld> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading save file {}", path.display()))?;
    let world =
        ron::from_str::<GiftWorld>(&raw).with_context(|| format!("parsing save file {}", path.display()))?;
    if world.version != GIFTMAIL_VERSION {
        warn!(
            "save file {} was written by version {} (running {GIFTMAIL_VERSION})",
            path.display(),
            world.version
        );
    }
    Ok(world)
}

/// Load the named slot, preferring the save written by the running version.
///
/// # Errors
/// Returns an error if no save exists for the slot or it can't be loaded.
pub fn load_slot(dir: &Path, slot: &str) -> Result<GiftWorld> {
    let slug = sanitize_slug(slot);
    let mut candidates: Vec<SaveSlot> = collect_save_slots(dir)?.into_iter().filter(|s| s.slot == slug).collect();
    if candidates.is_empty() {
        bail!("no saved game called '{slug}'");
    }
    candidates.sort_by_key(|s| s.version == GIFTMAIL_VERSION);
    let chosen = candidates.pop().context("no saved game candidates")?;
    load_save_file(&chosen.path)
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_path(&entry.path()) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.version.cmp(&b.version)));
    Ok(slots)
}

fn slot_from_path(path: &Path) -> Option<SaveSlot> {
    if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let (slot, version) = stem.rsplit_once(SLOT_MARKER)?;
    if slot.is_empty() {
        return None;
    }
    Some(SaveSlot {
        slot: slot.to_string(),
        version: version.to_string(),
        path: path.to_path_buf(),
    })
}
