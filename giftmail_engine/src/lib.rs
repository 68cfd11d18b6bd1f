#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const GIFTMAIL_VERSION: &str = env!("CARGO_PKG_VERSION");

// Delivery core
pub mod distributor;
pub mod gift_taste;
pub mod inventory;
pub mod item;
pub mod lexicon;
pub mod npc;
pub mod parcel;
pub mod player;
pub mod quest;
pub mod quest_info;
pub mod report;
pub mod world;

// Session plumbing
pub mod command;
pub mod data_paths;
pub mod loader;
pub mod repl;
pub mod save_files;
pub mod slug;
pub mod style;

// Re-exports for convenience
pub use distributor::{DeliveryContext, DeliveryOutcome, GiftDistributor, GiftResult};
pub use inventory::InventoryStore;
pub use item::{ItemCatalog, ItemStack};
pub use loader::{load_world, load_world_from};
pub use npc::{Npc, RecipientDirectory};
pub use parcel::{MailQueue, Parcel};
pub use player::Player;
pub use quest::{Quest, QuestKind, QuestStore};
pub use quest_info::ItemQuestInfo;
pub use repl::run_repl;
pub use world::{GiftWorld, SendError};
