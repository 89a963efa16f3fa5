//! AutoEquip gear manager
//!
//! Decides which carried items a bot character should wear, fills gem
//! sockets and answers group loot rolls, all driven by stat weight sets.

pub mod addon;
pub mod config;
pub mod equip;
pub mod host;
pub mod inventory;
pub mod logging;
pub mod loot;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod types;
pub mod utils;
pub mod weights;

pub use addon::{AddonEventHandlers, GearManager};
pub use host::{AddonEvent, GameHost, ItemCatalog};
pub use types::{GearAction, RollAction};
