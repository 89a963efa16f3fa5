/// Host seams
///
/// The decision core never talks to the game directly. Everything it reads
/// (inventory, character, roll prompts, catalog rows) and every action it
/// takes goes through these two traits.

pub mod snapshot;
#[cfg(test)]
pub mod testing;

use crate::inventory::EquippedSet;
use crate::stats::{ItemStats, Stat};
use crate::types::{
    CarriedItem, CharacterState, EquipRefusal, GearAction, ItemId, ItemStaticInfo, RollAction,
    RollCapabilities,
};

pub use snapshot::{SnapshotError, SnapshotHost};

/// The running game as seen by the add-on
pub trait GameHost {
    fn character(&self) -> CharacterState;

    /// Bag contents in carrier order
    fn carried_items(&self) -> Vec<CarriedItem>;

    fn equipped_items(&self) -> EquippedSet;

    /// "Can this character ever equip this item"
    fn can_equip(&self, info: &ItemStaticInfo) -> Result<(), EquipRefusal>;

    /// Execute an equip, bag move or socket action. The inventory must be
    /// re-observed before the next decision.
    fn perform(&self, action: &GearAction);

    fn roll_capabilities(&self, roll_id: u32) -> RollCapabilities;

    /// Raw item link of the rolled item
    fn roll_item_link(&self, roll_id: u32) -> Option<String>;

    /// Instance stats of the rolled item, including random properties
    fn roll_item_stats(&self, roll_id: u32) -> Option<ItemStats>;

    fn roll_on_loot(&self, roll_id: u32, action: RollAction);
}

/// Static client data tables
pub trait ItemCatalog {
    fn item_info(&self, id: ItemId) -> Option<ItemStaticInfo>;

    /// Display suffix of a random property ("of the Bear")
    fn random_property_name(&self, suffix_id: u32) -> Option<String>;

    /// Gem-properties row -> spell enchantment id
    fn gem_properties(&self, gem_properties_id: u32) -> Option<u32>;

    /// Stat granted by a spell enchantment
    fn enchantment_bonus(&self, enchantment_id: u32) -> Option<(Stat, f32)>;
}

/// Discrete notifications delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonEvent {
    /// Active talent group switched or talent points changed
    TalentGroupChanged,
    LevelChanged(u32),
    SettingsReloaded,
    /// A group loot roll started
    LootRollStarted(u32),
}
