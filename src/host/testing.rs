/// Test doubles shared by the module tests: an in-memory catalog, a
/// recording host and item fixtures.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::{GameHost, ItemCatalog};
use crate::inventory::{EquipSlot, EquipType, EquippedSet};
use crate::stats::{ItemStats, Stat};
use crate::types::{
    ArmorClass, BindType, CarriedItem, CharacterClass, CharacterState, EquipRefusal,
    EquippedItem, GearAction, GemClass, ItemClass, ItemId, ItemInstance, ItemQuality,
    ItemStaticInfo, RollAction, RollCapabilities, WeaponClass,
};

#[derive(Debug, Default)]
pub struct MockCatalog {
    pub items: HashMap<ItemId, ItemStaticInfo>,
    pub random_properties: HashMap<u32, String>,
    pub gem_properties: HashMap<u32, u32>,
    pub enchantments: HashMap<u32, (Stat, f32)>,
}

impl MockCatalog {
    pub fn with_item(mut self, info: ItemStaticInfo) -> Self {
        self.items.insert(info.id, info);
        self
    }
}

impl ItemCatalog for MockCatalog {
    fn item_info(&self, id: ItemId) -> Option<ItemStaticInfo> {
        self.items.get(&id).cloned()
    }

    fn random_property_name(&self, suffix_id: u32) -> Option<String> {
        self.random_properties.get(&suffix_id).cloned()
    }

    fn gem_properties(&self, gem_properties_id: u32) -> Option<u32> {
        self.gem_properties.get(&gem_properties_id).copied()
    }

    fn enchantment_bonus(&self, enchantment_id: u32) -> Option<(Stat, f32)> {
        self.enchantments.get(&enchantment_id).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockRoll {
    pub capabilities: RollCapabilities,
    pub link: Option<String>,
    pub stats: Option<ItemStats>,
}

/// Host that serves fixed state and records everything the core asks it to do
pub struct MockHost {
    pub character: CharacterState,
    pub carried: Vec<CarriedItem>,
    pub equipped: EquippedSet,
    pub refusals: HashMap<ItemId, EquipRefusal>,
    pub rolls: HashMap<u32, MockRoll>,
    pub actions: Mutex<Vec<GearAction>>,
    pub rolled: Mutex<Vec<(u32, RollAction)>>,
}

impl MockHost {
    pub fn new(character: CharacterState) -> Self {
        Self {
            character,
            carried: Vec::new(),
            equipped: EquippedSet::new(),
            refusals: HashMap::new(),
            rolls: HashMap::new(),
            actions: Mutex::new(Vec::new()),
            rolled: Mutex::new(Vec::new()),
        }
    }

    pub fn actions(&self) -> Vec<GearAction> {
        self.actions.lock().clone()
    }

    pub fn rolled(&self) -> Vec<(u32, RollAction)> {
        self.rolled.lock().clone()
    }
}

impl GameHost for MockHost {
    fn character(&self) -> CharacterState {
        self.character.clone()
    }

    fn carried_items(&self) -> Vec<CarriedItem> {
        self.carried.clone()
    }

    fn equipped_items(&self) -> EquippedSet {
        self.equipped.clone()
    }

    fn can_equip(&self, info: &ItemStaticInfo) -> Result<(), EquipRefusal> {
        match self.refusals.get(&info.id) {
            Some(refusal) => Err(refusal.clone()),
            None => Ok(()),
        }
    }

    fn perform(&self, action: &GearAction) {
        self.actions.lock().push(action.clone());
    }

    fn roll_capabilities(&self, roll_id: u32) -> RollCapabilities {
        self.rolls
            .get(&roll_id)
            .map(|r| r.capabilities)
            .unwrap_or_default()
    }

    fn roll_item_link(&self, roll_id: u32) -> Option<String> {
        self.rolls.get(&roll_id).and_then(|r| r.link.clone())
    }

    fn roll_item_stats(&self, roll_id: u32) -> Option<ItemStats> {
        self.rolls.get(&roll_id).and_then(|r| r.stats.clone())
    }

    fn roll_on_loot(&self, roll_id: u32, action: RollAction) {
        self.rolled.lock().push((roll_id, action));
    }
}

/// Level 80 warrior, out of combat, single wield, no talents
pub fn character() -> CharacterState {
    CharacterState {
        playable: true,
        in_combat: false,
        level: 80,
        class: CharacterClass::Warrior,
        can_dual_wield: false,
        talent_tab_id: 0,
        druid_tank_talent: false,
    }
}

/// Common-quality item with no stats for the given equip type
pub fn item_info(id: ItemId, equip_type: EquipType) -> ItemStaticInfo {
    let item_class = match equip_type {
        EquipType::Bag | EquipType::Quiver => ItemClass::Container,
        t if t.targets_weapon_slot() && t != EquipType::Shield && t != EquipType::Holdable => {
            ItemClass::Weapon
        }
        _ => ItemClass::Armor,
    };
    ItemStaticInfo {
        id,
        name: format!("Item {}", id),
        equip_type,
        item_class,
        armor_class: ArmorClass::None,
        weapon_class: None,
        gem_class: GemClass::None,
        gem_properties_id: 0,
        bind: BindType::None,
        quality: ItemQuality::Common,
        bag_slots: 0,
        base_stats: ItemStats::new(),
        required_level: 1,
    }
}

/// One-hand weapon of the given class
pub fn weapon_info(id: ItemId, class: WeaponClass) -> ItemStaticInfo {
    let mut info = item_info(id, EquipType::Weapon);
    info.item_class = ItemClass::Weapon;
    info.weapon_class = Some(class);
    info
}

pub fn gem_info(id: ItemId, gem_class: GemClass, gem_properties_id: u32) -> ItemStaticInfo {
    let mut info = item_info(id, EquipType::None);
    info.item_class = ItemClass::Gem;
    info.gem_class = gem_class;
    info.gem_properties_id = gem_properties_id;
    info
}

pub fn equipped(guid: u64, slot: EquipSlot, info: ItemStaticInfo) -> EquippedItem {
    EquippedItem {
        slot,
        item: ItemInstance::new(guid, info),
    }
}

pub fn carried(guid: u64, bag: u8, bag_slot: u8, info: ItemStaticInfo) -> CarriedItem {
    CarriedItem {
        bag,
        bag_slot,
        item: ItemInstance::new(guid, info),
    }
}
