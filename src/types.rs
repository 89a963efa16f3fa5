use serde::{Deserialize, Serialize};

use crate::inventory::{EquipSlot, EquipType};
use crate::stats::ItemStats;

/// Catalog id of an item
pub type ItemId = u32;

/// Unique identity of one owned item instance
pub type ItemGuid = u64;

/// Number of physical gem sockets on an item
pub const MAX_GEM_SOCKETS: usize = 3;

/// Item quality tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemQuality {
    Poor = 0,
    Common = 1,
    Uncommon = 2,
    Rare = 3,
    Epic = 4,
    Legendary = 5,
    Artifact = 6,
    Heirloom = 7,
}

impl ItemQuality {
    pub const ALL: [ItemQuality; 8] = [
        ItemQuality::Poor,
        ItemQuality::Common,
        ItemQuality::Uncommon,
        ItemQuality::Rare,
        ItemQuality::Epic,
        ItemQuality::Legendary,
        ItemQuality::Artifact,
        ItemQuality::Heirloom,
    ];

    /// Parse a settings entry, either a numeric id or a name
    pub fn parse(value: &str) -> Option<ItemQuality> {
        let value = value.trim();
        match value.parse::<u32>() {
            Ok(id) => Self::ALL.iter().copied().find(|q| *q as u32 == id),
            Err(_) => Self::ALL
                .iter()
                .copied()
                .find(|q| format!("{:?}", q).eq_ignore_ascii_case(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    Consumable,
    Container,
    Weapon,
    Gem,
    Armor,
    Reagent,
    Projectile,
    TradeGoods,
    Recipe,
    Quiver,
    Quest,
    Key,
    Miscellaneous,
    Glyph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorClass {
    None,
    Miscellaneous,
    Cloth,
    Leather,
    Mail,
    Plate,
    Shield,
    Relic,
}

impl ArmorClass {
    const ALL: [ArmorClass; 8] = [
        ArmorClass::None,
        ArmorClass::Miscellaneous,
        ArmorClass::Cloth,
        ArmorClass::Leather,
        ArmorClass::Mail,
        ArmorClass::Plate,
        ArmorClass::Shield,
        ArmorClass::Relic,
    ];

    pub fn from_name(name: &str) -> Option<ArmorClass> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| format!("{:?}", c).eq_ignore_ascii_case(name))
    }

    /// Cloth, leather, mail and plate are the only classes the armour filter compares
    pub fn is_body_armor(&self) -> bool {
        matches!(
            self,
            ArmorClass::Cloth | ArmorClass::Leather | ArmorClass::Mail | ArmorClass::Plate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Axe,
    TwoHandAxe,
    Bow,
    Gun,
    Mace,
    TwoHandMace,
    Polearm,
    Sword,
    TwoHandSword,
    Staff,
    Fist,
    Dagger,
    Thrown,
    Crossbow,
    Wand,
    FishingPole,
}

impl WeaponClass {
    const ALL: [WeaponClass; 16] = [
        WeaponClass::Axe,
        WeaponClass::TwoHandAxe,
        WeaponClass::Bow,
        WeaponClass::Gun,
        WeaponClass::Mace,
        WeaponClass::TwoHandMace,
        WeaponClass::Polearm,
        WeaponClass::Sword,
        WeaponClass::TwoHandSword,
        WeaponClass::Staff,
        WeaponClass::Fist,
        WeaponClass::Dagger,
        WeaponClass::Thrown,
        WeaponClass::Crossbow,
        WeaponClass::Wand,
        WeaponClass::FishingPole,
    ];

    pub fn from_name(name: &str) -> Option<WeaponClass> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| format!("{:?}", c).eq_ignore_ascii_case(name))
    }
}

/// Gem subclass, doubling as the gem's colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemClass {
    None,
    /// Uncut, must be cut before it can be socketed
    Simple,
    Meta,
    Prismatic,
    Red,
    Blue,
    Yellow,
    Orange,
    Green,
    Purple,
    Cogwheel,
    Hydraulic,
}

impl GemClass {
    pub fn name(&self) -> &'static str {
        match self {
            GemClass::None => "None",
            GemClass::Simple => "Simple",
            GemClass::Meta => "Meta",
            GemClass::Prismatic => "Prismatic",
            GemClass::Red => "Red",
            GemClass::Blue => "Blue",
            GemClass::Yellow => "Yellow",
            GemClass::Orange => "Orange",
            GemClass::Green => "Green",
            GemClass::Purple => "Purple",
            GemClass::Cogwheel => "Cogwheel",
            GemClass::Hydraulic => "Hydraulic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketColor {
    Meta,
    Red,
    Yellow,
    Blue,
    Prismatic,
    Cogwheel,
    Hydraulic,
}

impl SocketColor {
    pub fn name(&self) -> &'static str {
        match self {
            SocketColor::Meta => "Meta",
            SocketColor::Red => "Red",
            SocketColor::Yellow => "Yellow",
            SocketColor::Blue => "Blue",
            SocketColor::Prismatic => "Prismatic",
            SocketColor::Cogwheel => "Cogwheel",
            SocketColor::Hydraulic => "Hydraulic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BindType {
    #[default]
    None,
    OnPickup,
    OnEquip,
    OnUse,
    Quest,
}

/// Immutable catalog data for an item id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStaticInfo {
    pub id: ItemId,
    pub name: String,
    pub equip_type: EquipType,
    pub item_class: ItemClass,
    #[serde(default = "default_armor_class")]
    pub armor_class: ArmorClass,
    #[serde(default)]
    pub weapon_class: Option<WeaponClass>,
    #[serde(default = "default_gem_class")]
    pub gem_class: GemClass,
    /// Row in the gem-properties table, 0 when the item is not a gem
    #[serde(default)]
    pub gem_properties_id: u32,
    #[serde(default)]
    pub bind: BindType,
    pub quality: ItemQuality,
    #[serde(default)]
    pub bag_slots: u32,
    #[serde(default)]
    pub base_stats: ItemStats,
    #[serde(default)]
    pub required_level: u32,
}

impl ItemStaticInfo {
    pub fn is_bind_on_equip(&self) -> bool {
        self.bind == BindType::OnEquip
    }

    pub fn is_gem(&self) -> bool {
        self.item_class == ItemClass::Gem
    }
}

fn default_armor_class() -> ArmorClass {
    ArmorClass::None
}

fn default_gem_class() -> GemClass {
    GemClass::None
}

/// One physical gem socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GemSocket {
    /// `None` when the item has no socket here
    #[serde(default)]
    pub color: Option<SocketColor>,
    /// Gem currently socketed, if any
    #[serde(default)]
    pub gem: Option<ItemId>,
}

impl GemSocket {
    pub fn empty(color: SocketColor) -> Self {
        Self {
            color: Some(color),
            gem: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.color.is_some() && self.gem.is_none()
    }
}

/// An owned item instance, wherever it currently lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub guid: ItemGuid,
    pub info: ItemStaticInfo,
    /// Instance stats including random properties, if known
    #[serde(default)]
    pub stats: Option<ItemStats>,
    #[serde(default)]
    pub soulbound: bool,
    #[serde(default)]
    pub sockets: [GemSocket; MAX_GEM_SOCKETS],
}

impl ItemInstance {
    pub fn new(guid: ItemGuid, info: ItemStaticInfo) -> Self {
        Self {
            guid,
            info,
            stats: None,
            soulbound: false,
            sockets: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }
}

/// Item sitting in a bag container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarriedItem {
    /// Container index, 0 is the backpack
    pub bag: u8,
    /// Slot inside the container
    pub bag_slot: u8,
    #[serde(flatten)]
    pub item: ItemInstance,
}

/// Item occupying an equip slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub slot: EquipSlot,
    #[serde(flatten)]
    pub item: ItemInstance,
}

/// Playable classes with their client ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior = 1,
    Paladin = 2,
    Hunter = 3,
    Rogue = 4,
    Priest = 5,
    DeathKnight = 6,
    Shaman = 7,
    Mage = 8,
    Warlock = 9,
    Druid = 11,
}

impl CharacterClass {
    const ALL: [CharacterClass; 10] = [
        CharacterClass::Warrior,
        CharacterClass::Paladin,
        CharacterClass::Hunter,
        CharacterClass::Rogue,
        CharacterClass::Priest,
        CharacterClass::DeathKnight,
        CharacterClass::Shaman,
        CharacterClass::Mage,
        CharacterClass::Warlock,
        CharacterClass::Druid,
    ];

    pub fn from_id(id: u32) -> Option<CharacterClass> {
        Self::ALL.iter().copied().find(|c| *c as u32 == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Hunter => "Hunter",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Priest => "Priest",
            CharacterClass::DeathKnight => "DeathKnight",
            CharacterClass::Shaman => "Shaman",
            CharacterClass::Mage => "Mage",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Druid => "Druid",
        }
    }
}

/// What the host reports about the character each tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// In game, in world, and alive enough to act
    #[serde(default = "default_true")]
    pub playable: bool,
    #[serde(default)]
    pub in_combat: bool,
    pub level: u32,
    pub class: CharacterClass,
    #[serde(default)]
    pub can_dual_wield: bool,
    /// Primary talent tab id, 0 when no talent points are spent
    #[serde(default)]
    pub talent_tab_id: u32,
    #[serde(default)]
    pub druid_tank_talent: bool,
}

fn default_true() -> bool {
    true
}

/// Why the host refuses an equip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipRefusal {
    LevelTooLow,
    WrongClass,
    NoProficiency,
    Unique,
    Other(String),
}

/// The single mutating action a decision cycle can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearAction {
    /// Pick up the bag item and equip it into `slot`
    Equip { bag: u8, bag_slot: u8, slot: EquipSlot },
    /// Move an equipped-bag candidate out of the bag it would replace
    MoveBagToBackpack { bag: u8, bag_slot: u8 },
    /// Socket a carried gem into an equipped item
    SocketGem {
        slot: EquipSlot,
        bag: u8,
        bag_slot: u8,
        socket: usize,
    },
}

/// Roll answer, numeric values match the client's roll API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollAction {
    Pass = 0,
    Need = 1,
    Greed = 2,
    Disenchant = 3,
}

impl RollAction {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Options the game offers for one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollCapabilities {
    #[serde(default)]
    pub can_need: bool,
    #[serde(default)]
    pub can_greed: bool,
    #[serde(default)]
    pub can_disenchant: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parse() {
        assert_eq!(ItemQuality::parse("4"), Some(ItemQuality::Epic));
        assert_eq!(ItemQuality::parse("heirloom"), Some(ItemQuality::Heirloom));
        assert_eq!(ItemQuality::parse("shiny"), None);
    }

    #[test]
    fn test_roll_action_codes() {
        assert_eq!(RollAction::Pass.code(), 0);
        assert_eq!(RollAction::Need.code(), 1);
        assert_eq!(RollAction::Greed.code(), 2);
        assert_eq!(RollAction::Disenchant.code(), 3);
    }

    #[test]
    fn test_class_ids() {
        assert_eq!(CharacterClass::from_id(11), Some(CharacterClass::Druid));
        assert_eq!(CharacterClass::from_id(10), None);
        assert_eq!(CharacterClass::from_id(0), None);
    }

    #[test]
    fn test_socket_open() {
        assert!(GemSocket::empty(SocketColor::Red).is_open());
        assert!(!GemSocket::default().is_open());
        let filled = GemSocket {
            color: Some(SocketColor::Blue),
            gem: Some(40_000),
        };
        assert!(!filled.is_open());
    }
}
