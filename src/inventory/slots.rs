/// Equip slots and equip types
///
/// This module defines the physical equipment slots of a character and the
/// item categories that map onto them. Slot numbers follow the game client's
/// 1-based inventory slot ids, which is also the iteration order used by the
/// decision engine.

use serde::{Deserialize, Serialize};

/// A physical equipment slot on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Head = 1,
    Neck = 2,
    Shoulder = 3,
    Shirt = 4,
    Chest = 5,
    Waist = 6,
    Legs = 7,
    Feet = 8,
    Wrist = 9,
    Hands = 10,
    Finger1 = 11,
    Finger2 = 12,
    Trinket1 = 13,
    Trinket2 = 14,
    Back = 15,
    MainHand = 16,
    OffHand = 17,
    Ranged = 18,
    Tabard = 19,
    Bag1 = 20,
    Bag2 = 21,
    Bag3 = 22,
    Bag4 = 23,
}

impl EquipSlot {
    /// Every slot in ordinal order
    pub const ALL: [EquipSlot; 23] = [
        EquipSlot::Head,
        EquipSlot::Neck,
        EquipSlot::Shoulder,
        EquipSlot::Shirt,
        EquipSlot::Chest,
        EquipSlot::Waist,
        EquipSlot::Legs,
        EquipSlot::Feet,
        EquipSlot::Wrist,
        EquipSlot::Hands,
        EquipSlot::Finger1,
        EquipSlot::Finger2,
        EquipSlot::Trinket1,
        EquipSlot::Trinket2,
        EquipSlot::Back,
        EquipSlot::MainHand,
        EquipSlot::OffHand,
        EquipSlot::Ranged,
        EquipSlot::Tabard,
        EquipSlot::Bag1,
        EquipSlot::Bag2,
        EquipSlot::Bag3,
        EquipSlot::Bag4,
    ];

    /// Get the raw slot number
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Container index of a bag slot (backpack is 0, so bags are 1..=4)
    pub fn container_index(&self) -> Option<u8> {
        match self {
            EquipSlot::Bag1 => Some(1),
            EquipSlot::Bag2 => Some(2),
            EquipSlot::Bag3 => Some(3),
            EquipSlot::Bag4 => Some(4),
            _ => None,
        }
    }

    pub fn is_weapon_slot(&self) -> bool {
        matches!(self, EquipSlot::MainHand | EquipSlot::OffHand | EquipSlot::Ranged)
    }

    /// Main hand or off hand, the only slots swapped while in combat
    pub fn is_hand_slot(&self) -> bool {
        matches!(self, EquipSlot::MainHand | EquipSlot::OffHand)
    }
}

/// Item category deciding which slot(s) an item can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipType {
    None = 0,
    Head = 1,
    Neck = 2,
    Shoulder = 3,
    Body = 4,
    Chest = 5,
    Waist = 6,
    Legs = 7,
    Feet = 8,
    Wrist = 9,
    Hand = 10,
    Finger = 11,
    Trinket = 12,
    Weapon = 13,
    Shield = 14,
    Ranged = 15,
    Cloak = 16,
    TwoHandWeapon = 17,
    Bag = 18,
    Tabard = 19,
    Robe = 20,
    WeaponMainHand = 21,
    WeaponOffHand = 22,
    Holdable = 23,
    Ammo = 24,
    Thrown = 25,
    RangedRight = 26,
    Quiver = 27,
    Relic = 28,
}

impl EquipType {
    pub const ALL: [EquipType; 29] = [
        EquipType::None,
        EquipType::Head,
        EquipType::Neck,
        EquipType::Shoulder,
        EquipType::Body,
        EquipType::Chest,
        EquipType::Waist,
        EquipType::Legs,
        EquipType::Feet,
        EquipType::Wrist,
        EquipType::Hand,
        EquipType::Finger,
        EquipType::Trinket,
        EquipType::Weapon,
        EquipType::Shield,
        EquipType::Ranged,
        EquipType::Cloak,
        EquipType::TwoHandWeapon,
        EquipType::Bag,
        EquipType::Tabard,
        EquipType::Robe,
        EquipType::WeaponMainHand,
        EquipType::WeaponOffHand,
        EquipType::Holdable,
        EquipType::Ammo,
        EquipType::Thrown,
        EquipType::RangedRight,
        EquipType::Quiver,
        EquipType::Relic,
    ];

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u32) -> Option<EquipType> {
        Self::ALL.iter().copied().find(|t| u32::from(t.id()) == id)
    }

    /// Case-insensitive lookup by variant name
    pub fn from_name(name: &str) -> Option<EquipType> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| format!("{:?}", t).eq_ignore_ascii_case(name))
    }

    /// Parse a settings entry, either a numeric id or a name
    pub fn parse(value: &str) -> Option<EquipType> {
        match value.trim().parse::<u32>() {
            Ok(id) => Self::from_id(id),
            Err(_) => Self::from_name(value),
        }
    }

    /// Slots this type could occupy, in the order they are tried
    pub fn candidate_slots(&self) -> &'static [EquipSlot] {
        use EquipSlot as S;
        match self {
            EquipType::Head => &[S::Head],
            EquipType::Neck => &[S::Neck],
            EquipType::Shoulder => &[S::Shoulder],
            EquipType::Body => &[S::Shirt],
            EquipType::Chest | EquipType::Robe => &[S::Chest],
            EquipType::Waist => &[S::Waist],
            EquipType::Legs => &[S::Legs],
            EquipType::Feet => &[S::Feet],
            EquipType::Wrist => &[S::Wrist],
            EquipType::Hand => &[S::Hands],
            EquipType::Finger => &[S::Finger1, S::Finger2],
            EquipType::Trinket => &[S::Trinket1, S::Trinket2],
            EquipType::Weapon => &[S::MainHand, S::OffHand],
            EquipType::TwoHandWeapon | EquipType::WeaponMainHand => &[S::MainHand],
            EquipType::Shield | EquipType::WeaponOffHand | EquipType::Holdable => &[S::OffHand],
            EquipType::Ranged | EquipType::Thrown | EquipType::RangedRight | EquipType::Relic => {
                &[S::Ranged]
            }
            EquipType::Cloak => &[S::Back],
            EquipType::Tabard => &[S::Tabard],
            EquipType::Bag | EquipType::Quiver => &[S::Bag1, S::Bag2, S::Bag3, S::Bag4],
            EquipType::None | EquipType::Ammo => &[],
        }
    }

    pub fn is_equippable(&self) -> bool {
        !self.candidate_slots().is_empty()
    }

    /// True when any candidate slot is a weapon slot
    pub fn targets_weapon_slot(&self) -> bool {
        self.candidate_slots().iter().any(|s| s.is_weapon_slot())
    }

    pub fn targets_hand_slot(&self) -> bool {
        self.candidate_slots().iter().any(|s| s.is_hand_slot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ids_are_ordinal() {
        for pair in EquipSlot::ALL.windows(2) {
            assert!(pair[0].id() < pair[1].id());
        }
        assert_eq!(EquipSlot::MainHand.id(), 16);
        assert_eq!(EquipSlot::Bag4.id(), 23);
    }

    #[test]
    fn test_container_index() {
        assert_eq!(EquipSlot::Bag1.container_index(), Some(1));
        assert_eq!(EquipSlot::Bag4.container_index(), Some(4));
        assert_eq!(EquipSlot::Head.container_index(), None);
    }

    #[test]
    fn test_multi_slot_types() {
        assert_eq!(
            EquipType::Finger.candidate_slots(),
            &[EquipSlot::Finger1, EquipSlot::Finger2]
        );
        assert_eq!(
            EquipType::Weapon.candidate_slots(),
            &[EquipSlot::MainHand, EquipSlot::OffHand]
        );
        assert_eq!(EquipType::TwoHandWeapon.candidate_slots(), &[EquipSlot::MainHand]);
        assert_eq!(EquipType::Bag.candidate_slots().len(), 4);
        assert!(EquipType::None.candidate_slots().is_empty());
    }

    #[test]
    fn test_parse_by_id_or_name() {
        assert_eq!(EquipType::parse("12"), Some(EquipType::Trinket));
        assert_eq!(EquipType::parse("trinket"), Some(EquipType::Trinket));
        assert_eq!(EquipType::parse(" TwoHandWeapon "), Some(EquipType::TwoHandWeapon));
        assert_eq!(EquipType::parse("99"), None);
        assert_eq!(EquipType::parse("wings"), None);
    }

    #[test]
    fn test_weapon_targets() {
        assert!(EquipType::Shield.targets_weapon_slot());
        assert!(EquipType::Relic.targets_weapon_slot());
        assert!(!EquipType::Finger.targets_weapon_slot());
        assert!(EquipType::Shield.targets_hand_slot());
        assert!(!EquipType::Relic.targets_hand_slot());
        assert!(!EquipType::Thrown.targets_hand_slot());
    }
}
