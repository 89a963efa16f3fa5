/// Inventory snapshot
///
/// Holds what the character is wearing, indexed by equip slot, as observed
/// at the start of a decision cycle.

use crate::types::EquippedItem;

use super::slots::{EquipSlot, EquipType};

const SLOT_COUNT: usize = EquipSlot::ALL.len();

#[derive(Debug, Clone)]
pub struct EquippedSet {
    /// One entry per slot, indexed by ordinal position
    slots: Vec<Option<EquippedItem>>,
}

impl EquippedSet {
    /// Create an empty set (nothing equipped)
    pub fn new() -> Self {
        Self {
            slots: vec![None; SLOT_COUNT],
        }
    }

    fn index(slot: EquipSlot) -> usize {
        usize::from(slot.id()) - 1
    }

    /// Get the item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        self.slots.get(Self::index(slot))?.as_ref()
    }

    /// Put an item into its slot, returning whatever was there
    pub fn insert(&mut self, item: EquippedItem) -> Option<EquippedItem> {
        let index = Self::index(item.slot);
        self.slots[index].replace(item)
    }

    pub fn remove(&mut self, slot: EquipSlot) -> Option<EquippedItem> {
        self.slots[Self::index(slot)].take()
    }

    pub fn is_empty_slot(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    /// Occupied slots in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = &EquippedItem> + '_ {
        self.slots.iter().flatten()
    }

    /// The main hand holds a two-hander, so the off hand cannot be used
    pub fn off_hand_blocked(&self) -> bool {
        self.get(EquipSlot::MainHand)
            .map(|mh| mh.item.info.equip_type == EquipType::TwoHandWeapon)
            .unwrap_or(false)
    }
}

impl Default for EquippedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<EquippedItem> for EquippedSet {
    fn from_iter<I: IntoIterator<Item = EquippedItem>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}
