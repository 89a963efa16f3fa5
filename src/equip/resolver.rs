/// Slot resolver
///
/// Decides where an item could go: which candidate slots are usable under
/// the policy and the current equipment, whether one of them is free, and
/// whether the item may be considered at all.

use tracing::debug;

use crate::config::PolicyConfig;
use crate::inventory::{EquipSlot, EquipType, EquippedSet};
use crate::types::{CharacterState, ItemClass, ItemQuality, ItemStaticInfo};

pub struct SlotResolver<'a> {
    policy: &'a PolicyConfig,
    equipped: &'a EquippedSet,
    character: &'a CharacterState,
}

impl<'a> SlotResolver<'a> {
    pub fn new(
        policy: &'a PolicyConfig,
        equipped: &'a EquippedSet,
        character: &'a CharacterState,
    ) -> Self {
        Self {
            policy,
            equipped,
            character,
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        self.policy
    }

    pub fn equipped(&self) -> &EquippedSet {
        self.equipped
    }

    /// Candidate slots the item may actually use, in table order.
    ///
    /// Drops slots whose weapon restriction excludes the item, the off hand
    /// behind an equipped two-hander, and the off hand for one-hand weapons
    /// when the character cannot dual wield.
    pub fn usable_slots<'s>(
        &'s self,
        info: &'s ItemStaticInfo,
    ) -> impl Iterator<Item = EquipSlot> + 's {
        info.equip_type
            .candidate_slots()
            .iter()
            .copied()
            .filter(move |slot| self.policy.allows_weapon(*slot, info.weapon_class))
            .filter(move |slot| *slot != EquipSlot::OffHand || self.off_hand_usable(info))
    }

    fn off_hand_usable(&self, info: &ItemStaticInfo) -> bool {
        if self.equipped.off_hand_blocked() {
            return false;
        }
        info.equip_type != EquipType::Weapon || self.character.can_dual_wield
    }

    /// First usable candidate slot with nothing in it
    pub fn has_empty_slot(&self, info: &ItemStaticInfo) -> Option<EquipSlot> {
        self.usable_slots(info)
            .find(|slot| self.equipped.is_empty_slot(*slot))
    }

    /// Policy gate evaluated before any placement is considered
    pub fn is_eligible(&self, info: &ItemStaticInfo, bound: bool) -> bool {
        if info.equip_type == EquipType::None {
            return false;
        }

        if self.policy.blacklisted_types.contains(&info.equip_type) {
            debug!("{} rejected: {:?} is blacklisted", info.name, info.equip_type);
            return false;
        }

        if let Some(wanted) = self.policy.only_equip_armor {
            let filtered = info.item_class == ItemClass::Armor
                && info.armor_class.is_body_armor()
                && info.equip_type != EquipType::Cloak;
            if filtered && info.armor_class != wanted {
                debug!(
                    "{} rejected: {:?} armour, only equipping {:?}",
                    info.name, info.armor_class, wanted
                );
                return false;
            }
        }

        if self.policy.blacklisted_qualities.contains(&info.quality) {
            debug!("{} rejected: {:?} quality is blacklisted", info.name, info.quality);
            return false;
        }

        if info.is_bind_on_equip() && !bound {
            let ignored = match info.quality {
                ItemQuality::Epic => self.policy.ignore_epic_boe,
                ItemQuality::Rare => self.policy.ignore_rare_boe,
                _ => false,
            };
            if ignored {
                debug!("{} rejected: unbound {:?} BOE", info.name, info.quality);
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::host::testing::{character, equipped, item_info, weapon_info};
    use crate::types::{ArmorClass, BindType, WeaponClass};

    fn policy_with(update: impl FnOnce(&mut Config)) -> PolicyConfig {
        let mut config = Config::default();
        update(&mut config);
        PolicyConfig::from_config(&config)
    }

    #[test]
    fn test_first_empty_slot_in_order() {
        let policy = PolicyConfig::default();
        let me = character();
        let mut set = EquippedSet::new();
        let ring = item_info(1, EquipType::Finger);

        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&ring), Some(EquipSlot::Finger1));

        set.insert(equipped(9, EquipSlot::Finger1, item_info(2, EquipType::Finger)));
        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&ring), Some(EquipSlot::Finger2));

        set.insert(equipped(10, EquipSlot::Finger2, item_info(3, EquipType::Finger)));
        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&ring), None);
    }

    #[test]
    fn test_weapon_restriction_blocks_empty_slot() {
        let policy = policy_with(|c| c.off_hand_weapons = vec!["Dagger".into()]);
        let mut me = character();
        me.can_dual_wield = true;
        let mut set = EquippedSet::new();
        set.insert(equipped(1, EquipSlot::MainHand, weapon_info(5, WeaponClass::Mace)));

        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&weapon_info(6, WeaponClass::Sword)), None);
        assert_eq!(
            resolver.has_empty_slot(&weapon_info(7, WeaponClass::Dagger)),
            Some(EquipSlot::OffHand)
        );
    }

    #[test]
    fn test_off_hand_needs_dual_wield_and_no_two_hander() {
        let policy = PolicyConfig::default();
        let mut me = character();
        let mut set = EquippedSet::new();
        set.insert(equipped(1, EquipSlot::MainHand, weapon_info(5, WeaponClass::Mace)));
        let sword = weapon_info(6, WeaponClass::Sword);
        let shield = item_info(8, EquipType::Shield);

        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&sword), None);
        assert_eq!(resolver.has_empty_slot(&shield), Some(EquipSlot::OffHand));

        me.can_dual_wield = true;
        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&sword), Some(EquipSlot::OffHand));

        set.insert(equipped(
            2,
            EquipSlot::MainHand,
            item_info(9, EquipType::TwoHandWeapon),
        ));
        let resolver = SlotResolver::new(&policy, &set, &me);
        assert_eq!(resolver.has_empty_slot(&shield), None);
    }

    #[test]
    fn test_eligibility_gate() {
        let me = character();
        let set = EquippedSet::new();

        let policy = policy_with(|c| c.blacklisted_slots = vec!["trinket".into()]);
        let resolver = SlotResolver::new(&policy, &set, &me);
        assert!(!resolver.is_eligible(&item_info(1, EquipType::Trinket), true));
        assert!(resolver.is_eligible(&item_info(2, EquipType::Finger), true));
        assert!(!resolver.is_eligible(&item_info(3, EquipType::None), true));
    }

    #[test]
    fn test_armor_filter() {
        let me = character();
        let set = EquippedSet::new();
        let policy = policy_with(|c| c.only_equip_armor = Some("Plate".into()));
        let resolver = SlotResolver::new(&policy, &set, &me);

        let mut mail = item_info(1, EquipType::Chest);
        mail.item_class = ItemClass::Armor;
        mail.armor_class = ArmorClass::Mail;
        assert!(!resolver.is_eligible(&mail, true));

        let mut plate = mail.clone();
        plate.armor_class = ArmorClass::Plate;
        assert!(resolver.is_eligible(&plate, true));

        let mut cloak = mail.clone();
        cloak.equip_type = EquipType::Cloak;
        cloak.armor_class = ArmorClass::Cloth;
        assert!(resolver.is_eligible(&cloak, true));

        let mut ring = item_info(2, EquipType::Finger);
        ring.item_class = ItemClass::Armor;
        ring.armor_class = ArmorClass::Miscellaneous;
        assert!(resolver.is_eligible(&ring, true));
    }

    #[test]
    fn test_unbound_boe_quality() {
        let me = character();
        let set = EquippedSet::new();
        let policy = policy_with(|c| {
            c.ignore_epic_boe = true;
            c.ignore_rare_boe = false;
        });
        let resolver = SlotResolver::new(&policy, &set, &me);

        let mut epic = item_info(1, EquipType::Head);
        epic.bind = BindType::OnEquip;
        epic.quality = ItemQuality::Epic;
        assert!(!resolver.is_eligible(&epic, false));
        assert!(resolver.is_eligible(&epic, true));

        let mut rare = epic.clone();
        rare.quality = ItemQuality::Rare;
        assert!(resolver.is_eligible(&rare, false));
    }

    #[test]
    fn test_quality_blacklist() {
        let me = character();
        let set = EquippedSet::new();
        let policy = policy_with(|c| c.blacklisted_qualities = vec!["Poor".into()]);
        let resolver = SlotResolver::new(&policy, &set, &me);

        let mut grey = item_info(1, EquipType::Feet);
        grey.quality = ItemQuality::Poor;
        assert!(!resolver.is_eligible(&grey, true));
    }
}
