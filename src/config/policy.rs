/// Policy configuration
///
/// The typed, validated form of the settings consumed by the decision core.
/// Built once whenever settings are (re)loaded so decisions never re-parse
/// strings.

use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::warn;

use super::types::Config;
use crate::inventory::{EquipSlot, EquipType};
use crate::types::{ArmorClass, ItemId, ItemQuality, WeaponClass};

/// One need-list entry: an id, an exact name and a pattern, any of which may match
#[derive(Debug, Clone)]
pub struct NeedEntry {
    raw: String,
    id: Option<ItemId>,
    pattern: Option<Regex>,
}

impl NeedEntry {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let id = raw.parse::<ItemId>().ok().filter(|id| *id > 0);
        let pattern = match RegexBuilder::new(raw).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Need list entry '{}' is not a valid pattern: {}", raw, e);
                None
            }
        };
        Some(Self {
            raw: raw.to_string(),
            id,
            pattern,
        })
    }

    pub fn matches(&self, id: ItemId, name: &str) -> bool {
        if self.id == Some(id) {
            return true;
        }
        if self.raw.eq_ignore_ascii_case(name.trim()) {
            return true;
        }
        self.pattern
            .as_ref()
            .map(|re| re.is_match(name))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NeedList {
    entries: Vec<NeedEntry>,
}

impl NeedList {
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Self {
        Self {
            entries: values.iter().filter_map(|v| NeedEntry::parse(v.as_ref())).collect(),
        }
    }

    pub fn matches(&self, id: ItemId, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(id, name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub blacklisted_types: HashSet<EquipType>,
    pub blacklisted_qualities: HashSet<ItemQuality>,
    pub only_equip_armor: Option<ArmorClass>,
    /// Allowed weapon classes per weapon slot; a missing or empty entry means no restriction
    pub weapon_classes: HashMap<EquipSlot, HashSet<WeaponClass>>,
    pub ignore_heirlooms: bool,
    pub ignore_epic_boe: bool,
    pub ignore_rare_boe: bool,
    pub socket_gems: bool,
    pub match_socket_bonus: bool,
    pub roll_on_loot: bool,
    pub need_list: NeedList,
    pub roll_ignore_level: bool,
    pub roll_level_tolerance: u32,
    pub pulse_frequency: Duration,
}

impl PolicyConfig {
    /// Validate raw settings. Unknown names are logged and dropped.
    pub fn from_config(config: &Config) -> Self {
        let blacklisted_types = config
            .blacklisted_slots
            .iter()
            .filter_map(|value| {
                let parsed = EquipType::parse(value);
                if parsed.is_none() {
                    warn!("Ignoring unknown blacklisted slot '{}'", value);
                }
                parsed
            })
            .collect();

        let blacklisted_qualities = config
            .blacklisted_qualities
            .iter()
            .filter_map(|value| {
                let parsed = ItemQuality::parse(value);
                if parsed.is_none() {
                    warn!("Ignoring unknown blacklisted quality '{}'", value);
                }
                parsed
            })
            .collect();

        let only_equip_armor = config.only_equip_armor.as_deref().and_then(|name| {
            let parsed = ArmorClass::from_name(name);
            if parsed.is_none() {
                warn!("Ignoring unknown armour class '{}'", name);
            }
            parsed.filter(|class| *class != ArmorClass::None)
        });

        let mut weapon_classes = HashMap::new();
        for (slot, names) in [
            (EquipSlot::MainHand, &config.main_hand_weapons),
            (EquipSlot::OffHand, &config.off_hand_weapons),
            (EquipSlot::Ranged, &config.ranged_weapons),
        ] {
            let allowed: HashSet<WeaponClass> = names
                .iter()
                .filter_map(|name| {
                    let parsed = WeaponClass::from_name(name);
                    if parsed.is_none() {
                        warn!("Ignoring unknown weapon class '{}' for {:?}", name, slot);
                    }
                    parsed
                })
                .collect();
            if !allowed.is_empty() {
                weapon_classes.insert(slot, allowed);
            }
        }

        Self {
            blacklisted_types,
            blacklisted_qualities,
            only_equip_armor,
            weapon_classes,
            ignore_heirlooms: config.ignore_heirlooms,
            ignore_epic_boe: config.ignore_epic_boe,
            ignore_rare_boe: config.ignore_rare_boe,
            socket_gems: config.socket_gems,
            match_socket_bonus: config.match_socket_bonus,
            roll_on_loot: config.roll_on_loot,
            need_list: NeedList::parse(&config.roll_need_list),
            roll_ignore_level: config.roll_ignore_level,
            roll_level_tolerance: config.roll_level_tolerance,
            pulse_frequency: Duration::from_secs(config.pulse_frequency_secs),
        }
    }

    /// Whether the slot's weapon restriction lets this weapon class in.
    /// Items without a weapon class are never restricted.
    pub fn allows_weapon(&self, slot: EquipSlot, weapon: Option<WeaponClass>) -> bool {
        match (self.weapon_classes.get(&slot), weapon) {
            (Some(allowed), Some(class)) => allowed.contains(&class),
            _ => true,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_sets_from_strings() {
        let mut config = Config::default();
        config.blacklisted_slots = vec!["Trinket".into(), "18".into(), "Wings".into()];
        config.blacklisted_qualities = vec!["3".into(), "epic".into()];
        config.only_equip_armor = Some("plate".into());
        config.off_hand_weapons = vec!["Dagger".into(), "Spoon".into()];

        let policy = PolicyConfig::from_config(&config);
        assert_eq!(policy.blacklisted_types.len(), 2);
        assert!(policy.blacklisted_types.contains(&EquipType::Trinket));
        assert!(policy.blacklisted_types.contains(&EquipType::Bag));
        assert!(policy.blacklisted_qualities.contains(&ItemQuality::Rare));
        assert!(policy.blacklisted_qualities.contains(&ItemQuality::Epic));
        assert_eq!(policy.only_equip_armor, Some(ArmorClass::Plate));
        assert!(policy.allows_weapon(EquipSlot::OffHand, Some(WeaponClass::Dagger)));
        assert!(!policy.allows_weapon(EquipSlot::OffHand, Some(WeaponClass::Sword)));
        assert!(policy.allows_weapon(EquipSlot::OffHand, None));
        assert!(policy.allows_weapon(EquipSlot::MainHand, Some(WeaponClass::Sword)));
    }

    #[test]
    fn test_need_list_matching() {
        let list = NeedList::parse(&["12345", "Frozen Orb", "^Battered .*Helm$", "["]);
        assert!(list.matches(12345, "Anything"));
        assert!(list.matches(1, "frozen orb"));
        assert!(list.matches(2, "Battered Iron Helm"));
        assert!(!list.matches(3, "Shiny Helm"));
        // an invalid pattern still matches by exact name
        assert!(list.matches(4, "["));
    }

    #[test]
    fn test_empty_need_list() {
        let list = NeedList::parse::<&str>(&[" ", ""]);
        assert!(list.is_empty());
        assert!(!list.matches(1, "x"));
    }
}
