/// Dry-run host
///
/// Serves a character, inventory and catalog read from a JSON snapshot.
/// Actions are applied to the in-memory inventory and recorded so the
/// binary can report what it would have done in game.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::{GameHost, ItemCatalog};
use crate::inventory::EquippedSet;
use crate::logging::strip_link_markup;
use crate::stats::{ItemStats, Stat};
use crate::types::{
    CarriedItem, CharacterState, EquipRefusal, EquippedItem, GearAction, ItemId, ItemStaticInfo,
    RollAction, RollCapabilities,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotCatalog {
    #[serde(default)]
    pub items: Vec<ItemStaticInfo>,
    #[serde(default)]
    pub random_properties: HashMap<u32, String>,
    #[serde(default)]
    pub gem_properties: HashMap<u32, u32>,
    #[serde(default)]
    pub enchantments: HashMap<u32, (Stat, f32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRoll {
    pub roll_id: u32,
    #[serde(default)]
    pub capabilities: RollCapabilities,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub stats: Option<ItemStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub character: CharacterState,
    #[serde(default)]
    pub carried: Vec<CarriedItem>,
    #[serde(default)]
    pub equipped: Vec<EquippedItem>,
    #[serde(default)]
    pub catalog: SnapshotCatalog,
    #[serde(default)]
    pub refusals: HashMap<ItemId, EquipRefusal>,
    #[serde(default)]
    pub rolls: Vec<SnapshotRoll>,
}

struct Inventory {
    carried: Vec<CarriedItem>,
    equipped: EquippedSet,
}

pub struct SnapshotHost {
    character: CharacterState,
    inventory: Mutex<Inventory>,
    items: HashMap<ItemId, ItemStaticInfo>,
    catalog: SnapshotCatalog,
    refusals: HashMap<ItemId, EquipRefusal>,
    rolls: Vec<SnapshotRoll>,
    actions: Mutex<Vec<GearAction>>,
    rolled: Mutex<Vec<(u32, RollAction)>>,
}

impl SnapshotHost {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        let host = Self::from_json(&text)?;
        {
            let inventory = host.inventory.lock();
            info!(
                "Loaded snapshot {:?}: {} carried, {} equipped, {} pending rolls",
                path,
                inventory.carried.len(),
                inventory.equipped.iter().count(),
                host.rolls.len()
            );
        }
        Ok(host)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        Ok(Self::new(snapshot))
    }

    pub fn new(snapshot: Snapshot) -> Self {
        let items = snapshot
            .catalog
            .items
            .iter()
            .map(|info| (info.id, info.clone()))
            .collect();
        Self {
            character: snapshot.character,
            inventory: Mutex::new(Inventory {
                carried: snapshot.carried,
                equipped: snapshot.equipped.into_iter().collect(),
            }),
            items,
            catalog: snapshot.catalog,
            refusals: snapshot.refusals,
            rolls: snapshot.rolls,
            actions: Mutex::new(Vec::new()),
            rolled: Mutex::new(Vec::new()),
        }
    }

    /// Roll ids waiting for an answer, in snapshot order
    pub fn pending_rolls(&self) -> Vec<u32> {
        let rolled = self.rolled.lock();
        self.rolls
            .iter()
            .map(|r| r.roll_id)
            .filter(|id| !rolled.iter().any(|(done, _)| done == id))
            .collect()
    }

    pub fn actions(&self) -> Vec<GearAction> {
        self.actions.lock().clone()
    }

    pub fn rolled(&self) -> Vec<(u32, RollAction)> {
        self.rolled.lock().clone()
    }

    fn roll(&self, roll_id: u32) -> Option<&SnapshotRoll> {
        self.rolls.iter().find(|r| r.roll_id == roll_id)
    }
}

impl Inventory {
    fn take_carried(&mut self, bag: u8, bag_slot: u8) -> Option<CarriedItem> {
        let index = self
            .carried
            .iter()
            .position(|c| c.bag == bag && c.bag_slot == bag_slot)?;
        Some(self.carried.remove(index))
    }

    fn next_free_backpack_slot(&self) -> u8 {
        self.carried
            .iter()
            .filter(|c| c.bag == 0)
            .map(|c| c.bag_slot.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    fn apply(&mut self, action: &GearAction) {
        match *action {
            GearAction::Equip { bag, bag_slot, slot } => {
                let Some(incoming) = self.take_carried(bag, bag_slot) else {
                    return;
                };
                let displaced = self.equipped.insert(EquippedItem {
                    slot,
                    item: incoming.item,
                });
                if let Some(old) = displaced {
                    self.carried.push(CarriedItem {
                        bag,
                        bag_slot,
                        item: old.item,
                    });
                }
            }
            GearAction::MoveBagToBackpack { bag, bag_slot } => {
                let target = self.next_free_backpack_slot();
                if let Some(mut moved) = self.take_carried(bag, bag_slot) {
                    moved.bag = 0;
                    moved.bag_slot = target;
                    self.carried.push(moved);
                }
            }
            GearAction::SocketGem {
                slot,
                bag,
                bag_slot,
                socket,
            } => {
                let Some(gem) = self.take_carried(bag, bag_slot) else {
                    return;
                };
                if let Some(mut target) = self.equipped.remove(slot) {
                    if let Some(entry) = target.item.sockets.get_mut(socket) {
                        entry.gem = Some(gem.item.info.id);
                    }
                    self.equipped.insert(target);
                }
            }
        }
    }
}

impl GameHost for SnapshotHost {
    fn character(&self) -> CharacterState {
        self.character.clone()
    }

    fn carried_items(&self) -> Vec<CarriedItem> {
        let mut carried = self.inventory.lock().carried.clone();
        carried.sort_by_key(|c| (c.bag, c.bag_slot));
        carried
    }

    fn equipped_items(&self) -> EquippedSet {
        self.inventory.lock().equipped.clone()
    }

    fn can_equip(&self, info: &ItemStaticInfo) -> Result<(), EquipRefusal> {
        if let Some(refusal) = self.refusals.get(&info.id) {
            return Err(refusal.clone());
        }
        if info.required_level > self.character.level {
            return Err(EquipRefusal::LevelTooLow);
        }
        Ok(())
    }

    fn perform(&self, action: &GearAction) {
        info!("[dry run] {:?}", action);
        self.inventory.lock().apply(action);
        self.actions.lock().push(action.clone());
    }

    fn roll_capabilities(&self, roll_id: u32) -> RollCapabilities {
        self.roll(roll_id)
            .map(|r| r.capabilities)
            .unwrap_or_default()
    }

    fn roll_item_link(&self, roll_id: u32) -> Option<String> {
        self.roll(roll_id).and_then(|r| r.link.clone())
    }

    fn roll_item_stats(&self, roll_id: u32) -> Option<ItemStats> {
        self.roll(roll_id).and_then(|r| r.stats.clone())
    }

    fn roll_on_loot(&self, roll_id: u32, action: RollAction) {
        let link = self.roll_item_link(roll_id).unwrap_or_default();
        info!(
            "[dry run] RollOnLoot({}, {}) for {}",
            roll_id,
            action.code(),
            strip_link_markup(&link)
        );
        self.rolled.lock().push((roll_id, action));
    }
}

impl ItemCatalog for SnapshotHost {
    fn item_info(&self, id: ItemId) -> Option<ItemStaticInfo> {
        self.items.get(&id).cloned()
    }

    fn random_property_name(&self, suffix_id: u32) -> Option<String> {
        self.catalog.random_properties.get(&suffix_id).cloned()
    }

    fn gem_properties(&self, gem_properties_id: u32) -> Option<u32> {
        self.catalog.gem_properties.get(&gem_properties_id).copied()
    }

    fn enchantment_bonus(&self, enchantment_id: u32) -> Option<(Stat, f32)> {
        self.catalog.enchantments.get(&enchantment_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::EquipSlot;

    const SNAPSHOT: &str = r#"{
        "character": { "level": 80, "class": "Warrior" },
        "carried": [
            { "bag": 1, "bag_slot": 4, "guid": 11,
              "info": { "id": 501, "name": "Gold Ring", "equip_type": "Finger",
                        "item_class": "Armor", "quality": "Rare" } },
            { "bag": 0, "bag_slot": 2, "guid": 12,
              "info": { "id": 502, "name": "Bold Ruby", "equip_type": "None",
                        "item_class": "Gem", "gem_class": "Red", "gem_properties_id": 7,
                        "quality": "Rare" } }
        ],
        "equipped": [
            { "slot": "Finger1", "guid": 1,
              "info": { "id": 400, "name": "Copper Band", "equip_type": "Finger",
                        "item_class": "Armor", "quality": "Common" },
              "sockets": [ { "color": "Red" }, {}, {} ] }
        ],
        "catalog": {
            "items": [ { "id": 900, "name": "Epic Helm", "equip_type": "Head",
                         "item_class": "Armor", "quality": "Epic", "required_level": 82 } ],
            "gem_properties": { "7": 3001 },
            "enchantments": { "3001": ["Strength", 20.0] }
        },
        "rolls": [ { "roll_id": 3, "capabilities": { "can_greed": true },
                     "link": "|cffa335ee|Hitem:900:0:0:0:0:0:0:0:80|h[Epic Helm]|h|r" } ]
    }"#;

    #[test]
    fn test_snapshot_parses() {
        let host = SnapshotHost::from_json(SNAPSHOT).unwrap();
        let me = host.character();
        assert!(me.playable);
        assert_eq!(me.level, 80);

        let carried = host.carried_items();
        assert_eq!(carried.len(), 2);
        assert_eq!(carried[0].item.guid, 12);
        assert!(host.equipped_items().get(EquipSlot::Finger1).is_some());
        assert_eq!(host.gem_properties(7), Some(3001));
        assert_eq!(host.enchantment_bonus(3001), Some((Stat::Strength, 20.0)));
        assert_eq!(host.pending_rolls(), vec![3]);
    }

    #[test]
    fn test_level_refusal_from_catalog() {
        let host = SnapshotHost::from_json(SNAPSHOT).unwrap();
        let helm = host.item_info(900).unwrap();
        assert_eq!(host.can_equip(&helm), Err(EquipRefusal::LevelTooLow));
    }

    #[test]
    fn test_actions_are_applied_and_recorded() {
        let host = SnapshotHost::from_json(SNAPSHOT).unwrap();
        host.perform(&GearAction::Equip {
            bag: 1,
            bag_slot: 4,
            slot: EquipSlot::Finger2,
        });
        host.perform(&GearAction::SocketGem {
            slot: EquipSlot::Finger1,
            bag: 0,
            bag_slot: 2,
            socket: 0,
        });

        let equipped = host.equipped_items();
        assert_eq!(equipped.get(EquipSlot::Finger2).map(|e| e.item.guid), Some(11));
        let band = equipped.get(EquipSlot::Finger1).unwrap();
        assert_eq!(band.item.sockets[0].gem, Some(502));
        assert!(host.carried_items().is_empty());
        assert_eq!(host.actions().len(), 2);

        host.roll_on_loot(3, RollAction::Greed);
        assert!(host.pending_rolls().is_empty());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            SnapshotHost::from_json("{ not json"),
            Err(SnapshotError::Parse(_))
        ));
    }
}
