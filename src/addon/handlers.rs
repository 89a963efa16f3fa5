use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::manager::GearManager;
use crate::host::{AddonEvent, GameHost};
use crate::types::RollAction;

/// Routes host notifications to the gear manager
pub struct AddonEventHandlers<'a> {
    gear: &'a GearManager,
}

impl<'a> AddonEventHandlers<'a> {
    pub fn new(gear: &'a GearManager) -> Self {
        Self { gear }
    }

    /// Handle one event. Returns the roll sent for a loot roll event.
    pub fn handle_event(
        &self,
        host: &dyn GameHost,
        event: &AddonEvent,
        now: DateTime<Utc>,
    ) -> Option<RollAction> {
        debug!("[Event] {:?}", event);
        match event {
            AddonEvent::TalentGroupChanged => {
                info!("[Event] Talents changed, picking a new weight set");
                self.gear.refresh_weight_set(host, now);
                None
            }
            AddonEvent::LevelChanged(level) => {
                info!("[Event] Reached level {}", level);
                self.gear.reset(now);
                None
            }
            AddonEvent::SettingsReloaded => {
                self.gear.reset(now);
                None
            }
            AddonEvent::LootRollStarted(roll_id) => self.gear.roll(host, *roll_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PolicyConfig};
    use crate::host::testing::{character, item_info, MockCatalog, MockHost, MockRoll};
    use crate::inventory::EquipType;
    use crate::state::{EngineState, SharedState};
    use crate::stats::WeightSet;
    use crate::types::{CharacterClass, RollCapabilities};
    use std::sync::Arc;

    fn gear_with(policy: PolicyConfig, catalog: MockCatalog) -> GearManager {
        GearManager::new(
            policy,
            SharedState::new(EngineState::new(WeightSet::blank())),
            Arc::new(catalog),
        )
    }

    #[test]
    fn test_loot_roll_event_rolls_once() {
        let mut config = Config::default();
        config.roll_on_loot = true;
        let catalog = MockCatalog::default().with_item(item_info(300, EquipType::None));
        let gear = gear_with(PolicyConfig::from_config(&config), catalog);

        let mut host = MockHost::new(character());
        host.rolls.insert(
            4,
            MockRoll {
                capabilities: RollCapabilities {
                    can_need: true,
                    can_greed: true,
                    can_disenchant: false,
                },
                link: Some("item:300:0".into()),
                stats: None,
            },
        );

        let handlers = AddonEventHandlers::new(&gear);
        let sent = handlers.handle_event(&host, &AddonEvent::LootRollStarted(4), Utc::now());
        assert_eq!(sent, Some(RollAction::Greed));
        assert_eq!(host.rolled(), vec![(4, RollAction::Greed)]);
    }

    #[test]
    fn test_level_change_clears_blacklist() {
        let gear = gear_with(PolicyConfig::default(), MockCatalog::default());
        gear.state().lock().blacklist.insert(5);
        let host = MockHost::new(character());

        let handlers = AddonEventHandlers::new(&gear);
        assert_eq!(handlers.handle_event(&host, &AddonEvent::LevelChanged(12), Utc::now()), None);
        assert!(gear.state().lock().blacklist.is_empty());
    }

    #[test]
    fn test_talent_change_without_points_uses_lowbie() {
        let gear = gear_with(PolicyConfig::default(), MockCatalog::default());
        let mut me = character();
        me.class = CharacterClass::Priest;
        let host = MockHost::new(me);

        AddonEventHandlers::new(&gear).handle_event(&host, &AddonEvent::TalentGroupChanged, Utc::now());
        assert_eq!(gear.state().weights(), WeightSet::lowbie());
    }
}
