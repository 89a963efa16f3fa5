/// Loot roll policy
///
/// Answers a group loot roll exactly once. The item is wanted when it is on
/// the need list, or when it would fill an empty slot or beat something the
/// character is wearing.

use tracing::{debug, info, warn};

use super::item_link::ItemLink;
use crate::config::PolicyConfig;
use crate::equip::{ReplacementEvaluator, SlotResolver};
use crate::host::{GameHost, ItemCatalog};
use crate::logging::strip_link_markup;
use crate::scoring::ItemScorer;
use crate::stats::WeightSet;
use crate::types::{CharacterState, EquipRefusal, ItemStaticInfo, RollAction, RollCapabilities};

/// Pick the roll from what the game offers and whether the item is wanted
pub fn choose_roll(capabilities: RollCapabilities, want: bool) -> RollAction {
    if capabilities.can_need && want {
        RollAction::Need
    } else if capabilities.can_greed && want {
        RollAction::Greed
    } else if capabilities.can_disenchant {
        RollAction::Disenchant
    } else if capabilities.can_greed {
        RollAction::Greed
    } else {
        RollAction::Pass
    }
}

pub struct RollPolicy<'a> {
    policy: &'a PolicyConfig,
    catalog: &'a dyn ItemCatalog,
}

impl<'a> RollPolicy<'a> {
    pub fn new(policy: &'a PolicyConfig, catalog: &'a dyn ItemCatalog) -> Self {
        Self { policy, catalog }
    }

    /// Handle a roll-started notification. Returns the roll that was sent,
    /// `None` when rolling is disabled.
    pub fn handle_roll(
        &self,
        host: &dyn GameHost,
        weights: &WeightSet,
        roll_id: u32,
    ) -> Option<RollAction> {
        if !self.policy.roll_on_loot {
            return None;
        }

        let action = self.decide(host, weights, roll_id);
        host.roll_on_loot(roll_id, action);
        Some(action)
    }

    /// Work out the roll without sending it
    pub fn decide(&self, host: &dyn GameHost, weights: &WeightSet, roll_id: u32) -> RollAction {
        let capabilities = host.roll_capabilities(roll_id);

        let raw_link = host.roll_item_link(roll_id).unwrap_or_default();
        let Some(link) = ItemLink::parse(&raw_link) else {
            warn!(
                "Bad item link in roll {} ({}), passing",
                roll_id,
                strip_link_markup(&raw_link)
            );
            return RollAction::Pass;
        };
        let Some(info) = self.catalog.item_info(link.id) else {
            warn!("Item {} in roll {} is not in the catalog, passing", link.id, roll_id);
            return RollAction::Pass;
        };

        let name = self.display_name(&info, link.suffix_id);
        let character = host.character();

        let mut want = if self.policy.need_list.matches(info.id, &name) {
            info!("{} is on the need list", name);
            true
        } else if !info.equip_type.is_equippable() {
            false
        } else {
            self.is_upgrade(host, weights, &character, &info, roll_id)
        };

        if want && info.equip_type.is_equippable() {
            if let Err(refusal) = host.can_equip(&info) {
                if !self.level_override(&character, &info, &refusal) {
                    debug!("Not wanting {}: {:?}", name, refusal);
                    want = false;
                }
            }
        }

        let action = choose_roll(capabilities, want);
        info!("Rolling {:?} on {} (roll {})", action, name, roll_id);
        action
    }

    fn display_name(&self, info: &ItemStaticInfo, suffix_id: Option<u32>) -> String {
        match suffix_id.and_then(|id| self.catalog.random_property_name(id)) {
            Some(suffix) if !suffix.is_empty() => format!("{} {}", info.name, suffix),
            _ => info.name.clone(),
        }
    }

    fn is_upgrade(
        &self,
        host: &dyn GameHost,
        weights: &WeightSet,
        character: &CharacterState,
        info: &ItemStaticInfo,
        roll_id: u32,
    ) -> bool {
        let equipped = host.equipped_items();
        let stats = host.roll_item_stats(roll_id);
        let scorer = ItemScorer::new(weights, self.catalog);
        let resolver = SlotResolver::new(self.policy, &equipped, character);
        let score = scorer.score(info, stats.as_ref());

        if score > 0.0 && resolver.is_eligible(info, false) {
            if let Some(slot) = resolver.has_empty_slot(info) {
                debug!("{} would fill empty {:?}", info.name, slot);
                return true;
            }
        }

        ReplacementEvaluator::new(&resolver, &scorer)
            .replaceable_items(info, false)
            .iter()
            .any(|entry| {
                let better = score > entry.score;
                if better {
                    debug!(
                        "{} ({:.2}) beats {} ({:.2})",
                        info.name,
                        score,
                        entry.item.item.name(),
                        entry.score
                    );
                }
                better
            })
    }

    /// A level shortfall within the tolerance does not stop a roll
    fn level_override(
        &self,
        character: &CharacterState,
        info: &ItemStaticInfo,
        refusal: &EquipRefusal,
    ) -> bool {
        *refusal == EquipRefusal::LevelTooLow
            && self.policy.roll_ignore_level
            && info.required_level <= character.level.saturating_add(self.policy.roll_level_tolerance)
    }
}
