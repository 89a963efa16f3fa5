/// Equip decision engine
///
/// One cycle looks at the carried items in bag order and issues at most one
/// action: equip into an empty slot, equip over the weakest occupant, move a
/// bag out of the container it would replace, or socket a gem.

use tracing::{debug, info};

use super::gems::gem_fits_in;
use super::replacement::{worst, ReplacementEvaluator};
use super::resolver::SlotResolver;
use crate::config::PolicyConfig;
use crate::host::{GameHost, ItemCatalog};
use crate::inventory::{EquipSlot, EquippedSet};
use crate::scoring::ItemScorer;
use crate::state::DecisionBlacklist;
use crate::stats::WeightSet;
use crate::types::{CarriedItem, CharacterState, GearAction};

pub struct EquipEngine<'a> {
    policy: &'a PolicyConfig,
    catalog: &'a dyn ItemCatalog,
}

impl<'a> EquipEngine<'a> {
    pub fn new(policy: &'a PolicyConfig, catalog: &'a dyn ItemCatalog) -> Self {
        Self { policy, catalog }
    }

    /// Run one decision cycle. Returns the action handed to the host, if any.
    pub fn run_cycle(
        &self,
        host: &dyn GameHost,
        weights: &WeightSet,
        blacklist: &mut DecisionBlacklist,
    ) -> Option<GearAction> {
        let character = host.character();
        let equipped = host.equipped_items();
        let carried = host.carried_items();
        let scorer = ItemScorer::new(weights, self.catalog);

        let action = self
            .intake(host, &character, &equipped, &carried, &scorer, blacklist)
            .or_else(|| {
                if character.in_combat || !self.policy.socket_gems {
                    return None;
                }
                self.socket_gems(&equipped, &carried, &scorer, blacklist)
            });

        if let Some(action) = &action {
            host.perform(action);
        }
        action
    }

    /// Phase A: find one carried item worth wearing
    fn intake(
        &self,
        host: &dyn GameHost,
        character: &CharacterState,
        equipped: &EquippedSet,
        carried: &[CarriedItem],
        scorer: &ItemScorer<'_>,
        blacklist: &mut DecisionBlacklist,
    ) -> Option<GearAction> {
        let resolver = SlotResolver::new(self.policy, equipped, character);
        let evaluator = ReplacementEvaluator::new(&resolver, scorer);

        for candidate in carried {
            let item = &candidate.item;
            let info = &item.info;

            if blacklist.contains(item.guid) || !info.equip_type.is_equippable() {
                continue;
            }
            if character.in_combat && !info.equip_type.targets_hand_slot() {
                continue;
            }

            if let Err(refusal) = host.can_equip(info) {
                debug!("Cannot equip {}: {:?}", item.name(), refusal);
                blacklist.insert(item.guid);
                continue;
            }

            let score = scorer.score(info, item.stats.as_ref());

            if score > 0.0 && resolver.is_eligible(info, item.soulbound) {
                if let Some(slot) = resolver.has_empty_slot(info) {
                    info!(
                        "Equipping {} into empty {:?} (score {:.2})",
                        item.name(),
                        slot,
                        score
                    );
                    blacklist.insert(item.guid);
                    return Some(GearAction::Equip {
                        bag: candidate.bag,
                        bag_slot: candidate.bag_slot,
                        slot,
                    });
                }
            }

            let entries = evaluator.replaceable_items(info, item.soulbound);
            let Some(target) = worst(&entries) else {
                debug!("Nothing {} could replace", item.name());
                blacklist.insert(item.guid);
                continue;
            };

            if score <= target.score {
                continue;
            }

            if target.slot.container_index() == Some(candidate.bag) {
                info!(
                    "Moving {} to the backpack before it replaces its own container",
                    item.name()
                );
                return Some(GearAction::MoveBagToBackpack {
                    bag: candidate.bag,
                    bag_slot: candidate.bag_slot,
                });
            }

            info!(
                "Equipping {} over {} in {:?} (score {:.2} > {:.2})",
                item.name(),
                target.item.item.name(),
                target.slot,
                score,
                target.score
            );
            blacklist.insert(item.guid);
            return Some(GearAction::Equip {
                bag: candidate.bag,
                bag_slot: candidate.bag_slot,
                slot: target.slot,
            });
        }

        None
    }

    /// Phase B: fill the first open socket that a carried gem fits
    fn socket_gems(
        &self,
        equipped: &EquippedSet,
        carried: &[CarriedItem],
        scorer: &ItemScorer<'_>,
        blacklist: &mut DecisionBlacklist,
    ) -> Option<GearAction> {
        for slot in EquipSlot::ALL {
            let Some(occupant) = equipped.get(slot) else {
                continue;
            };

            for (index, socket) in occupant.item.sockets.iter().enumerate() {
                if !socket.is_open() {
                    continue;
                }
                let Some(color) = socket.color else {
                    continue;
                };

                let best = carried
                    .iter()
                    .filter(|c| c.item.info.is_gem() && !blacklist.contains(c.item.guid))
                    .filter(|c| gem_fits_in(c.item.info.gem_class, color, self.policy.match_socket_bonus))
                    .map(|c| (c, scorer.score(&c.item.info, c.item.stats.as_ref())))
                    .filter(|(_, score)| *score > 0.0)
                    .fold(None, |best: Option<(&CarriedItem, f32)>, (gem, score)| match best {
                        Some((_, top)) if top >= score => best,
                        _ => Some((gem, score)),
                    });

                if let Some((gem, score)) = best {
                    info!(
                        "Socketing {} into {} socket {} of {} (score {:.2})",
                        gem.item.name(),
                        color.name(),
                        index + 1,
                        occupant.item.name(),
                        score
                    );
                    blacklist.insert(gem.item.guid);
                    return Some(GearAction::SocketGem {
                        slot,
                        bag: gem.bag,
                        bag_slot: gem.bag_slot,
                        socket: index,
                    });
                }
            }
        }

        None
    }
}
