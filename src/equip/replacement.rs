/// Replacement evaluator
///
/// Lists the equipped items a candidate could displace, each with its own
/// score, and picks the weakest of them.

use tracing::debug;

use super::resolver::SlotResolver;
use crate::inventory::EquipSlot;
use crate::scoring::ItemScorer;
use crate::types::{EquippedItem, ItemQuality, ItemStaticInfo};

/// An occupied slot the candidate could take over
#[derive(Debug, Clone, PartialEq)]
pub struct Replaceable {
    pub item: EquippedItem,
    pub score: f32,
    pub slot: EquipSlot,
}

pub struct ReplacementEvaluator<'a> {
    resolver: &'a SlotResolver<'a>,
    scorer: &'a ItemScorer<'a>,
}

impl<'a> ReplacementEvaluator<'a> {
    pub fn new(resolver: &'a SlotResolver<'a>, scorer: &'a ItemScorer<'a>) -> Self {
        Self { resolver, scorer }
    }

    /// One entry per occupied usable slot. Empty when the item is ineligible.
    pub fn replaceable_items(&self, info: &ItemStaticInfo, bound: bool) -> Vec<Replaceable> {
        if !self.resolver.is_eligible(info, bound) {
            return Vec::new();
        }

        let ignore_heirlooms = self.resolver.policy().ignore_heirlooms;
        let equipped = self.resolver.equipped();

        self.resolver
            .usable_slots(info)
            .filter_map(|slot| {
                let occupant = equipped.get(slot)?;
                if ignore_heirlooms && occupant.item.info.quality == ItemQuality::Heirloom {
                    debug!("Keeping heirloom {} in {:?}", occupant.item.name(), slot);
                    return None;
                }
                let score = self
                    .scorer
                    .score(&occupant.item.info, occupant.item.stats.as_ref());
                Some(Replaceable {
                    item: occupant.clone(),
                    score,
                    slot,
                })
            })
            .collect()
    }
}

/// Entry with the strictly lowest score, the first one on ties
pub fn worst(entries: &[Replaceable]) -> Option<&Replaceable> {
    entries.iter().fold(None, |lowest: Option<&Replaceable>, entry| match lowest {
        Some(current) if current.score <= entry.score => Some(current),
        _ => Some(entry),
    })
}
