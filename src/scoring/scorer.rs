/// Item scorer
///
/// Turns an item into a single number under the current weight set:
/// - bags score their slot count
/// - cut gems score their weighted stats plus the stat their socket
///   enchantment grants
/// - everything else scores its weighted stats

use tracing::debug;

use crate::host::ItemCatalog;
use crate::stats::{ItemStats, Stat, WeightSet};
use crate::types::{GemClass, ItemStaticInfo};

pub struct ItemScorer<'a> {
    weights: &'a WeightSet,
    catalog: &'a dyn ItemCatalog,
}

impl<'a> ItemScorer<'a> {
    pub fn new(weights: &'a WeightSet, catalog: &'a dyn ItemCatalog) -> Self {
        Self { weights, catalog }
    }

    /// Score an item. `stats` are the instance stats; `None` falls back to
    /// the catalog's base stats.
    pub fn score(&self, info: &ItemStaticInfo, stats: Option<&ItemStats>) -> f32 {
        if info.bag_slots > 0 {
            return info.bag_slots as f32;
        }

        let stats = stats.unwrap_or(&info.base_stats);

        if info.is_gem() && info.gem_class != GemClass::Simple {
            if let Some((bonus_stat, amount)) = self.gem_bonus(info) {
                // an existing stat on the item wins over the socket bonus
                if !stats.contains(bonus_stat) {
                    let mut merged = stats.clone();
                    merged.set(bonus_stat, amount);
                    return self.weights.evaluate(&merged);
                }
            }
        }

        self.weights.evaluate(stats)
    }

    fn gem_bonus(&self, info: &ItemStaticInfo) -> Option<(Stat, f32)> {
        let enchantment = self.catalog.gem_properties(info.gem_properties_id);
        let bonus = enchantment.and_then(|id| self.catalog.enchantment_bonus(id));
        if bonus.is_none() {
            debug!(
                "No gem bonus for {} (gem properties {})",
                info.name, info.gem_properties_id
            );
        }
        bonus.filter(|(stat, _)| stat.is_scored())
    }
}
