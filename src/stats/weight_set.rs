/// Weight sets
///
/// A weight set is the policy input driving every score: a named mapping of
/// stat to weight in which every scored stat is present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ItemStats, Stat};

pub const BLANK_SET_NAME: &str = "blank";
pub const LOWBIE_SET_NAME: &str = "lowbie";

/// Stats weighted at 1.0 by the lowbie set
const LOWBIE_STATS: [Stat; 5] = [
    Stat::Stamina,
    Stat::Intellect,
    Stat::Strength,
    Stat::Agility,
    Stat::Armor,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    name: String,
    weights: BTreeMap<Stat, f32>,
}

impl WeightSet {
    /// Build a set from partial weights. Undeclared stats become 0 and the
    /// `None` sentinel is dropped.
    pub fn new(name: impl Into<String>, weights: impl IntoIterator<Item = (Stat, f32)>) -> Self {
        let mut full: BTreeMap<Stat, f32> = Stat::SCORED.iter().map(|s| (*s, 0.0)).collect();
        for (stat, weight) in weights {
            if stat.is_scored() {
                full.insert(stat, weight);
            }
        }
        Self {
            name: name.into(),
            weights: full,
        }
    }

    /// All weights zero
    pub fn blank() -> Self {
        Self::new(BLANK_SET_NAME, std::iter::empty())
    }

    /// Default for characters without a spec
    pub fn lowbie() -> Self {
        Self::new(LOWBIE_SET_NAME, LOWBIE_STATS.iter().map(|s| (*s, 1.0)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self, stat: Stat) -> f32 {
        self.weights.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn set_weight(&mut self, stat: Stat, weight: f32) {
        if stat.is_scored() {
            self.weights.insert(stat, weight);
        }
    }

    /// Weights in canonical stat order
    pub fn weights(&self) -> impl Iterator<Item = (Stat, f32)> + '_ {
        self.weights.iter().map(|(stat, weight)| (*stat, *weight))
    }

    /// Same weights under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: self.weights.clone(),
        }
    }

    /// `Σ weight[s] * amount[s]`; stats missing from `stats` contribute nothing.
    pub fn evaluate(&self, stats: &ItemStats) -> f32 {
        stats
            .iter()
            .map(|(stat, amount)| self.weight(stat) * amount)
            .sum()
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scored_stat_is_present() {
        let set = WeightSet::new("partial", [(Stat::Strength, 2.0), (Stat::None, 5.0)]);
        assert_eq!(set.weights().count(), Stat::SCORED.len());
        assert_eq!(set.weight(Stat::Strength), 2.0);
        assert_eq!(set.weight(Stat::Agility), 0.0);
        assert!(set.weights().all(|(stat, _)| stat != Stat::None));
    }

    #[test]
    fn test_lowbie_weights() {
        let set = WeightSet::lowbie();
        assert_eq!(set.name(), "lowbie");
        assert_eq!(set.weight(Stat::Stamina), 1.0);
        assert_eq!(set.weight(Stat::Armor), 1.0);
        assert_eq!(set.weight(Stat::SpellPower), 0.0);
    }

    #[test]
    fn test_evaluate_sums_weighted_amounts() {
        let set = WeightSet::new("x", [(Stat::Strength, 2.0), (Stat::Stamina, 0.5)]);
        let stats = ItemStats::new()
            .with(Stat::Strength, 10.0)
            .with(Stat::Stamina, 4.0)
            .with(Stat::Spirit, 100.0);
        assert_eq!(set.evaluate(&stats), 22.0);
    }

    #[test]
    fn test_renamed_keeps_weights() {
        let set = WeightSet::lowbie().renamed("mine");
        assert_eq!(set.name(), "mine");
        assert_eq!(set.weight(Stat::Intellect), 1.0);
    }

    #[test]
    fn test_identical_stats_score_identically() {
        let set = WeightSet::new("all", Stat::SCORED.iter().map(|s| (*s, 1.0)));
        let build = |reversed: bool| {
            let mut entries = vec![
                (Stat::Strength, 1e8),
                (Stat::Agility, 1.0),
                (Stat::Stamina, -1e8),
            ];
            if reversed {
                entries.reverse();
            }
            entries.into_iter().collect::<ItemStats>()
        };

        let first = set.evaluate(&build(false));
        for i in 0..200 {
            let score = set.evaluate(&build(i % 2 == 1));
            assert_eq!(score.to_bits(), first.to_bits());
        }
    }
}
