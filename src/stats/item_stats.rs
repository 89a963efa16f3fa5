use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Stat;

/// Stat amounts carried by an item (static base stats or a specific instance).
/// Iteration follows canonical stat order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStats {
    amounts: BTreeMap<Stat, f32>,
}

impl ItemStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and catalog construction
    pub fn with(mut self, stat: Stat, amount: f32) -> Self {
        self.amounts.insert(stat, amount);
        self
    }

    pub fn get(&self, stat: Stat) -> f32 {
        self.amounts.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.amounts.contains_key(&stat)
    }

    pub fn set(&mut self, stat: Stat, amount: f32) {
        self.amounts.insert(stat, amount);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f32)> + '_ {
        self.amounts.iter().map(|(stat, amount)| (*stat, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl FromIterator<(Stat, f32)> for ItemStats {
    fn from_iter<I: IntoIterator<Item = (Stat, f32)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}
