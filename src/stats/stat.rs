/// Stat model
///
/// Closed set of scoring dimensions. The canonical name of each stat is the
/// one used by the persisted weight-set format (e.g. `DPS`, `AttackPower`).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Sentinel, never weighted
    None,
    Strength,
    Agility,
    Stamina,
    Intellect,
    Spirit,
    Armor,
    #[serde(rename = "DPS")]
    Dps,
    Health,
    Mana,
    AttackPower,
    AttackPowerInForms,
    SpellPower,
    HitRating,
    CriticalStrikeRating,
    HasteRating,
    ExpertiseRating,
    Mastery,
    DodgeRating,
    ParryRating,
    BlockRating,
    ResilienceRating,
    SpellPenetration,
}

impl Stat {
    /// Every stat that carries a weight, in canonical order.
    pub const SCORED: [Stat; 22] = [
        Stat::Strength,
        Stat::Agility,
        Stat::Stamina,
        Stat::Intellect,
        Stat::Spirit,
        Stat::Armor,
        Stat::Dps,
        Stat::Health,
        Stat::Mana,
        Stat::AttackPower,
        Stat::AttackPowerInForms,
        Stat::SpellPower,
        Stat::HitRating,
        Stat::CriticalStrikeRating,
        Stat::HasteRating,
        Stat::ExpertiseRating,
        Stat::Mastery,
        Stat::DodgeRating,
        Stat::ParryRating,
        Stat::BlockRating,
        Stat::ResilienceRating,
        Stat::SpellPenetration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::None => "None",
            Stat::Strength => "Strength",
            Stat::Agility => "Agility",
            Stat::Stamina => "Stamina",
            Stat::Intellect => "Intellect",
            Stat::Spirit => "Spirit",
            Stat::Armor => "Armor",
            Stat::Dps => "DPS",
            Stat::Health => "Health",
            Stat::Mana => "Mana",
            Stat::AttackPower => "AttackPower",
            Stat::AttackPowerInForms => "AttackPowerInForms",
            Stat::SpellPower => "SpellPower",
            Stat::HitRating => "HitRating",
            Stat::CriticalStrikeRating => "CriticalStrikeRating",
            Stat::HasteRating => "HasteRating",
            Stat::ExpertiseRating => "ExpertiseRating",
            Stat::Mastery => "Mastery",
            Stat::DodgeRating => "DodgeRating",
            Stat::ParryRating => "ParryRating",
            Stat::BlockRating => "BlockRating",
            Stat::ResilienceRating => "ResilienceRating",
            Stat::SpellPenetration => "SpellPenetration",
        }
    }

    /// Case-insensitive lookup by canonical name.
    pub fn from_name(name: &str) -> Option<Stat> {
        let name = name.trim();
        if name.eq_ignore_ascii_case(Stat::None.name()) {
            return Some(Stat::None);
        }
        Stat::SCORED
            .iter()
            .copied()
            .find(|stat| stat.name().eq_ignore_ascii_case(name))
    }

    pub fn is_scored(&self) -> bool {
        !matches!(self, Stat::None)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
