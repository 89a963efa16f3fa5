/// Weight-preset feed parser
///
/// The feed is a loose JavaScript object dump: one `<classId>: {` line opens
/// a class, and every line containing `__icon` is one spec preset of the form
/// `<specKey>: { __icon: "...", str: 1.5, agi: 0.8, ... }`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::stats::{Stat, WeightSet};
use crate::types::CharacterClass;
use crate::utils::string::{parse_float_invariant, parse_u32};

static CLASS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+: \{").expect("class line pattern"));

/// Feed stat codes
static STAT_CODES: Lazy<HashMap<&'static str, Stat>> = Lazy::new(|| {
    HashMap::from([
        ("mastrtng", Stat::Mastery),
        ("str", Stat::Strength),
        ("hitrtng", Stat::HitRating),
        ("exprtng", Stat::ExpertiseRating),
        ("critstrkrtng", Stat::CriticalStrikeRating),
        ("agi", Stat::Agility),
        ("hastertng", Stat::HasteRating),
        ("armor", Stat::Armor),
        ("sta", Stat::Stamina),
        ("dodgertng", Stat::DodgeRating),
        ("parryrtng", Stat::ParryRating),
        ("int", Stat::Intellect),
        ("splpwr", Stat::SpellPower),
        ("mledps", Stat::Dps),
        ("rgddps", Stat::Dps),
        ("spi", Stat::Spirit),
        ("armorbonus", Stat::Armor),
        ("atkpwr", Stat::AttackPower),
        ("dps", Stat::Dps),
        ("health", Stat::Health),
        ("feratkpwr", Stat::AttackPowerInForms),
    ])
});

/// Stats every preset carries at weight 1 unless the feed says otherwise
const IMPLIED_STATS: [Stat; 2] = [Stat::Stamina, Stat::Armor];

/// One validated spec preset, before it becomes a weight set
#[derive(Debug, Clone, PartialEq)]
pub struct SpecWeightRecord {
    pub class_id: u32,
    pub spec_key: String,
    /// Declared weights in feed order, one per stat
    pub weights: Vec<(Stat, f32)>,
}

impl SpecWeightRecord {
    /// `<ClassName>.<specKey>`, an unknown class renders as its id
    pub fn set_name(&self) -> String {
        let class = CharacterClass::from_id(self.class_id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| self.class_id.to_string());
        format!("{}.{}", class, self.spec_key)
    }

    pub fn weight(&self, stat: Stat) -> Option<f32> {
        self.weights
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, w)| *w)
    }

    pub fn to_weight_set(&self) -> WeightSet {
        let mut set = WeightSet::new(self.set_name(), self.weights.iter().copied());
        for stat in IMPLIED_STATS {
            if self.weight(stat).is_none() {
                set.set_weight(stat, 1.0);
            }
        }
        set
    }
}

/// Parse the whole feed into spec records
pub fn parse_feed(text: &str) -> Vec<SpecWeightRecord> {
    let mut class_id: Option<u32> = None;
    let mut records = Vec::new();

    for line in text.lines().map(str::trim) {
        if CLASS_LINE.is_match(line) {
            let id = line.split(':').next().and_then(parse_u32).unwrap_or(0);
            class_id = Some(id).filter(|id| *id != 0);
            if class_id.is_none() {
                continue;
            }
        }

        if !line.contains("__icon") {
            continue;
        }
        let Some(class_id) = class_id else {
            debug!("Skipping preset outside a class: {}", line);
            continue;
        };

        if let Some(record) = parse_spec_line(class_id, line) {
            records.push(record);
        }
    }

    records
}

/// Parse the feed straight into weight sets
pub fn parse_weight_sets(text: &str) -> Vec<WeightSet> {
    parse_feed(text)
        .iter()
        .map(|record| {
            debug!("Adding weight set {}", record.set_name());
            record.to_weight_set()
        })
        .collect()
}

fn parse_spec_line(class_id: u32, line: &str) -> Option<SpecWeightRecord> {
    let spec_key = line.split(':').next()?.trim().trim_matches('"').to_string();
    let open = line.find('{')?;
    let block = &line[open + 1..];
    let block = &block[..block.find('}')?];

    let mut weights: Vec<(Stat, f32)> = Vec::new();
    for pair in block.split(',') {
        let Some((code, value)) = pair.split_once(':') else {
            continue;
        };
        let code = code.trim().trim_matches('"');
        if code.contains('_') {
            continue;
        }
        let Some(stat) = STAT_CODES.get(code).copied() else {
            continue;
        };
        let Some(weight) = parse_float_invariant(value) else {
            debug!("Unparseable weight '{}' for {} in {}", value.trim(), code, spec_key);
            continue;
        };
        if weights.iter().any(|(s, _)| *s == stat) {
            continue;
        }
        weights.push((stat, weight));
    }

    Some(SpecWeightRecord {
        class_id,
        spec_key,
        weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"
var presets = {
    1: {
        arms: { __icon: "ability_warrior_savageblow", str: 1.0, critstrkrtng: 0.8, mledps: 3.5, rgddps: 0.2 },
        fury: { __icon: "ability_warrior_innerrage", str: 1.0, hastertng: 0.5, sta: 0.1 },
    },
    0: {
        junk: { __icon: "x", str: 9 },
    },
    6: {
        blooddps: { __icon: "spell_deathknight_bloodpresence", str: 1, exprtng: oops, agi: 0.5 },
    },
};"#;

    #[test]
    fn test_icon_line_opening_unknown_class() {
        let records = parse_feed(r#"181: { __icon: "x", str: 1.5, agi: 0.8, _hidden: 9 }"#);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.set_name(), "181.181");
        assert_eq!(record.weights, vec![(Stat::Strength, 1.5), (Stat::Agility, 0.8)]);

        let set = record.to_weight_set();
        assert_eq!(set.weight(Stat::Strength), 1.5);
        assert_eq!(set.weight(Stat::Agility), 0.8);
        assert_eq!(set.weight(Stat::Stamina), 1.0);
        assert_eq!(set.weight(Stat::Armor), 1.0);
        assert_eq!(set.weight(Stat::Intellect), 0.0);
    }

    #[test]
    fn test_classes_and_specs() {
        let records = parse_feed(FEED);
        let names: Vec<String> = records.iter().map(|r| r.set_name()).collect();
        assert_eq!(names, vec!["Warrior.arms", "Warrior.fury", "DeathKnight.blooddps"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = parse_feed(FEED);
        assert_eq!(records[0].weight(Stat::Dps), Some(3.5));
    }

    #[test]
    fn test_declared_stamina_is_kept() {
        let records = parse_feed(FEED);
        let fury = records[1].to_weight_set();
        assert_eq!(fury.weight(Stat::Stamina), 0.1);
        assert_eq!(fury.weight(Stat::Armor), 1.0);
    }

    #[test]
    fn test_bad_values_are_skipped() {
        let records = parse_feed(FEED);
        let blood = &records[2];
        assert_eq!(blood.weight(Stat::ExpertiseRating), None);
        assert_eq!(blood.weight(Stat::Agility), Some(0.5));
    }

    #[test]
    fn test_preset_without_class_is_skipped() {
        let text = "  frost: { __icon: \"x\", int: 1 }\n0: {\n  arcane: { __icon: \"y\", int: 1 }";
        assert!(parse_feed(text).is_empty());
    }
}
