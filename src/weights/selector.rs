/// Weight-set selection
///
/// Maps the character's primary talent tree onto one of the downloaded
/// presets. Preset names are `<ClassName>.<specKey>`, tree names come from a
/// fixed table of talent tab ids so non-English clients match too.

use tracing::{info, warn};

use crate::stats::WeightSet;
use crate::types::{CharacterClass, CharacterState};

/// English talent tree name per talent tab id
pub const TALENT_TABS: [(u32, &str); 34] = [
    (0, "Lowbie"),
    (181, "Combat"),
    (182, "Assassination"),
    (183, "Subtlety"),
    (261, "Elemental"),
    (262, "Restoration"),
    (263, "Enhancement"),
    (398, "Blood"),
    (399, "Frost"),
    (400, "Unholy"),
    (409, "Tenacity"),
    (410, "Ferocity"),
    (411, "Cunning"),
    (746, "Arms"),
    (748, "Restoration"),
    (750, "Feral Combat"),
    (752, "Balance"),
    (760, "Discipline"),
    (795, "Shadow"),
    (799, "Arcane"),
    (807, "Marksmanship"),
    (809, "Survival"),
    (811, "Beast Mastery"),
    (813, "Holy"),
    (815, "Fury"),
    (823, "Frost"),
    (831, "Holy"),
    (839, "Protection"),
    (845, "Protection"),
    (851, "Fire"),
    (855, "Retribution"),
    (865, "Destruction"),
    (867, "Demonology"),
    (871, "Affliction"),
];

pub fn talent_tab_name(tab_id: u32) -> Option<&'static str> {
    TALENT_TABS
        .iter()
        .find(|(id, _)| *id == tab_id)
        .map(|(_, name)| *name)
}

/// Spec name used in file names, `Lowbie` when unspecced or unknown
pub fn spec_name(character: &CharacterState) -> &'static str {
    talent_tab_name(character.talent_tab_id).unwrap_or("Lowbie")
}

/// Strip the role suffix the feed adds to some spec keys
fn normalize_spec_key(key: &str, character: &CharacterState) -> String {
    let druid = character.class == CharacterClass::Druid;
    if key.ends_with("dps")
        && (character.class == CharacterClass::DeathKnight || (druid && !character.druid_tank_talent))
    {
        return key.trim_end_matches("dps").to_string();
    }
    if key.ends_with("tank") && druid && character.druid_tank_talent {
        return key.trim_end_matches("tank").to_string();
    }
    key.to_string()
}

/// Pick the preset for the character's spec.
///
/// `None` means no preset matched and the current set should stay.
pub fn select_weight_set(sets: &[WeightSet], character: &CharacterState) -> Option<WeightSet> {
    if character.talent_tab_id == 0 {
        info!("No talent points spent, using the lowbie weight set");
        return Some(WeightSet::lowbie());
    }

    let Some(tree) = talent_tab_name(character.talent_tab_id) else {
        warn!("Unknown talent tab id {}", character.talent_tab_id);
        return None;
    };
    let tree = tree.to_lowercase();
    let class_name = character.class.name();

    let chosen = sets
        .iter()
        .filter(|set| set.name().starts_with(class_name))
        .find(|set| {
            let key = set.name().split_once('.').map(|(_, key)| key).unwrap_or("");
            tree.starts_with(&normalize_spec_key(key, character))
        });

    match chosen {
        Some(set) => {
            info!("Found weight set {} for {}", set.name(), tree);
            Some(set.clone())
        }
        None => {
            warn!("No weight set matches {} {}", class_name, tree);
            None
        }
    }
}
