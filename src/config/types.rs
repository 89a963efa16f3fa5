use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub character_name: Option<String>,

    /// Inventory snapshot read by the dry-run host
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    #[serde(default = "default_pulse_frequency_secs")]
    pub pulse_frequency_secs: u64,

    /// Equip types to ignore, by name or numeric id
    #[serde(default)]
    pub blacklisted_slots: Vec<String>,

    /// Quality tiers never equipped, by name or numeric id
    #[serde(default)]
    pub blacklisted_qualities: Vec<String>,

    #[serde(default)]
    pub only_equip_armor: Option<String>,

    #[serde(default)]
    pub main_hand_weapons: Vec<String>,

    #[serde(default)]
    pub off_hand_weapons: Vec<String>,

    #[serde(default)]
    pub ranged_weapons: Vec<String>,

    #[serde(default = "default_true")]
    pub ignore_heirlooms: bool,

    #[serde(default = "default_true")]
    pub ignore_epic_boe: bool,

    #[serde(default)]
    pub ignore_rare_boe: bool,

    #[serde(default)]
    pub socket_gems: bool,

    #[serde(default = "default_true")]
    pub match_socket_bonus: bool,

    #[serde(default)]
    pub roll_on_loot: bool,

    /// Item ids, exact names or regex patterns to always need
    #[serde(default)]
    pub roll_need_list: Vec<String>,

    #[serde(default)]
    pub roll_ignore_level: bool,

    #[serde(default)]
    pub roll_level_tolerance: u32,

    #[serde(default)]
    pub use_cached_weights: bool,

    #[serde(default = "default_weights_url")]
    pub weights_url: String,

    #[serde(default)]
    pub weights_cache_path: Option<PathBuf>,

    #[serde(default)]
    pub weights_path: Option<PathBuf>,
}

// Default values
fn default_pulse_frequency_secs() -> u64 {
    30
}

fn default_weights_url() -> String {
    "http://www.wowhead.com/data=weight-presets".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            character_name: None,
            snapshot_path: None,
            pulse_frequency_secs: default_pulse_frequency_secs(),
            blacklisted_slots: Vec::new(),
            blacklisted_qualities: Vec::new(),
            only_equip_armor: None,
            main_hand_weapons: Vec::new(),
            off_hand_weapons: Vec::new(),
            ranged_weapons: Vec::new(),
            ignore_heirlooms: true,
            ignore_epic_boe: true,
            ignore_rare_boe: false,
            socket_gems: false,
            match_socket_bonus: true,
            roll_on_loot: false,
            roll_need_list: Vec::new(),
            roll_ignore_level: false,
            roll_level_tolerance: 0,
            use_cached_weights: false,
            weights_url: default_weights_url(),
            weights_cache_path: None,
            weights_path: None,
        }
    }
}

impl Config {
    /// File name of the persisted weight set for this character and spec
    pub fn weights_file_name(&self, spec_name: &str) -> String {
        let character = self.character_name.as_deref().unwrap_or("Unknown");
        format!("AutoEquip_{}_{}_Weights.xml", character, spec_name)
    }
}
