use anyhow::{Context, Result};
use auto_equip::{
    config::{ConfigLoader, PolicyConfig},
    host::{AddonEvent, GameHost, ItemCatalog, SnapshotHost},
    logging::init_logger,
    state::{EngineState, SharedState},
    stats::WeightSet,
    weights::{load_weight_set, save_weight_set, select_weight_set, spec_name, FeedSource},
    AddonEventHandlers, GearManager,
};
use chrono::Utc;
use dialoguer::Input;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logger()?;
    info!("Starting AutoEquip v{}", VERSION);

    // Load or create configuration
    let config_loader = ConfigLoader::new();
    let mut config = config_loader.load()?;
    info!("Settings file: {:?}", config_loader.path());

    // Prompt for the character if not set
    if config.character_name.is_none() {
        let name: String = Input::new()
            .with_prompt("Enter your character name")
            .interact_text()?;
        config.character_name = Some(name);
        config_loader.save(&config)?;
    }

    if config.snapshot_path.is_none() {
        let path: String = Input::new()
            .with_prompt("Path to the inventory snapshot (JSON)")
            .default("snapshot.json".to_string())
            .interact_text()?;
        config.snapshot_path = Some(PathBuf::from(path));
        config_loader.save(&config)?;
    }

    let snapshot_path = config
        .snapshot_path
        .clone()
        .context("No inventory snapshot configured")?;
    let policy = PolicyConfig::from_config(&config);

    info!(
        "Configuration loaded for {}",
        config.character_name.as_deref().unwrap_or("Unknown")
    );
    info!("Gem socketing: {}", if policy.socket_gems { "ENABLED" } else { "DISABLED" });
    info!("Loot rolls: {}", if policy.roll_on_loot { "ENABLED" } else { "DISABLED" });

    let host = Arc::new(
        SnapshotHost::load(&snapshot_path)
            .with_context(|| format!("Failed to load snapshot {:?}", snapshot_path))?,
    );
    let character = host.character();
    let spec = spec_name(&character);
    info!("{} level {} ({})", character.class.name(), character.level, spec);

    // Persisted set first, then the preset feed, then the built-in default
    let weights_dir = config
        .weights_path
        .clone()
        .unwrap_or_else(|| config_loader.directory());
    let weights_file = weights_dir.join(config.weights_file_name(spec));

    let mut presets = Vec::new();
    let weights = match load_weight_set(&weights_file) {
        Ok(set) => set,
        Err(e) => {
            warn!("No usable weight set at {:?} ({}), using presets", weights_file, e);
            let feed = FeedSource::from_config(&config);
            info!("Weight preset cache: {:?}", feed.cache_path());
            presets = feed.weight_sets().await;
            let set = select_weight_set(&presets, &character).unwrap_or_else(WeightSet::lowbie);
            if let Err(e) = save_weight_set(&set, &weights_file) {
                warn!("Could not save weight set: {}", e);
            }
            set
        }
    };

    for (stat, weight) in weights.weights().filter(|(_, w)| *w != 0.0) {
        info!("- {} = {}", stat, weight);
    }

    let catalog: Arc<dyn ItemCatalog> = host.clone();
    let gear = GearManager::new(
        policy,
        SharedState::new(EngineState::new(weights)),
        catalog,
    );
    gear.set_presets(presets);

    match gear.pulse(&*host, Utc::now()) {
        Some(action) => info!("Decision: {:?}", action),
        None => info!("Decision: nothing to do"),
    }

    let handlers = AddonEventHandlers::new(&gear);
    for roll_id in host.pending_rolls() {
        let event = AddonEvent::LootRollStarted(roll_id);
        if handlers.handle_event(&*host, &event, Utc::now()).is_none() {
            info!("Roll {} left to the player", roll_id);
        }
    }

    info!(
        "Dry run finished: {} gear actions, {} rolls",
        host.actions().len(),
        host.rolled().len()
    );
    Ok(())
}
