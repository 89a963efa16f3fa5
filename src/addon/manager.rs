/// Gear manager
///
/// The context object the host talks to. Owns the validated policy, the
/// shared engine state and the downloaded presets, and wires pulses and
/// roll prompts to the decision core.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::PolicyConfig;
use crate::equip::EquipEngine;
use crate::host::{GameHost, ItemCatalog};
use crate::loot::RollPolicy;
use crate::state::SharedState;
use crate::stats::WeightSet;
use crate::types::{GearAction, RollAction};
use crate::weights::select_weight_set;

pub struct GearManager {
    policy: RwLock<PolicyConfig>,
    state: SharedState,
    catalog: Arc<dyn ItemCatalog>,
    presets: RwLock<Vec<WeightSet>>,
}

impl GearManager {
    pub fn new(policy: PolicyConfig, state: SharedState, catalog: Arc<dyn ItemCatalog>) -> Self {
        Self {
            policy: RwLock::new(policy),
            state,
            catalog,
            presets: RwLock::new(Vec::new()),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn policy(&self) -> PolicyConfig {
        self.policy.read().clone()
    }

    /// Presets the spec selection chooses from
    pub fn set_presets(&self, presets: Vec<WeightSet>) {
        debug!("Keeping {} weight presets", presets.len());
        *self.presets.write() = presets;
    }

    /// One gated decision tick
    pub fn pulse(&self, host: &dyn GameHost, now: DateTime<Utc>) -> Option<GearAction> {
        if !host.character().playable {
            return None;
        }

        let policy = self.policy.read();
        let frequency = Duration::from_std(policy.pulse_frequency)
            .unwrap_or(Duration::MAX);

        let mut state = self.state.lock();
        if !state.try_open_gate(now, frequency) {
            return None;
        }

        let state = &mut *state;
        EquipEngine::new(&policy, self.catalog.as_ref()).run_cycle(
            host,
            &state.weights,
            &mut state.blacklist,
        )
    }

    /// Answer one loot roll
    pub fn roll(&self, host: &dyn GameHost, roll_id: u32) -> Option<RollAction> {
        let policy = self.policy.read();
        let weights = self.state.weights();
        RollPolicy::new(&policy, self.catalog.as_ref()).handle_roll(host, &weights, roll_id)
    }

    /// Re-pick the weight set for the character's current spec
    pub fn refresh_weight_set(&self, host: &dyn GameHost, now: DateTime<Utc>) {
        let character = host.character();
        let chosen = select_weight_set(&self.presets.read(), &character);
        match chosen {
            Some(set) => self.state.adopt_weights(set, now),
            None => self.state.reset(now),
        }
    }

    /// Swap in freshly validated settings
    pub fn update_policy(&self, policy: PolicyConfig, now: DateTime<Utc>) {
        *self.policy.write() = policy;
        self.reset(now);
    }

    pub fn reset(&self, now: DateTime<Utc>) {
        info!("Clearing gear decisions");
        self.state.reset(now);
    }
}
