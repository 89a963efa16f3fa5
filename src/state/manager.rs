use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashSet;
use std::sync::Arc;

use crate::stats::WeightSet;
use crate::types::ItemGuid;

/// Delay before the first pulse after the state was reset
const RESET_GRACE_SECS: i64 = 1;

/// Item instances already evaluated and rejected this session
#[derive(Debug, Clone, Default)]
pub struct DecisionBlacklist {
    guids: HashSet<ItemGuid>,
}

impl DecisionBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, guid: ItemGuid) -> bool {
        self.guids.contains(&guid)
    }

    pub fn insert(&mut self, guid: ItemGuid) -> bool {
        self.guids.insert(guid)
    }

    pub fn clear(&mut self) {
        self.guids.clear();
    }

    pub fn len(&self) -> usize {
        self.guids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guids.is_empty()
    }
}

/// Everything a decision cycle mutates
#[derive(Debug, Clone)]
pub struct EngineState {
    pub blacklist: DecisionBlacklist,
    pub weights: WeightSet,
    pub next_pulse: DateTime<Utc>,
}

impl EngineState {
    pub fn new(weights: WeightSet) -> Self {
        Self {
            blacklist: DecisionBlacklist::new(),
            weights,
            next_pulse: Utc::now(),
        }
    }

    /// Check the next-allowed gate and advance it when open
    pub fn try_open_gate(&mut self, now: DateTime<Utc>, frequency: Duration) -> bool {
        if now < self.next_pulse {
            return false;
        }
        self.next_pulse = now
            .checked_add_signed(frequency)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        true
    }

    /// Forget all rejections and pulse again shortly
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.blacklist.clear();
        self.next_pulse = now + Duration::seconds(RESET_GRACE_SECS);
    }

    /// Replace the current weight set wholesale
    pub fn adopt_weights(&mut self, weights: WeightSet, now: DateTime<Utc>) {
        tracing::info!(
            "Weight set changed: {} -> {}",
            self.weights.name(),
            weights.name()
        );
        self.weights = weights;
        self.reset(now);
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(WeightSet::default())
    }
}

/// Cloneable handle guarding the engine state as one unit
#[derive(Clone)]
pub struct SharedState {
    state: Arc<Mutex<EngineState>>,
}

impl SharedState {
    pub fn new(state: EngineState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock()
    }

    pub fn weights(&self) -> WeightSet {
        self.state.lock().weights.clone()
    }

    pub fn adopt_weights(&self, weights: WeightSet, now: DateTime<Utc>) {
        self.state.lock().adopt_weights(weights, now);
    }

    pub fn reset(&self, now: DateTime<Utc>) {
        self.state.lock().reset(now);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(EngineState::default())
    }
}
