pub mod manager;

pub use manager::{DecisionBlacklist, EngineState, SharedState};
