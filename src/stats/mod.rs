pub mod item_stats;
pub mod stat;
pub mod weight_set;

pub use item_stats::ItemStats;
pub use stat::Stat;
pub use weight_set::WeightSet;
