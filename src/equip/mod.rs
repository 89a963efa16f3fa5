pub mod engine;
pub mod gems;
pub mod replacement;
pub mod resolver;

pub use engine::EquipEngine;
pub use gems::gem_fits_in;
pub use replacement::{worst, Replaceable, ReplacementEvaluator};
pub use resolver::SlotResolver;
