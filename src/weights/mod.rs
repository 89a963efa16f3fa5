pub mod feed;
pub mod selector;
pub mod source;
pub mod xml;

pub use feed::{parse_feed, parse_weight_sets, SpecWeightRecord};
pub use selector::{select_weight_set, spec_name};
pub use source::{FeedError, FeedSource};
pub use xml::{load_weight_set, parse_weight_set, save_weight_set, WeightSetError};
