pub mod scorer;

pub use scorer::ItemScorer;
