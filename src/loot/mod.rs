pub mod item_link;
pub mod roll;

pub use item_link::ItemLink;
pub use roll::{choose_roll, RollPolicy};
