pub mod manager;
pub mod slots;

pub use manager::EquippedSet;
pub use slots::{EquipSlot, EquipType};
