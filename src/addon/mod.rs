pub mod handlers;
pub mod manager;

pub use handlers::AddonEventHandlers;
pub use manager::GearManager;
