pub mod loader;
pub mod policy;
pub mod types;

pub use loader::ConfigLoader;
pub use policy::{NeedList, PolicyConfig};
pub use types::Config;
