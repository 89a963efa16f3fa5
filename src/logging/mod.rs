pub mod logger;

pub use logger::{init_logger, strip_link_markup};
