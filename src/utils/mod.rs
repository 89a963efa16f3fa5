pub mod string;

pub use string::{format_float_invariant, parse_float_invariant, parse_i64, parse_u32};
