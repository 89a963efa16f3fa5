/// String utility functions

/// Parse an unsigned integer, `None` for anything malformed or empty
pub fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

/// Parse a signed integer field, `None` for anything malformed or empty
pub fn parse_i64(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Parse a float written with a `.` decimal separator regardless of locale.
/// Non-finite values are rejected.
pub fn parse_float_invariant(s: &str) -> Option<f32> {
    s.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Format a float the way it is written back to weight files
pub fn format_float_invariant(value: f32) -> String {
    format!("{}", value)
}
