// Small formatting helpers shared by components.

/// Scale as a whole percentage, rounded half up.
pub fn zoom_percent(scale: f64) -> i64 {
    (scale * 100.0).round() as i64
}

/// "N taps away" style pluralisation.
pub fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}
