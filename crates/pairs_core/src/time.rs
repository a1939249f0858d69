//! Elapsed-time formatting.

/// Formats whole seconds as `HH:MM:SS`.
pub fn format_time(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}
