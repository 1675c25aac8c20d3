use std::time::Duration;

/// Host loop interval in milliseconds; the timer driver is polled this often
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}
