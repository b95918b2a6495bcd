use std::time::Duration;

/// Event-loop poll interval in milliseconds. The store's timer fires whole
/// seconds on its own; polling faster only keeps the UI responsive.
pub const DEFAULT_POLL_MS: u64 = 250;

/// Get the event poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}
