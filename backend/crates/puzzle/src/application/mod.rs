//! Application Layer - Use Cases
//!
//! Servers issue and verify challenges, clients solve them.

pub mod baseline_client;
pub mod baseline_server;
pub mod config;
pub mod optimized_client;
pub mod optimized_server;
pub mod protocol;
mod workers;

use std::time::{Duration, Instant};

/// Microseconds since `started`, saturating at `u64::MAX`
pub(crate) fn elapsed_us(started: Instant) -> u64 {
    saturating_micros(started.elapsed())
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micros_saturate() {
        assert_eq!(saturating_micros(Duration::from_micros(1500)), 1500);
        assert_eq!(saturating_micros(Duration::from_secs(u64::MAX)), u64::MAX);
        assert_eq!(saturating_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_elapsed_us_is_monotonic() {
        let started = Instant::now();
        let first = elapsed_us(started);
        assert!(elapsed_us(started) >= first);
    }
}
