//! Host Configuration

use std::time::Duration;

use crate::TICK_PERIOD_MS;

/// Configuration for hosted sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Wall-clock time between clock ticks.
    pub tick_period: Duration,
    /// Capacity of each session's command inbox.
    pub command_buffer: usize,
    /// Capacity of each session's notice broadcast.
    pub notice_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
            command_buffer: 64,
            notice_buffer: 32,
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables.
    ///
    /// Reads `RIOT_TICK_MS`, `RIOT_COMMAND_BUFFER` and `RIOT_NOTICE_BUFFER`.
    /// Missing, unparsable or zero values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tick_period: env_positive("RIOT_TICK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_period),
            command_buffer: env_positive("RIOT_COMMAND_BUFFER")
                .map(|v| v as usize)
                .unwrap_or(defaults.command_buffer),
            notice_buffer: env_positive("RIOT_NOTICE_BUFFER")
                .map(|v| v as usize)
                .unwrap_or(defaults.notice_buffer),
        }
    }
}

fn env_positive(key: &str) -> Option<u64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}
