//! Configuration Module
//!
//! Handles loading GC tuning parameters from environment variables.

use std::env;
use std::time::Duration;

use crate::gc::PartialGcConfig;

/// Background GC configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Background GC period in milliseconds
    pub gc_period_ms: u64,
    /// Cap on live entries delivered to one partial sweep pass
    pub max_iterated_count: usize,
    /// Expired-ratio floor below which the partial GC stops re-sampling
    pub min_expired_percent: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GC_PERIOD_MS` - GC period in milliseconds (default: 1000)
    /// - `GC_MAX_ITERATED_COUNT` - Partial sweep sample cap (default: 20)
    /// - `GC_MIN_EXPIRED_PERCENT` - Partial sweep ratio floor (default: 0.25)
    pub fn from_env() -> Self {
        Self {
            gc_period_ms: env::var("GC_PERIOD_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_iterated_count: env::var("GC_MAX_ITERATED_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            min_expired_percent: env::var("GC_MIN_EXPIRED_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.25),
        }
    }

    /// Returns the GC period as a Duration.
    pub fn gc_period(&self) -> Duration {
        Duration::from_millis(self.gc_period_ms)
    }

    /// Returns the partial-GC tuning knobs carried by this config.
    pub fn partial_gc(&self) -> PartialGcConfig {
        PartialGcConfig {
            max_iterated_count: self.max_iterated_count,
            min_expired_percent: self.min_expired_percent,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gc_period_ms: 1000,
            max_iterated_count: 20,
            min_expired_percent: 0.25,
        }
    }
}
