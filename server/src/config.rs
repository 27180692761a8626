// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Attempt budget for each metadata store or cache lookup.
    pub retry_max_attempts: u32,
    /// Fixed delay between retry attempts.
    pub retry_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let retry_max_attempts = env::var("LDS_RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);
        let retry_delay_ms = env::var("LDS_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);
        Self {
            retry_max_attempts,
            retry_delay: Duration::from_millis(retry_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_max_attempts: 7,
            retry_delay: Duration::from_secs(1),
        }
    }
}
