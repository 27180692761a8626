// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry for fragile metadata lookups.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::Config;

/// A fixed number of attempts with a fixed delay in between.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&Config> for RetryPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            delay: config.retry_delay,
        }
    }
}

/// Run `op` until it succeeds or the attempt budget is exhausted, sleeping
/// `policy.delay` between attempts. Returns the first success or the final
/// failure.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::debug!(attempt, error = %e, "metadata lookup failed, retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
