use rand::Rng;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::constants::MICROSECONDS_PER_SECOND;
use crate::error::DelayRangeError;

/// Inclusive millisecond range for random delays, parsed from "MIN:MAX"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub fn sample(&self) -> Duration {
        let delay = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(delay)
    }

    /// Sleep for a random duration within the range
    pub async fn sleep(&self) {
        let delay = self.sample();
        tokio::time::sleep(delay).await;
    }
}

impl FromStr for DelayRange {
    type Err = DelayRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DelayRangeError(s.to_string());
        let (min, max) = s.split_once(':').ok_or_else(invalid)?;
        let min_ms = min.trim().parse::<u64>().map_err(|_| invalid())?;
        let max_ms = max.trim().parse::<u64>().map_err(|_| invalid())?;
        if max_ms < min_ms {
            return Err(invalid());
        }
        Ok(DelayRange { min_ms, max_ms })
    }
}

/// Spaces requests so that at most `n` start per second, across all workers
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn per_second(rate_limit: u64) -> Option<Self> {
        if rate_limit == 0 {
            return None;
        }
        Some(RateLimiter {
            min_interval: Duration::from_micros(MICROSECONDS_PER_SECOND / rate_limit),
            last_request: Mutex::new(None),
        })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may start. The lock is held while sleeping
    /// so waiting workers are released one interval apart.
    pub async fn wait(&self) {
        let mut last_req_guard = self.last_request.lock().await;
        if let Some(last) = *last_req_guard {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last_req_guard = Some(Instant::now());
    }
}
