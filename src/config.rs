use std::time::Duration;

use rand::Rng;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for registry fetch operations (30 seconds)
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Lower bound of the randomized retry backoff window (1 second)
pub const RETRY_BACKOFF_MIN: Duration = Duration::from_secs(1);

/// Upper bound of the randomized retry backoff window (5 seconds)
pub const RETRY_BACKOFF_MAX: Duration = Duration::from_secs(5);

// =============================================================================
// Wire constants
// =============================================================================

/// User-Agent header sent with every registry request
pub const USER_AGENT: &str = "version-resolver";

/// Download base used when a dependency declares no registry of its own
pub const CRATES_IO_DL_BASE: &str = "https://crates.io/api/v1/crates";

/// Transport defaults shared by every request a resolver issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout, connect and read included
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry policy for transient network timeouts
///
/// A timed-out request is retried exactly once, after a delay sampled
/// uniformly from the backoff window. A second timeout is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub backoff_min: Duration,
    pub backoff_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff_min: RETRY_BACKOFF_MIN,
            backoff_max: RETRY_BACKOFF_MAX,
        }
    }
}

impl RetryPolicy {
    /// Sample a backoff delay uniformly from the configured window
    pub fn sample_backoff(&self) -> Duration {
        let min = self.backoff_min.as_millis() as u64;
        let max = self.backoff_max.as_millis() as u64;
        if max <= min {
            return self.backoff_min;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}
