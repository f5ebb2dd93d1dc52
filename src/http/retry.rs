//! Retry policy for transport failures.
//!
//! The policy plugs into `reqwest-retry`'s [`RetryTransientMiddleware`] and
//! replaces its default backoff curve with a jittered one:
//!
//! ```text
//! delay = random[0, 1) * 2^attempt * base_delay
//! ```
//!
//! where `attempt` is the zero-based index of the attempt that just failed.
//! A retry happens only while `attempt + 1 <= max_attempts` and the computed
//! delay does not exceed `max_delay`. Only the computed delay is capped, the
//! exponent itself is not.
//!
//! [`RetryTransientMiddleware`]: reqwest_retry::RetryTransientMiddleware

use reqwest_middleware::Error;
use reqwest_retry::{RetryDecision, RetryPolicy, Retryable, RetryableStrategy};
use std::time::{Duration, SystemTime};

/// Retry parameters.
///
/// `max_attempts` counts retries, so a value of `0` disables retrying and a
/// request is attempted at most `max_attempts + 1` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOptions {
    /// Scale of the backoff delay.
    pub base_delay: Duration,
    /// Largest delay that is still worth waiting for.
    pub max_delay: Duration,
    /// Maximum number of retries after the first attempt.
    pub max_attempts: u32,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(3),
            max_attempts: 3,
        }
    }
}

impl RetryOptions {
    /// Options that never retry.
    pub fn none() -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_attempts: 0,
        }
    }
}

/// Exponential backoff with full jitter, capped on the computed delay.
#[derive(Debug, Clone, Copy)]
pub struct JitteredBackoff {
    options: RetryOptions,
}

impl JitteredBackoff {
    pub fn new(options: RetryOptions) -> Self {
        Self { options }
    }

    /// Delay to wait before retrying after attempt `attempt` failed, given a
    /// jitter factor in `[0, 1)`. `None` means the failure is final.
    pub fn delay_for(&self, attempt: u32, jitter: f64) -> Option<Duration> {
        if attempt.saturating_add(1) > self.options.max_attempts {
            return None;
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let seconds = jitter * 2f64.powi(exponent) * self.options.base_delay.as_secs_f64();
        // An overflowing exponent yields an infinite delay, which is never acceptable.
        let delay = Duration::try_from_secs_f64(seconds).ok()?;

        (delay <= self.options.max_delay).then_some(delay)
    }
}

impl RetryPolicy for JitteredBackoff {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        match self.delay_for(n_past_retries, rand::random::<f64>()) {
            Some(delay) => RetryDecision::Retry {
                execute_after: SystemTime::now() + delay,
            },
            None => RetryDecision::DoNotRetry,
        }
    }
}

/// Retries transport failures only.
///
/// Any response that made it back from the server, whatever its status, is
/// final. Status handling belongs to the image client.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportFailuresOnly;

impl RetryableStrategy for TransportFailuresOnly {
    fn handle(&self, res: &Result<reqwest::Response, Error>) -> Option<Retryable> {
        match res {
            Ok(_) => None,
            Err(_) => Some(Retryable::Transient),
        }
    }
}
