//! Retry policy applied when GitHub signals rate limiting.
//!
//! GitHub raises two kinds of rate-limit signal: the primary quota (a hard
//! request budget per window) and the secondary limit (abuse-detection
//! heuristics). The dispatch gateway consults a [`ThrottlePolicy`] after each
//! rate-limited response; the retry decision is a pure function of the signal
//! and the number of retries already spent, so the policy can be tested
//! without any HTTP traffic.

use std::time::Duration;

use super::rate_limit::RateLimitInfo;

/// Which rate-limit signal the provider raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitSignal {
    /// The hard request quota for the current window is spent.
    Primary,
    /// Abuse-detection heuristics asked the client to back off.
    Secondary,
}

/// Outcome of consulting the policy after a rate-limited response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait and reissue the request.
    Retry,
    /// Stop retrying and surface the rate-limit error.
    GiveUp,
}

const DEFAULT_MAX_RETRIES: u32 = 4;
const DEFAULT_SECONDARY_FALLBACK_WAIT: Duration = Duration::from_secs(5);

/// Enumerated retry policy for rate-limited dispatch calls.
///
/// The defaults permit a retry while fewer than four retries have been spent,
/// i.e. up to four retries after the first attempt and five attempts in
/// total. Secondary rate limits fall back to a five-second wait when GitHub
/// does not suggest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    max_retries: u32,
    secondary_fallback_wait: Duration,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            secondary_fallback_wait: DEFAULT_SECONDARY_FALLBACK_WAIT,
        }
    }
}

impl ThrottlePolicy {
    /// Creates a policy with an explicit retry cap and secondary fallback wait.
    #[must_use]
    pub const fn new(max_retries: u32, secondary_fallback_wait: Duration) -> Self {
        Self {
            max_retries,
            secondary_fallback_wait,
        }
    }

    /// Maximum retries permitted after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Decides whether to retry after a rate-limited response.
    ///
    /// `retry_count` is the number of retries already spent, so the first
    /// rate-limited response consults the policy with `retry_count == 0`.
    /// Both signals share the same cap.
    #[must_use]
    pub const fn decide(&self, _signal: RateLimitSignal, retry_count: u32) -> RetryDecision {
        if retry_count < self.max_retries {
            RetryDecision::Retry
        } else {
            RetryDecision::GiveUp
        }
    }

    /// Selects how long to wait before the next attempt.
    ///
    /// A provider-suggested wait (from a `Retry-After` header) always wins.
    /// Without one, a primary signal waits until the quota window resets and
    /// a secondary signal falls back to the configured wait.
    #[must_use]
    pub fn wait_before_retry(
        &self,
        signal: RateLimitSignal,
        suggested: Option<Duration>,
        rate_limit: Option<&RateLimitInfo>,
    ) -> Duration {
        if let Some(wait) = suggested {
            return wait;
        }

        match signal {
            RateLimitSignal::Primary => rate_limit
                .map(|info| Duration::from_secs(info.seconds_until_reset()))
                .unwrap_or(Duration::ZERO),
            RateLimitSignal::Secondary => self.secondary_fallback_wait,
        }
    }
}
