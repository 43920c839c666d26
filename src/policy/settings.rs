use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Policy;

/// Declarative retry configuration, for policies that come from a config
/// file rather than code.
///
/// Missing fields fall back to their defaults, so `{}` describes a policy
/// that never retries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Retries allowed after the initial attempt.
    pub max_retries: i64,
    /// Pause before each retry, in whole milliseconds.
    pub retry_delay_ms: u64,
}

impl RetrySettings {
    pub fn new(max_retries: i64, retry_delay: Duration) -> Self {
        Self::default()
            .with_max_retries(max_retries)
            .with_retry_delay(retry_delay)
    }

    pub fn with_max_retries(mut self, value: i64) -> Self {
        self.max_retries = value;
        self
    }

    /// Stores `value` with millisecond granularity, rounding any fraction
    /// up so that a non-zero delay never turns into "no delay".
    pub fn with_retry_delay(mut self, value: Duration) -> Self {
        let mut millis = value.as_millis();
        if value.subsec_nanos() % 1_000_000 != 0 {
            millis += 1;
        }
        self.retry_delay_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Builds the equivalent policy: a plain retry budget, or a fixed wait
    /// between retries when a delay is set.
    pub fn to_policy<E: 'static>(&self) -> Policy<E> {
        if self.retry_delay_ms == 0 {
            Policy::new().retry_x_times(self.max_retries)
        } else {
            Policy::new().wait_retry_x_times(self.max_retries, self.retry_delay())
        }
    }
}

impl<E: 'static> From<RetrySettings> for Policy<E> {
    fn from(settings: RetrySettings) -> Self {
        settings.to_policy()
    }
}
