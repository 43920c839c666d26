use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Decides whether another attempt should be made after a failure.
pub(crate) type ShouldRetryFn<E> = Arc<dyn Fn(u64, &E) -> bool + Send + Sync>;
/// Side-effect hook run between a failure and the next attempt.
pub(crate) type FailureCallbackFn<E> = Arc<dyn Fn(u64, &E) + Send + Sync>;
/// Computes how long to wait before the next attempt.
pub(crate) type DelayFn<E> = Arc<dyn Fn(u64, &E) -> Duration + Send + Sync>;

/// The hooks driving a single retry loop.
pub(crate) struct RetryStrategy<E> {
    /// Evaluated after each failed attempt, starting at attempt 1.
    pub should_retry: ShouldRetryFn<E>,
    /// Runs once per positive retry decision, before any delay.
    pub on_failure: Option<FailureCallbackFn<E>>,
    /// Pause before the next attempt; `None` retries immediately.
    pub delay: Option<DelayFn<E>>,
}

impl<E> RetryStrategy<E> {
    pub fn new(should_retry: ShouldRetryFn<E>) -> Self {
        Self {
            should_retry,
            on_failure: None,
            delay: None,
        }
    }

    pub fn with_failure_callback(mut self, callback: FailureCallbackFn<E>) -> Self {
        self.on_failure = Some(callback);
        self
    }

    pub fn with_delay(mut self, delay: DelayFn<E>) -> Self {
        self.delay = Some(delay);
        self
    }
}

// Manual impl: a derive would require `E: Clone`.
impl<E> Clone for RetryStrategy<E> {
    fn clone(&self) -> Self {
        Self {
            should_retry: Arc::clone(&self.should_retry),
            on_failure: self.on_failure.clone(),
            delay: self.delay.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryStrategy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryStrategy")
            .field("should_retry", &"<predicate>")
            .field("on_failure", &self.on_failure.as_ref().map(|_| "<callback>"))
            .field("delay", &self.delay.as_ref().map(|_| "<delay>"))
            .finish()
    }
}

/// Predicate for the "stop after N retries" style. Negative budgets never retry.
pub(crate) fn max_retries<E: 'static>(retry_count: i64) -> ShouldRetryFn<E> {
    let limit = u64::try_from(retry_count).unwrap_or(0);
    Arc::new(move |attempt: u64, _: &E| attempt <= limit)
}

pub(crate) fn fixed_delay<E: 'static>(wait: Duration) -> DelayFn<E> {
    Arc::new(move |_: u64, _: &E| wait)
}
