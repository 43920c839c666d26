use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub(crate) mod retry;
pub mod settings;

#[cfg(test)]
mod tests;

use retry::{fixed_delay, max_retries, RetryStrategy};
pub use settings::RetrySettings;

/// The error type a [`Policy`] is built for when none is named.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Describes how a failing operation should be retried.
///
/// A policy holds at most one retry strategy. Every configuration method
/// consumes the policy and returns it with the strategy replaced, so calls do
/// not stack: the last one wins. Hooks are reference counted, which makes
/// cloning cheap; clone a base policy to configure it along several branches.
///
/// ```
/// use std::time::Duration;
/// use rez::{build_executor, Policy, PolicyExecutor};
///
/// let policy = Policy::new().wait_retry_x_times(3, Duration::from_millis(5));
/// let executor = build_executor::<u32, String>(policy);
///
/// let mut calls = 0;
/// let result = executor.execute(|| {
///     calls += 1;
///     if calls < 3 { Err("not yet".to_string()) } else { Ok(calls) }
/// });
/// assert_eq!(result, Ok(3));
/// ```
pub struct Policy<E = BoxError> {
    retry: Option<RetryStrategy<E>>,
}

impl<E> Policy<E> {
    /// An empty policy: failures are returned without retrying.
    pub fn new() -> Self {
        Self { retry: None }
    }

    /// Whether a retry strategy has been configured.
    pub fn has_retry(&self) -> bool {
        self.retry.is_some()
    }

    pub(crate) fn retry_strategy(&self) -> Option<&RetryStrategy<E>> {
        self.retry.as_ref()
    }

    fn with_strategy(mut self, strategy: RetryStrategy<E>) -> Self {
        self.retry = Some(strategy);
        self
    }
}

impl<E: 'static> Policy<E> {
    /// Retries up to `retry_count` times. A negative count never retries.
    pub fn retry_x_times(self, retry_count: i64) -> Self {
        self.with_strategy(RetryStrategy::new(max_retries(retry_count)))
    }

    /// Retries up to `retry_count` times, running `between_failures` before
    /// each retry.
    pub fn retry_x_times_with_failure_callback<C>(
        self,
        retry_count: i64,
        between_failures: C,
    ) -> Self
    where
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(max_retries(retry_count))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }

    /// Retries for as long as `should_retry` returns true.
    pub fn retry_on_callback<P>(self, should_retry: P) -> Self
    where
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
    {
        self.with_strategy(RetryStrategy::new(Arc::new(should_retry)))
    }

    /// Retries for as long as `should_retry` returns true, running
    /// `between_failures` before each retry.
    pub fn retry_on_callback_with_failure_callback<P, C>(
        self,
        should_retry: P,
        between_failures: C,
    ) -> Self
    where
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(Arc::new(should_retry))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }

    /// Retries up to `retry_count` times, sleeping `wait` before each retry.
    pub fn wait_retry_x_times(self, retry_count: i64, wait: Duration) -> Self {
        self.with_strategy(
            RetryStrategy::new(max_retries(retry_count)).with_delay(fixed_delay(wait)),
        )
    }

    /// Retries up to `retry_count` times, sleeping `wait` before each retry
    /// and running `between_failures` ahead of the sleep.
    pub fn wait_retry_x_times_with_failure_callback<C>(
        self,
        retry_count: i64,
        wait: Duration,
        between_failures: C,
    ) -> Self
    where
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(max_retries(retry_count))
                .with_delay(fixed_delay(wait))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }

    /// Retries while `should_retry` returns true, sleeping `wait` before each
    /// retry.
    pub fn wait_retry_on_callback<P>(self, wait: Duration, should_retry: P) -> Self
    where
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(Arc::new(should_retry)).with_delay(fixed_delay(wait)),
        )
    }

    /// Retries while `should_retry` returns true, sleeping `wait` before each
    /// retry and running `between_failures` ahead of the sleep.
    pub fn wait_retry_on_callback_with_failure_callback<P, C>(
        self,
        wait: Duration,
        should_retry: P,
        between_failures: C,
    ) -> Self
    where
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(Arc::new(should_retry))
                .with_delay(fixed_delay(wait))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }

    /// Retries up to `retry_count` times, sleeping for whatever `wait_for`
    /// computes from the attempt number and the last error.
    pub fn complex_wait_retry_x_times<D>(self, retry_count: i64, wait_for: D) -> Self
    where
        D: Fn(u64, &E) -> Duration + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(max_retries(retry_count)).with_delay(Arc::new(wait_for)),
        )
    }

    /// Like [`Policy::complex_wait_retry_x_times`], running `between_failures`
    /// before each computed wait.
    pub fn complex_wait_retry_x_times_with_failure_callback<D, C>(
        self,
        retry_count: i64,
        wait_for: D,
        between_failures: C,
    ) -> Self
    where
        D: Fn(u64, &E) -> Duration + Send + Sync + 'static,
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(max_retries(retry_count))
                .with_delay(Arc::new(wait_for))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }

    /// Retries while `should_retry` returns true, sleeping for whatever
    /// `wait_for` computes.
    pub fn complex_wait_retry_on_callback<D, P>(self, wait_for: D, should_retry: P) -> Self
    where
        D: Fn(u64, &E) -> Duration + Send + Sync + 'static,
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(Arc::new(should_retry)).with_delay(Arc::new(wait_for)),
        )
    }

    /// Retries while `should_retry` returns true, sleeping for whatever
    /// `wait_for` computes and running `between_failures` ahead of the sleep.
    pub fn complex_wait_retry_on_callback_with_failure_callback<D, P, C>(
        self,
        wait_for: D,
        should_retry: P,
        between_failures: C,
    ) -> Self
    where
        D: Fn(u64, &E) -> Duration + Send + Sync + 'static,
        P: Fn(u64, &E) -> bool + Send + Sync + 'static,
        C: Fn(u64, &E) + Send + Sync + 'static,
    {
        self.with_strategy(
            RetryStrategy::new(Arc::new(should_retry))
                .with_delay(Arc::new(wait_for))
                .with_failure_callback(Arc::new(between_failures)),
        )
    }
}

impl<E> Default for Policy<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Policy<E> {
    fn clone(&self) -> Self {
        Self {
            retry: self.retry.clone(),
        }
    }
}

impl<E> fmt::Debug for Policy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy").field("retry", &self.retry).finish()
    }
}
