use log::{debug, trace, warn};
use std::marker::PhantomData;
use std::thread;

use crate::policy::{BoxError, Policy};


/// Runs operations under a retry policy.
pub trait PolicyExecutor<T, E> {
    /// Runs `operation`, retrying failures as the policy allows, and returns
    /// the first success or the last failure.
    ///
    /// The operation is always invoked at least once. A first-attempt success
    /// is returned without consulting the policy; a failure with no retry
    /// strategy is returned as is.
    ///
    /// Otherwise the strategy is asked, with attempt numbers counting up from
    /// 1, whether to try again. On yes, the failure callback runs, then the
    /// thread sleeps for the configured delay, then the operation is invoked
    /// again. On no, the most recent error is returned unchanged.
    ///
    /// # Unbounded retries
    ///
    /// There is no built-in attempt limit. A predicate that never returns
    /// false, paired with an operation that never succeeds, keeps this call
    /// looping forever. Delays block the calling thread and cannot be
    /// cancelled.
    ///
    /// # Panics
    ///
    /// Panics raised by the operation or by any policy hook are not caught;
    /// they unwind out of `execute` and end the retry loop.
    fn execute<F>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>;
}

/// Builds an executor that owns its own copy of `policy`.
pub fn build_executor<T, E>(policy: Policy<E>) -> Executor<T, E> {
    Executor::new(policy)
}

/// Executes operations returning `Result<T, E>` under a [`Policy`].
///
/// The executor keeps no state between calls, so one instance can be shared
/// between threads and reused freely.
pub struct Executor<T, E = BoxError> {
    policy: Policy<E>,
    _result: PhantomData<fn() -> T>,
}

impl<T, E> Executor<T, E> {
    pub fn new(policy: Policy<E>) -> Self {
        Self {
            policy,
            _result: PhantomData,
        }
    }

    pub fn policy(&self) -> &Policy<E> {
        &self.policy
    }
}

impl<T, E> PolicyExecutor<T, E> for Executor<T, E> {
    fn execute<F>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut err = match operation() {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let strategy = match self.policy.retry_strategy() {
            Some(strategy) => strategy,
            None => {
                debug!("Operation failed and no retry strategy is configured");
                return Err(err);
            }
        };

        let mut attempt: u64 = 1;
        while (strategy.should_retry)(attempt, &err) {
            if let Some(on_failure) = &strategy.on_failure {
                on_failure(attempt, &err);
            }

            if let Some(delay) = &strategy.delay {
                let wait = delay(attempt, &err);
                debug!("Retry {} scheduled after {:?}", attempt, wait);
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
            } else {
                debug!("Retry {} scheduled immediately", attempt);
            }

            match operation() {
                Ok(value) => {
                    trace!("Operation succeeded on retry {}", attempt);
                    return Ok(value);
                }
                Err(e) => {
                    debug!("Retry {} failed", attempt);
                    err = e;
                }
            }
            attempt = attempt.saturating_add(1);
        }

        warn!("Retry strategy declined attempt {}, giving up", attempt);
        Err(err)
    }
}

impl<T, E> Clone for Executor<T, E> {
    fn clone(&self) -> Self {
        Self::new(self.policy.clone())
    }
}
