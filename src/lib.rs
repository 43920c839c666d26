//! # rez
//!
//! A small resilience-policy executor for Rust. Wrap any fallible operation
//! in a declaratively built retry policy and run it through an executor.
//!
//! ## Features
//!
//! - Fluent, copy-on-configure policy builder
//! - Retry a fixed number of times or while a predicate says so
//! - No delay, a fixed delay, or a delay computed per attempt
//! - Optional callback between failures for logging or metrics
//! - Policies loadable from configuration through serde
//! - Errors returned verbatim: the executor adds no error kinds of its own
//!
//! ## Usage
//!
//! Add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rez = "0.1"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rez::{build_executor, Policy, PolicyExecutor};
//! use std::time::Duration;
//!
//! #[derive(Debug, PartialEq)]
//! enum FetchError {
//!     Unavailable,
//!     NotFound,
//! }
//!
//! // Retry only transient errors, at most five times, backing off linearly.
//! let policy = Policy::new().complex_wait_retry_on_callback(
//!     |attempt, _err| Duration::from_millis(attempt * 2),
//!     |attempt, err: &FetchError| attempt <= 5 && *err == FetchError::Unavailable,
//! );
//! let executor = build_executor::<&str, FetchError>(policy);
//!
//! let mut calls = 0;
//! let result = executor.execute(|| {
//!     calls += 1;
//!     match calls {
//!         1 => Err(FetchError::Unavailable),
//!         _ => Err(FetchError::NotFound),
//!     }
//! });
//!
//! // The permanent error stops the loop after a single retry.
//! assert_eq!(result, Err(FetchError::NotFound));
//! assert_eq!(calls, 2);
//! ```
//!
//! Note that a predicate which never returns false, combined with an
//! operation that never succeeds, retries forever. Bound your predicates.
//!
//! ## License
//!
//! Licensed under the MIT license. See the [LICENSE](LICENSE) file for details.

pub mod executor;
pub mod policy;

pub use executor::{build_executor, Executor, PolicyExecutor};
pub use policy::{BoxError, Policy, RetrySettings};
