#[cfg(test)]
mod tests {
    use super::super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct TestError;

    fn should_retry(policy: &Policy<TestError>, attempt: u64) -> bool {
        let strategy = policy.retry_strategy().expect("strategy should be set");
        (strategy.should_retry)(attempt, &TestError)
    }

    fn delay(policy: &Policy<TestError>, attempt: u64) -> Option<Duration> {
        let strategy = policy.retry_strategy().expect("strategy should be set");
        strategy.delay.as_ref().map(|delay| delay(attempt, &TestError))
    }

    fn has_failure_callback(policy: &Policy<TestError>) -> bool {
        policy
            .retry_strategy()
            .map(|strategy| strategy.on_failure.is_some())
            .unwrap_or(false)
    }

    #[test]
    fn test_new_policy_has_no_retry() {
        let policy = Policy::<TestError>::new();
        assert!(!policy.has_retry());
        assert!(!Policy::<TestError>::default().has_retry());
    }

    #[test]
    fn test_retry_x_times_counts_inclusively() {
        let policy = Policy::<TestError>::new().retry_x_times(3);
        assert!(should_retry(&policy, 1));
        assert!(should_retry(&policy, 3));
        assert!(!should_retry(&policy, 4));
        assert_eq!(delay(&policy, 1), None);
        assert!(!has_failure_callback(&policy));
    }

    #[test]
    fn test_zero_and_negative_counts_never_retry() {
        let zero = Policy::<TestError>::new().retry_x_times(0);
        let negative = Policy::<TestError>::new().retry_x_times(-5);
        assert!(!should_retry(&zero, 1));
        assert!(!should_retry(&negative, 1));
    }

    #[test]
    fn test_fixed_wait_is_used_for_every_attempt() {
        let wait = Duration::from_millis(120);
        let policy = Policy::<TestError>::new().wait_retry_x_times(2, wait);
        assert_eq!(delay(&policy, 1), Some(wait));
        assert_eq!(delay(&policy, 2), Some(wait));
        assert!(should_retry(&policy, 2));
        assert!(!should_retry(&policy, 3));
    }

    #[test]
    fn test_complex_wait_receives_attempt_number() {
        let policy = Policy::<TestError>::new()
            .complex_wait_retry_on_callback(|attempt, _| Duration::from_secs(attempt), |_, _| true);
        assert_eq!(delay(&policy, 1), Some(Duration::from_secs(1)));
        assert_eq!(delay(&policy, 7), Some(Duration::from_secs(7)));
        assert!(should_retry(&policy, 1_000));
    }

    #[test]
    fn test_failure_callback_variants_set_callback() {
        let wait = Duration::from_millis(1);
        let policies = vec![
            Policy::<TestError>::new().retry_x_times_with_failure_callback(1, |_, _| {}),
            Policy::new().retry_on_callback_with_failure_callback(|_, _| true, |_, _| {}),
            Policy::new().wait_retry_x_times_with_failure_callback(1, wait, |_, _| {}),
            Policy::new().wait_retry_on_callback_with_failure_callback(
                wait,
                |_, _| true,
                |_, _| {},
            ),
            Policy::new().complex_wait_retry_x_times_with_failure_callback(
                1,
                move |_, _| wait,
                |_, _| {},
            ),
            Policy::new().complex_wait_retry_on_callback_with_failure_callback(
                move |_, _| wait,
                |_, _| true,
                |_, _| {},
            ),
        ];
        for policy in &policies {
            assert!(has_failure_callback(policy));
        }
    }

    #[test]
    fn test_plain_variants_leave_callback_unset() {
        let wait = Duration::from_millis(1);
        let policies = vec![
            Policy::<TestError>::new().retry_x_times(1),
            Policy::new().retry_on_callback(|_, _| true),
            Policy::new().wait_retry_x_times(1, wait),
            Policy::new().wait_retry_on_callback(wait, |_, _| true),
            Policy::new().complex_wait_retry_x_times(1, move |_, _| wait),
            Policy::new().complex_wait_retry_on_callback(move |_, _| wait, |_, _| true),
        ];
        for policy in &policies {
            assert!(policy.has_retry());
            assert!(!has_failure_callback(policy));
        }
    }

    #[test]
    fn test_reconfiguring_replaces_strategy() {
        let policy = Policy::<TestError>::new()
            .wait_retry_x_times_with_failure_callback(10, Duration::from_secs(1), |_, _| {})
            .retry_x_times(1);

        assert!(should_retry(&policy, 1));
        assert!(!should_retry(&policy, 2));
        assert_eq!(delay(&policy, 1), None);
        assert!(!has_failure_callback(&policy));
    }

    #[test]
    fn test_cloned_policies_configure_independently() {
        let base = Policy::<TestError>::new().retry_x_times(5);
        let never = base.clone().retry_on_callback(|_, _| false);
        let slow = base.clone().wait_retry_x_times(1, Duration::from_secs(3));

        assert!(should_retry(&base, 5));
        assert_eq!(delay(&base, 1), None);
        assert!(!should_retry(&never, 1));
        assert_eq!(delay(&slow, 1), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_clone_shares_hooks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let policy = Policy::<TestError>::new().retry_on_callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let copy = policy.clone();

        should_retry(&policy, 1);
        should_retry(&copy, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_does_not_require_debug_hooks() {
        let policy = Policy::<TestError>::new().retry_x_times_with_failure_callback(2, |_, _| {});
        let rendered = format!("{:?}", policy);
        assert!(rendered.contains("RetryStrategy"));
        assert!(rendered.contains("<callback>"));
        assert_eq!(format!("{:?}", Policy::<TestError>::new()), "Policy { retry: None }");
    }

    // RetrySettings
    #[test]
    fn test_settings_default() {
        let settings = RetrySettings::default();
        assert_eq!(settings.max_retries, 0);
        assert_eq!(settings.retry_delay().as_secs(), 0);
    }

    #[test]
    fn test_settings_builder() {
        let settings = RetrySettings::default()
            .with_max_retries(3)
            .with_retry_delay(Duration::from_secs(2));

        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.retry_delay_ms, 2_000);
        assert_eq!(settings, RetrySettings::new(3, Duration::from_secs(2)));
    }

    #[test]
    fn test_settings_to_policy_without_delay() {
        let policy: Policy<TestError> = RetrySettings::new(2, Duration::ZERO).into();
        assert!(should_retry(&policy, 2));
        assert!(!should_retry(&policy, 3));
        assert_eq!(delay(&policy, 1), None);
    }

    #[test]
    fn test_settings_to_policy_with_delay() {
        let policy = RetrySettings::new(1, Duration::from_millis(40)).to_policy::<TestError>();
        assert!(should_retry(&policy, 1));
        assert!(!should_retry(&policy, 2));
        assert_eq!(delay(&policy, 1), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_settings_from_json() {
        let settings = RetrySettings::from_json(r#"{ "max_retries": 4, "retry_delay_ms": 15 }"#)
            .expect("valid settings");
        assert_eq!(settings.max_retries, 4);
        assert_eq!(settings.retry_delay(), Duration::from_millis(15));

        let partial = RetrySettings::from_json(r#"{ "max_retries": -1 }"#).expect("valid settings");
        assert_eq!(partial, RetrySettings::default().with_max_retries(-1));

        assert!(RetrySettings::from_json(r#"{ "max_retries": "many" }"#).is_err());
    }

    #[test]
    fn test_settings_keep_sub_millisecond_delay() {
        let settings = RetrySettings::new(3, Duration::from_micros(900));
        assert_eq!(settings.retry_delay_ms, 1);

        let policy = settings.to_policy::<TestError>();
        assert_eq!(delay(&policy, 1), Some(Duration::from_millis(1)));

        let rounded = RetrySettings::default().with_retry_delay(Duration::from_micros(1_500));
        assert_eq!(rounded.retry_delay_ms, 2);
        assert_eq!(RetrySettings::default().with_retry_delay(Duration::ZERO).retry_delay_ms, 0);
    }
}
