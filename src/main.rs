use log::{info, warn};
use std::error::Error;
use std::time::Duration;

use rez::{build_executor, Policy, PolicyExecutor, RetrySettings};

const SETTINGS: &str = r#"{ "max_retries": 3, "retry_delay_ms": 250 }"#;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();
    info!("Starting the rez retry demo...");

    // Step 1: Load a simple policy from configuration.
    let settings = RetrySettings::from_json(SETTINGS)?;
    let executor = build_executor::<u32, String>(settings.to_policy());

    let mut calls = 0;
    let value = executor.execute(|| {
        calls += 1;
        if calls < 3 {
            Err(format!("simulated outage on call {}", calls))
        } else {
            Ok(calls)
        }
    })?;
    info!("Configured policy succeeded with {} after {} call(s)", value, calls);

    // Step 2: Build a policy in code with a computed backoff and a failure hook.
    let policy = Policy::new().complex_wait_retry_x_times_with_failure_callback(
        4,
        |attempt, _err| Duration::from_millis(50 * 2u64.pow(attempt.min(10) as u32)),
        |attempt, err: &String| warn!("Attempt {} failed: {}", attempt, err),
    );
    let executor = build_executor::<(), String>(policy);

    match executor.execute(|| Err("service unavailable".to_string())) {
        Ok(()) => info!("Unexpected success"),
        Err(e) => info!("Gave up as expected: {}", e),
    }

    Ok(())
}
