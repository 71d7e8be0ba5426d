//! Tests for error types

use bounded_executor::RunError;

#[test]
fn test_errors_limit_exceeded_error() {
    let err = RunError::ErrorsLimitExceeded;
    assert_eq!(format!("{}", err), "errors limit exceeded");
}

#[test]
fn test_invalid_config_error() {
    let err = RunError::InvalidConfig("worker_count must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: worker_count must be greater than 0"
    );
}

#[test]
fn test_internal_error() {
    let err = RunError::Internal("failed to spawn bx-worker-3".to_string());
    assert_eq!(format!("{}", err), "internal error: failed to spawn bx-worker-3");
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&RunError::ErrorsLimitExceeded);
}
