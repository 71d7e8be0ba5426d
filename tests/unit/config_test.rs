//! Tests for configuration validation

use bounded_executor::config::RunConfig;

#[test]
fn test_run_config_validation() {
    let valid = RunConfig::new().with_worker_count(4).with_error_limit(10);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_run_config_invalid_worker_count() {
    let invalid = RunConfig::new().with_worker_count(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_invalid_stack_size() {
    let invalid = RunConfig::new().with_thread_stack_size(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_invalid_thread_prefix() {
    let invalid = RunConfig::new().with_thread_name_prefix("");
    assert!(invalid.validate().is_err());
}

#[test]
fn test_run_config_defaults() {
    let config = RunConfig::default();
    assert!(config.worker_count >= 1);
    assert_eq!(config.error_limit, 1);
    assert_eq!(config.queue_capacity, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_run_config_from_json() {
    let json = r#"{
        "worker_count": 8,
        "error_limit": -3,
        "queue_capacity": 0
    }"#;

    let config = RunConfig::from_json_str(json).unwrap();
    assert_eq!(config.worker_count, 8);
    assert_eq!(config.normalized_error_limit(), 1);
    assert_eq!(config.effective_queue_capacity(), 0);
    assert_eq!(config.thread_name_prefix, RunConfig::default().thread_name_prefix);
}

#[test]
fn test_run_config_from_json_rejects_zero_workers() {
    let err = RunConfig::from_json_str(r#"{ "worker_count": 0 }"#).unwrap_err();
    assert!(err.contains("worker_count"));
}

#[test]
fn test_run_config_from_json_parse_error() {
    let err = RunConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}
