//! Tests for builder modules

use bounded_executor::builders::ExecutorBuilder;
use bounded_executor::config::RunConfig;
use bounded_executor::{RunError, Task};

#[test]
fn test_executor_builder_defaults() {
    let builder = ExecutorBuilder::new("ingest");
    assert_eq!(builder.name(), "ingest");
    assert_eq!(builder.config(), &RunConfig::default());
}

#[test]
fn test_executor_builder_settings() {
    let executor = ExecutorBuilder::new("ingest")
        .worker_count(3)
        .error_limit(5)
        .queue_capacity(12)
        .thread_stack_size(512 * 1024)
        .build()
        .unwrap();

    assert_eq!(executor.name(), "ingest");
    assert_eq!(executor.config().worker_count, 3);
    assert_eq!(executor.config().error_limit, 5);
    assert_eq!(executor.config().queue_capacity, Some(12));
    assert_eq!(executor.config().thread_stack_size, 512 * 1024);
    assert_eq!(executor.config().thread_name_prefix, "ingest");
}

#[test]
fn test_executor_builder_keeps_explicit_prefix() {
    let config = RunConfig::new().with_worker_count(1).with_thread_name_prefix("etl");
    let executor = ExecutorBuilder::from_config("nightly", config).build().unwrap();
    assert_eq!(executor.config().thread_name_prefix, "etl");
}

#[test]
fn test_executor_builder_keeps_prefix_equal_to_default() {
    let executor = ExecutorBuilder::new("nightly")
        .worker_count(1)
        .thread_name_prefix("bx-worker")
        .build()
        .unwrap();
    assert_eq!(executor.config().thread_name_prefix, "bx-worker");

    let config = RunConfig::new().with_worker_count(1);
    let executor = ExecutorBuilder::from_config("nightly", config).build().unwrap();
    assert_eq!(executor.config().thread_name_prefix, "bx-worker");
}

#[test]
fn test_executor_builder_rejects_zero_workers() {
    let err = ExecutorBuilder::new("broken").worker_count(0).build().unwrap_err();
    assert!(matches!(err, RunError::InvalidConfig(_)));
}

#[test]
fn test_built_executor_runs_tasks() {
    let executor = ExecutorBuilder::new("unit").worker_count(2).error_limit(2).build().unwrap();
    let tasks = vec![
        Task::new(|| Ok(())),
        Task::new(|| anyhow::bail!("first failure")),
        Task::new(|| Ok(())),
    ];
    assert_eq!(executor.execute(tasks), Ok(()));
}
