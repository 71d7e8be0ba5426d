//! Tests for the tokio runtime adapter

use bounded_executor::runtime::run_async;
use bounded_executor::{Executor, RunConfig, RunError, Task};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn counted(calls: &Arc<AtomicUsize>, fail: bool) -> Task {
    let calls = Arc::clone(calls);
    Task::new(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            anyhow::bail!("async-side failure");
        }
        Ok(())
    })
}

#[tokio::test]
async fn test_run_async_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tasks = (0..12).map(|_| counted(&calls, false)).collect();

    assert_eq!(run_async(tasks, 3, 1).await, Ok(()));
    assert_eq!(calls.load(Ordering::SeqCst), 12);
}

#[tokio::test]
async fn test_run_async_limit_exceeded() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tasks = (0..12).map(|_| counted(&calls, true)).collect();

    assert_eq!(run_async(tasks, 1, 2).await, Err(RunError::ErrorsLimitExceeded));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn test_execute_async_does_not_block_runtime() {
    let executor = Executor::new(RunConfig::new().with_worker_count(2)).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let tasks = (0..4)
        .map(|_| {
            let calls = Arc::clone(&calls);
            Task::new(move || {
                std::thread::sleep(Duration::from_millis(50));
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
        .collect();

    // Completion order: whichever side finishes first takes slot 0.
    let order = Arc::new(AtomicUsize::new(0));
    let ticker_order = Arc::clone(&order);
    let ticker = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        ticker_order.fetch_add(1, Ordering::SeqCst)
    });
    let run = async {
        let result = executor.execute_async(tasks).await;
        (result, order.fetch_add(1, Ordering::SeqCst))
    };
    let ((result, run_slot), ticker_slot) = tokio::join!(run, ticker);

    assert_eq!(result, Ok(()));
    assert_eq!(ticker_slot.unwrap(), 0);
    assert_eq!(run_slot, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_run_async_rejects_zero_workers() {
    let result = run_async(Vec::new(), 0, 1).await;
    assert!(matches!(result, Err(RunError::InvalidConfig(_))));
}
