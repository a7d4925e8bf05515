// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heavy output on both streams at once.

use crate::prelude::*;
use similar_asserts::assert_eq;
use rand::Rng;

async fn run_lots_of_output(runner: &Runner) {
    let (stdout_count, stderr_count) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(1_000..100_000), rng.gen_range(1_000..100_000))
    };

    let result = runner
        .run(dummy(123, 0, stdout_count, stderr_count))
        .await
        .unwrap();

    assert!(result.process().has_exited());
    assert_eq!(result.exit_code(), 123);
    assert_eq!(result.standard_output().len(), stdout_count);
    assert_eq!(result.standard_error().len(), stderr_count);
    assert_eq!(result.standard_output(), expected_lines("output", stdout_count).as_slice());
    assert_eq!(result.standard_error(), expected_lines("error", stderr_count).as_slice());
}

#[tokio::test]
async fn process_returns_lots_of_output_all_captured() {
    run_lots_of_output(&Runner::new()).await;
}

/// Many concurrent runs, to shake out lost or duplicated trailing lines.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_runs_with_lots_of_output() {
    let runner = Runner::new();
    let mut tasks = Vec::new();
    for _ in 0..8 {
        let runner = runner.clone();
        tasks.push(tokio::spawn(async move { run_lots_of_output(&runner).await }));
    }
    for task in tasks {
        task.await.unwrap();
    }
}
