mod common;

use std::path::Path;

use reloop::engine::Runtime;
use reloop::errors::ReloopError;
use reloop_test_utils::{builders::ConfigBuilder, with_timeout};
use tempfile::tempdir;

#[tokio::test]
async fn bounded_loop_runs_exactly_two_iterations_without_sleeping() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("iterations.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(2)
        .loop_command(&format!("pwd >> {}", log.display()))
        .build();

    // sleep = 0 must complete well inside the timeout.
    with_timeout(Runtime::new(cfg).run()).await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[tokio::test]
async fn each_iteration_gets_a_fresh_scratch_dir_removed_afterwards() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("scratch.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(2)
        .loop_command(&format!("pwd >> {}", log.display()))
        .build();

    with_timeout(Runtime::new(cfg).run()).await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    let scratch_paths: Vec<&str> = contents.lines().collect();
    assert_eq!(scratch_paths.len(), 2);
    assert_ne!(scratch_paths[0], scratch_paths[1]);
    for path in scratch_paths {
        assert!(
            !Path::new(path).exists(),
            "scratch dir {path} should be removed after its iteration"
        );
    }
}

#[tokio::test]
async fn scratch_dir_is_removed_even_when_the_batch_fails() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("scratch.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(1)
        .loop_onerror("continue")
        .loop_command(&format!("pwd >> {}", log.display()))
        .loop_command("false")
        .build();

    with_timeout(Runtime::new(cfg).run())
        .await
        .expect("continue policy absorbs the failure");

    let contents = std::fs::read_to_string(&log).unwrap();
    let scratch = contents.trim();
    assert!(!Path::new(scratch).exists());
}

#[tokio::test]
async fn fail_policy_failure_propagates_and_still_cleans_up() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("scratch.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(1)
        .loop_onerror("fail")
        .loop_command(&format!("pwd >> {}", log.display()))
        .loop_command("exit 7")
        .build();

    let err = with_timeout(Runtime::new(cfg).run()).await.unwrap_err();
    match err {
        ReloopError::NonZeroExit { code, .. } => assert_eq!(code, 7),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(!Path::new(contents.trim()).exists());
}

#[tokio::test]
async fn init_runs_once_before_the_loop_in_the_process_cwd() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("phases.log");
    let cwd_log = dir.path().join("init_cwd.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(2)
        .init_command(&format!("echo init >> {}", log.display()))
        .init_command(&format!("pwd >> {}", cwd_log.display()))
        .loop_command(&format!("echo loop >> {}", log.display()))
        .build();

    with_timeout(Runtime::new(cfg).run()).await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(
        contents.lines().collect::<Vec<_>>(),
        vec!["init", "loop", "loop"]
    );

    // Init runs against the process working directory, not a scratch dir.
    let init_cwd = std::fs::read_to_string(&cwd_log).unwrap();
    let init_cwd = std::fs::canonicalize(init_cwd.trim()).unwrap();
    let expected = std::fs::canonicalize(std::env::current_dir().unwrap()).unwrap();
    assert_eq!(init_cwd, expected);
}

#[tokio::test]
async fn failing_init_aborts_before_any_iteration() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("phases.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(1)
        .init_command("false")
        .loop_command(&format!("echo loop >> {}", log.display()))
        .build();

    let err = with_timeout(Runtime::new(cfg).run()).await.unwrap_err();
    assert!(matches!(err, ReloopError::NonZeroExit { .. }));
    assert!(!log.exists(), "loop must not have started after init failure");
}

#[tokio::test]
async fn init_failure_under_ignore_policy_does_not_stop_the_run() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let log = dir.path().join("phases.log");

    let cfg = ConfigBuilder::new()
        .sleep(0)
        .loops(1)
        .init_onerror("ignore")
        .init_command("false")
        .init_command(&format!("echo init >> {}", log.display()))
        .loop_command(&format!("echo loop >> {}", log.display()))
        .build();

    with_timeout(Runtime::new(cfg).run()).await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["init", "loop"]);
}
