mod common;

use reloop::errors::ReloopError;
use reloop::exec::{Batch, Command, ErrorPolicy};
use tempfile::tempdir;

/// Three commands where the middle one leaves its marker and then fails
/// with a distinctive exit code.
fn marker_batch(policy: ErrorPolicy) -> Batch {
    let commands = vec![
        Command::shell("touch one").unwrap(),
        Command::shell("touch two && exit 3").unwrap(),
        Command::shell("touch three").unwrap(),
    ];
    Batch::new(commands, policy)
}

#[tokio::test]
async fn ignore_policy_runs_every_command() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let batch = marker_batch(ErrorPolicy::Ignore);
    batch
        .run(dir.path())
        .await
        .expect("batch under ignore reports success");

    assert!(dir.path().join("one").exists());
    assert!(dir.path().join("two").exists());
    assert!(dir.path().join("three").exists());
}

#[tokio::test]
async fn continue_policy_abandons_rest_of_batch_but_reports_success() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let batch = marker_batch(ErrorPolicy::Continue);
    batch
        .run(dir.path())
        .await
        .expect("batch under continue reports success");

    assert!(dir.path().join("one").exists());
    assert!(dir.path().join("two").exists());
    // The command after the failure must never run.
    assert!(!dir.path().join("three").exists());
}

#[tokio::test]
async fn fail_policy_propagates_the_failing_commands_error() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let batch = marker_batch(ErrorPolicy::Fail);
    let err = batch
        .run(dir.path())
        .await
        .expect_err("batch under fail reports failure");

    match err {
        ReloopError::NonZeroExit { code, .. } => assert_eq!(code, 3),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }

    assert!(dir.path().join("one").exists());
    assert!(dir.path().join("two").exists());
    assert!(!dir.path().join("three").exists());
}

#[tokio::test]
async fn empty_batch_reports_success() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let batch = Batch::new(Vec::new(), ErrorPolicy::Fail);
    batch.run(dir.path()).await.expect("empty batch is a no-op");
}

#[tokio::test]
async fn commands_run_in_order_against_the_given_cwd() {
    common::init_tracing();
    let dir = tempdir().unwrap();

    let batch = Batch::new(
        vec![
            Command::shell("echo first >> order.log").unwrap(),
            Command::shell("echo second >> order.log").unwrap(),
        ],
        ErrorPolicy::Fail,
    );
    batch.run(dir.path()).await.unwrap();

    let contents = std::fs::read_to_string(dir.path().join("order.log")).unwrap();
    assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["first", "second"]);
}

#[test]
fn error_policy_parses_known_values_only() {
    assert_eq!("fail".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Fail);
    assert_eq!(
        "continue".parse::<ErrorPolicy>().unwrap(),
        ErrorPolicy::Continue
    );
    assert_eq!("ignore".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Ignore);
    assert_eq!(" Fail ".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Fail);
    assert!("retry".parse::<ErrorPolicy>().is_err());
}
