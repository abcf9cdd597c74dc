use meridian_error::MeridianError;
use meridian_execution::extension::Extension;
use meridian_execution::functions::scalar::string::Lower;
use meridian_execution::functions::scalar::ScalarFunction;
use meridian_testing::runner::close_all_suppress;
use meridian_testing::{MaterializedResult, QueryRunner};

/// Extension whose function name collides with a builtin, so installing it
/// always fails.
#[derive(Debug)]
struct ShadowsBuiltin;

impl Extension for ShadowsBuiltin {
    fn name(&self) -> &'static str {
        "shadows_builtin"
    }

    fn scalar_functions(&self) -> Vec<Box<dyn ScalarFunction>> {
        vec![Box::new(Lower)]
    }
}

#[test]
fn query_materializes_rows() {
    let mut runner = QueryRunner::builder().build().unwrap();

    let result = runner.query("SELECT 1 + 2 AS total, upper('ab')").unwrap();
    let expected = MaterializedResult::builder(["Int64", "Utf8"])
        .row(["3", "AB"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn query_values_rows_in_order() {
    let mut runner = QueryRunner::builder().build().unwrap();

    let result = runner.query("VALUES (1, 'a'), (2, 'b')").unwrap();
    let expected = MaterializedResult::builder(["Int64", "Utf8"])
        .row(["1", "a"])
        .row(["2", "b"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn query_renders_null() {
    let mut runner = QueryRunner::builder().build().unwrap();

    let result = runner.query("SELECT NULL").unwrap();
    let expected = MaterializedResult::builder(["Null"])
        .row(["NULL"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn query_rejects_multiple_statements() {
    let mut runner = QueryRunner::builder().build().unwrap();

    let err = runner.query("SELECT 1; SELECT 2").unwrap_err();
    assert!(err.to_string().contains("number of results"), "{err}");
}

#[test]
fn closed_runner_rejects_queries() {
    let mut runner = QueryRunner::builder().build().unwrap();
    runner.close().unwrap();

    runner.query("SELECT 1").unwrap_err();
    runner.close().unwrap_err();
}

#[test]
fn failed_install_returns_install_error() {
    let err = QueryRunner::builder()
        .with_extension(Box::new(ShadowsBuiltin))
        .build()
        .unwrap_err();

    // The runner closed cleanly on the failure path, so only the install
    // error is reported.
    assert!(err.to_string().contains("already exists"), "{err}");
    assert!(err.suppressed().is_empty());
}

#[test]
fn close_failure_attaches_as_suppressed() {
    let mut runner = QueryRunner::builder().build().unwrap();
    runner.close().unwrap();

    let err = close_all_suppress(MeridianError::new("install failed"), runner);

    assert_eq!("install failed", err.to_string());
    assert_eq!(1, err.suppressed().len());
    assert!(
        err.suppressed()[0].to_string().contains("already closed"),
        "{:?}",
        err.suppressed()
    );
}
